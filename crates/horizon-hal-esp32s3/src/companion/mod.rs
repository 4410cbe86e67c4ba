//! Companion link state shared between the network workers and the UI loop.

pub mod codec;

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

/// High-level companion link state for UI + logs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum LinkState {
    Disconnected = 0,
    Connecting = 1,
    Connected = 2,
}

impl LinkState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Connecting,
            2 => Self::Connected,
            _ => Self::Disconnected,
        }
    }
}

/// Immutable link snapshot for the board loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LinkSnapshot {
    pub state: LinkState,
    pub revision: u32,
}

impl LinkSnapshot {
    /// Connection definition for the status glyph: link fully up.
    pub const fn is_connected(self) -> bool {
        matches!(self.state, LinkState::Connected)
    }
}

/// Lock-free shared link status.
#[derive(Debug)]
pub struct LinkHandle {
    state: AtomicU8,
    revision: AtomicU32,
}

impl LinkHandle {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(LinkState::Disconnected as u8),
            revision: AtomicU32::new(0),
        }
    }

    pub fn snapshot(&self) -> LinkSnapshot {
        LinkSnapshot {
            state: LinkState::from_raw(self.state.load(Ordering::Acquire)),
            revision: self.revision.load(Ordering::Acquire),
        }
    }

    pub fn mark_connecting(&self) {
        self.store_state(LinkState::Connecting);
    }

    pub fn mark_connected(&self) {
        self.store_state(LinkState::Connected);
    }

    pub fn mark_disconnected(&self) {
        self.store_state(LinkState::Disconnected);
    }

    fn store_state(&self, next: LinkState) {
        if self.state.swap(next as u8, Ordering::AcqRel) != next as u8 {
            self.revision.fetch_add(1, Ordering::AcqRel);
        }
    }
}

impl Default for LinkHandle {
    fn default() -> Self {
        Self::new()
    }
}
