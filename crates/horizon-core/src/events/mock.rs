use super::{EventSource, HostEvent};

/// No-hardware event source used during bring-up.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockEvents;

impl MockEvents {
    pub const fn new() -> Self {
        Self
    }
}

impl EventSource for MockEvents {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<HostEvent>, Self::Error> {
        Ok(None)
    }
}
