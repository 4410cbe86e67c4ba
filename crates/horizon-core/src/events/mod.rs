//! Host event abstraction layer.

pub mod mock;

use crate::{battery::BatteryReading, clock::TickTime, message::WeatherUpdate};

/// Host-originated notifications consumed by the watchface.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HostEvent {
    /// Minute tick carrying the current wall time.
    Tick(TickTime),
    /// Battery charge state changed.
    Battery(BatteryReading),
    /// Companion link went up (`true`) or down (`false`).
    Link(bool),
    /// Inbound companion message decoded to a weather update.
    Weather(WeatherUpdate),
}

/// Polled host event provider.
pub trait EventSource {
    type Error;

    fn poll_event(&mut self) -> Result<Option<HostEvent>, Self::Error>;
}
