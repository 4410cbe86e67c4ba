//! Application context folding host events into cached display state.

use heapless::{Deque, String};
use log::{debug, info, warn};

use crate::{
    battery::BatteryReading,
    clock::TickTime,
    events::{EventSource, HostEvent},
    haptics::{self, HapticPattern},
    message::WeatherUpdate,
    render::{FaceView, LINK_LOST_GLYPH, LINK_OK_GLYPH},
    weather::WeatherText,
};

const COMMAND_QUEUE_DEPTH: usize = 8;
const TIME_TEXT_BYTES: usize = 8;
const DATE_TEXT_BYTES: usize = 20;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Side effects requested from the board loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Send the outbound weather-request dictionary.
    RequestWeather,
    /// Play a vibration pattern.
    Vibrate(HapticPattern),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FaceConfig {
    /// Hourly chime plays only for hours strictly after this one.
    pub chime_after_hour: u8,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self { chime_after_hour: 8 }
    }
}

/// Watchface application context.
///
/// Single writer per cached field: each host event replaces its own slice of
/// state, and the renderer only ever reads through [`FaceApp::with_face`].
pub struct FaceApp<ES>
where
    ES: EventSource,
{
    events: ES,
    config: FaceConfig,
    time_text: String<TIME_TEXT_BYTES>,
    date_text: String<DATE_TEXT_BYTES>,
    weather: WeatherText,
    battery: BatteryReading,
    link_connected: bool,
    commands: Deque<Command, COMMAND_QUEUE_DEPTH>,
    pending_redraw: bool,
}

include!("runtime.rs");
include!("events.rs");
include!("view.rs");

#[cfg(test)]
mod tests;
