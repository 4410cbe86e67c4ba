//! Watchface view model consumed by the board renderer.

use crate::battery::BatteryReading;

/// Status glyph while the companion link is up.
pub const LINK_OK_GLYPH: &str = "";
/// Status glyph while the companion link is down.
pub const LINK_LOST_GLYPH: &str = "X";

/// Borrowed snapshot of everything one frame needs.
///
/// Layout, fonts and colors are the renderer's concern; the app only hands
/// over text and the battery reading.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FaceView<'a> {
    pub time: &'a str,
    pub date: &'a str,
    pub city: &'a str,
    pub temperature: &'a str,
    pub condition: &'a str,
    pub sun_window: &'a str,
    pub link_glyph: &'a str,
    pub battery: BatteryReading,
}
