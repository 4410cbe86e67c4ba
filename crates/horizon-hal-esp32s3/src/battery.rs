//! Battery sensing helpers.

use horizon_core::battery::BatteryReading;

/// Converts a raw 12-bit ADC sample behind the 1:2 battery divider into
/// millivolts (3.3 V reference).
pub fn millivolts_from_raw(raw: u16) -> u16 {
    (raw as u32 * 2 * 3300 / 4095) as u16
}

/// Capacity estimate from battery voltage in millivolts.
///
/// Fixed data points with linear interpolation in between.
pub fn percent_from_millivolts(millivolts: u16) -> u8 {
    (match millivolts {
        0..=3449 => 0,
        3450..=3699 => (millivolts - 3450) / 5,
        3700..=4199 => 50 + (millivolts - 3700) / 10,
        _ => 100,
    }) as u8
}

/// Turns raw samples into readings, reporting only actual changes.
#[derive(Debug, Default)]
pub struct BatteryTracker {
    last: Option<BatteryReading>,
}

impl BatteryTracker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns a fresh reading when it differs from the previous one.
    pub fn update(&mut self, millivolts: u16, charging: bool) -> Option<BatteryReading> {
        let reading = BatteryReading {
            percent: percent_from_millivolts(millivolts).min(100),
            charging,
        };

        if self.last == Some(reading) {
            return None;
        }

        self.last = Some(reading);
        Some(reading)
    }
}
