//! Battery snapshot and gauge geometry.

/// Charge state as delivered by the host battery monitor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatteryReading {
    /// Charge in percent, 0..=100.
    pub percent: u8,
    pub charging: bool,
}

/// Logical overlay color of the gauge; the renderer maps these to panel
/// colors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GaugeLevel {
    Normal,
    Low,
    Charging,
}

/// Charge percentage at or below which the gauge shows the low color.
pub const LOW_PERCENT: u8 = 20;

/// Overlay width and color for a gauge track `track_width` pixels wide.
///
/// Charging always spans the full track; otherwise the overlay width is the
/// truncating proportional share of the track.
pub fn gauge_overlay(track_width: u32, reading: BatteryReading) -> (u32, GaugeLevel) {
    if reading.charging {
        return (track_width, GaugeLevel::Charging);
    }

    let percent = reading.percent.min(100) as u32;
    let width = track_width * percent / 100;
    let level = if reading.percent <= LOW_PERCENT {
        GaugeLevel::Low
    } else {
        GaugeLevel::Normal
    };

    (width, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discharging(percent: u8) -> BatteryReading {
        BatteryReading {
            percent,
            charging: false,
        }
    }

    #[test]
    fn overlay_width_is_truncating_proportional_share() {
        assert_eq!(gauge_overlay(176, discharging(0)).0, 0);
        assert_eq!(gauge_overlay(176, discharging(50)).0, 88);
        assert_eq!(gauge_overlay(176, discharging(33)).0, 58);
        assert_eq!(gauge_overlay(176, discharging(100)).0, 176);
        // 176 * 99 / 100 = 174.24, truncated.
        assert_eq!(gauge_overlay(176, discharging(99)).0, 174);
    }

    #[test]
    fn low_color_applies_at_twenty_percent_and_below() {
        assert_eq!(gauge_overlay(176, discharging(21)).1, GaugeLevel::Normal);
        assert_eq!(gauge_overlay(176, discharging(20)).1, GaugeLevel::Low);
        assert_eq!(gauge_overlay(176, discharging(1)).1, GaugeLevel::Low);
    }

    #[test]
    fn charging_spans_full_track_regardless_of_percent() {
        let reading = BatteryReading {
            percent: 7,
            charging: true,
        };
        assert_eq!(gauge_overlay(176, reading), (176, GaugeLevel::Charging));
    }

    #[test]
    fn out_of_range_percent_is_clamped_for_width() {
        let reading = BatteryReading {
            percent: 130,
            charging: false,
        };
        assert_eq!(gauge_overlay(176, reading).0, 176);
    }
}
