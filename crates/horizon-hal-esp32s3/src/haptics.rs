//! Vibration motor control.

use embassy_time::Timer;
use esp_hal::gpio::Output;
use horizon_core::haptics::HapticPattern;

/// Driver for the vibration motor: pin high = motor on.
pub struct VibrationMotor<'d> {
    control_pin: Output<'d>,
}

impl<'d> VibrationMotor<'d> {
    pub fn new(control_pin: Output<'d>) -> Self {
        Self { control_pin }
    }

    /// Plays one pattern to completion.
    ///
    /// Segments alternate vibrate/pause, leading with a vibrate; the motor
    /// is always off when this returns.
    pub async fn play(&mut self, pattern: HapticPattern) {
        for (index, duration_ms) in pattern.durations.iter().enumerate() {
            if index % 2 == 0 {
                self.on();
            } else {
                self.off();
            }
            Timer::after_millis(*duration_ms as u64).await;
        }

        self.off();
    }

    fn on(&mut self) {
        self.control_pin.set_high();
    }

    fn off(&mut self) {
        self.control_pin.set_low();
    }
}
