//! Cached weather display text.

use heapless::String;
use log::debug;

use crate::message::{TEXT_BYTES, WeatherUpdate};

/// The four weather text fields shown on the face.
///
/// Fields are overwritten independently as replies arrive; once set, stale
/// text persists until the next reply.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeatherText {
    pub temperature: String<TEXT_BYTES>,
    pub condition: String<TEXT_BYTES>,
    pub city: String<TEXT_BYTES>,
    pub sun_window: String<TEXT_BYTES>,
}

impl Default for WeatherText {
    fn default() -> Self {
        Self {
            temperature: placeholder("0.0"),
            condition: placeholder("Not good"),
            city: placeholder("Loading..."),
            sun_window: placeholder("unavailable"),
        }
    }
}

impl WeatherText {
    /// Applies whichever fields the update carries. Returns `true` when at
    /// least one field was overwritten.
    pub fn apply(&mut self, update: &WeatherUpdate) -> bool {
        let mut changed = false;

        if let Some(temperature) = &update.temperature {
            debug!("weather temp: {}", temperature);
            self.temperature = temperature.clone();
            changed = true;
        }
        if let Some(condition) = &update.condition {
            debug!("weather cond: {}", condition);
            self.condition = condition.clone();
            changed = true;
        }
        if let Some(city) = &update.city {
            debug!("weather city: {}", city);
            self.city = city.clone();
            changed = true;
        }
        if let Some(sun_window) = &update.sun_window {
            debug!("weather sun: {}", sun_window);
            self.sun_window = sun_window.clone();
            changed = true;
        }

        changed
    }
}

fn placeholder(text: &str) -> String<TEXT_BYTES> {
    let mut field = String::new();
    let _ = field.push_str(text);
    field
}
