//! Companion message dictionary.
//!
//! The wire schema is a fixed set of string-valued keys exchanged with the
//! companion app; the board codec carries these types as JSON dictionaries.

use heapless::String;
use serde::{Deserialize, Serialize};

/// Capacity of one weather text field.
pub const TEXT_BYTES: usize = 32;

/// Outbound "request weather now" dictionary. No parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct WeatherRequest {
    #[serde(rename = "weather-request")]
    request: &'static str,
}

impl WeatherRequest {
    pub const fn new() -> Self {
        Self { request: "1" }
    }
}

/// Inbound weather payload.
///
/// Every field is optional on the wire: a reply is accepted whenever the
/// `weather-reply` marker is present, and only the sibling fields that
/// actually arrived are applied. Unknown keys are ignored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct WeatherUpdate {
    #[serde(rename = "weather-reply")]
    pub reply: Option<String<4>>,
    #[serde(rename = "weather-temp")]
    pub temperature: Option<String<TEXT_BYTES>>,
    #[serde(rename = "weather-cond")]
    pub condition: Option<String<TEXT_BYTES>>,
    #[serde(rename = "weather-city")]
    pub city: Option<String<TEXT_BYTES>>,
    #[serde(rename = "weather-sun")]
    pub sun_window: Option<String<TEXT_BYTES>>,
}

impl WeatherUpdate {
    /// Whether the message carries the reply marker key.
    pub fn has_reply_marker(&self) -> bool {
        self.reply.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_the_fixed_dictionary() {
        let encoded = serde_json::to_string(&WeatherRequest::new()).unwrap();
        assert_eq!(encoded, r#"{"weather-request":"1"}"#);
    }

    #[test]
    fn full_reply_decodes_every_field() {
        let raw = r#"{
            "weather-reply": "1",
            "weather-temp": "21",
            "weather-cond": "Clear",
            "weather-city": "Springfield",
            "weather-sun": "06:00-18:00"
        }"#;

        let update: WeatherUpdate = serde_json::from_str(raw).unwrap();
        assert!(update.has_reply_marker());
        assert_eq!(update.temperature.as_deref(), Some("21"));
        assert_eq!(update.condition.as_deref(), Some("Clear"));
        assert_eq!(update.city.as_deref(), Some("Springfield"));
        assert_eq!(update.sun_window.as_deref(), Some("06:00-18:00"));
    }

    #[test]
    fn partial_reply_leaves_missing_fields_none() {
        let raw = r#"{"weather-reply": "1", "weather-temp": "-3"}"#;

        let update: WeatherUpdate = serde_json::from_str(raw).unwrap();
        assert!(update.has_reply_marker());
        assert_eq!(update.temperature.as_deref(), Some("-3"));
        assert_eq!(update.condition, None);
        assert_eq!(update.city, None);
        assert_eq!(update.sun_window, None);
    }

    #[test]
    fn message_without_marker_still_decodes_but_is_flagged() {
        let raw = r#"{"weather-temp": "21", "unrelated": "x"}"#;

        let update: WeatherUpdate = serde_json::from_str(raw).unwrap();
        assert!(!update.has_reply_marker());
    }
}
