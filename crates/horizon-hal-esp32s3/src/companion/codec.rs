//! JSON wire codec for the fixed companion dictionary.

use alloc::vec::Vec;

use horizon_core::message::{WeatherRequest, WeatherUpdate};
use log::{debug, error};

/// Encodes the outbound weather-request dictionary.
///
/// Encode failure is logged and the send abandoned; there is no retry.
pub fn encode_weather_request() -> Option<Vec<u8>> {
    match serde_json::to_vec(&WeatherRequest::new()) {
        Ok(payload) => Some(payload),
        Err(err) => {
            error!("failed to encode weather request: {}", err);
            None
        }
    }
}

/// Decodes one inbound datagram.
///
/// Anything that is not a valid dictionary is dropped; whether the message
/// actually carries the reply marker is the app's decision.
pub fn decode_inbound(raw: &[u8]) -> Option<WeatherUpdate> {
    match serde_json::from_slice::<WeatherUpdate>(raw) {
        Ok(update) => Some(update),
        Err(err) => {
            debug!("undecodable inbound message ({} bytes): {}", raw.len(), err);
            None
        }
    }
}
