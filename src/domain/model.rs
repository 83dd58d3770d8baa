use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sub-endpoints queried for every reading, in the order their responses are
/// combined.
pub const DEFAULT_ENDPOINTS: [&str; 3] = ["birth_details", "astro_details", "ghat_chakra"];

/// Birth event sent to the astrology API.
///
/// Serialized with the API's short key names (`min`, `lat`, `lon`, `tzone`).
/// No range checks are applied; a month of 13 goes out as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthDetailsRequest {
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub hour: i32,
    #[serde(rename = "min")]
    pub minute: i32,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "tzone")]
    pub timezone_offset: f64,
}

impl Default for BirthDetailsRequest {
    fn default() -> Self {
        Self {
            day: 19,
            month: 6,
            year: 1997,
            hour: 23,
            minute: 48,
            latitude: 17.4333,
            longitude: 75.2,
            timezone_offset: 5.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reading {
    pub chart_text: String,
    pub interpretation: String,
    pub fetch_elapsed: Duration,
    pub interpret_elapsed: Duration,
}
