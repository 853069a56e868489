use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Body posted to the saver's `/save` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub device: i64,
    pub date: String,
    pub temperature: f64,
    pub humidity: f64,
}

impl Reading {
    /// Produces a reading for `device`; roughly 5% fall outside the accepted ranges.
    pub fn generate(rng: &mut impl Rng, device: i64, now: DateTime<Utc>) -> Self {
        let temperature = if rng.gen_bool(0.05) {
            rng.gen_range(-40.0..80.0) // outliers
        } else {
            rng.gen_range(15.0..35.0)
        };

        let humidity = if rng.gen_bool(0.05) {
            rng.gen_range(-10.0..120.0) // outliers
        } else {
            rng.gen_range(30.0..80.0)
        };

        Self {
            device,
            date: now.to_rfc3339(),
            temperature,
            humidity,
        }
    }
}
