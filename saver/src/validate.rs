use crate::errors::{Error, Result};
use crate::model::NewReading;

// Both ranges are open intervals.
const TEMP_MIN: f64 = -10.0;
const TEMP_MAX: f64 = 50.0;
const HUMIDITY_MIN: f64 = 0.0;
const HUMIDITY_MAX: f64 = 100.0;

fn temperature_ok(t: f64) -> bool {
    TEMP_MIN < t && t < TEMP_MAX
}

fn humidity_ok(h: f64) -> bool {
    HUMIDITY_MIN < h && h < HUMIDITY_MAX
}

/// Returns true iff both temperature and humidity are strictly inside their bounds.
pub fn is_valid(reading: &NewReading) -> bool {
    temperature_ok(reading.temperature) && humidity_ok(reading.humidity)
}

/// Validates a reading before it is persisted
pub fn validate(reading: &NewReading) -> Result<()> {
    if !temperature_ok(reading.temperature) {
        return Err(Error::Validation(format!(
            "Temperature {} out of range ({}, {})",
            reading.temperature, TEMP_MIN, TEMP_MAX
        )));
    }

    if !humidity_ok(reading.humidity) {
        return Err(Error::Validation(format!(
            "Humidity {} out of range ({}, {})",
            reading.humidity, HUMIDITY_MIN, HUMIDITY_MAX
        )));
    }

    Ok(())
}
