use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored sensor reading, as returned by `/get`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub serial: i64,
    pub device_id: i64,
    pub date: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
}

/// A decoded reading that has not been assigned a serial yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub device_id: i64,
    pub date: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
}

/// Wire format accepted by `/save`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingPayload {
    pub device: i64,
    pub date: String,
    pub temperature: f64,
    pub humidity: f64,
}

impl ReadingPayload {
    /// Parses the RFC 3339 `date` and builds the reading to persist.
    pub fn into_reading(self) -> crate::errors::Result<NewReading> {
        let date = DateTime::parse_from_rfc3339(&self.date)?.with_timezone(&Utc);
        Ok(NewReading {
            device_id: self.device,
            date,
            temperature: self.temperature,
            humidity: self.humidity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_payload_with_offset_normalizes_to_utc() {
        let payload = ReadingPayload {
            device: 7,
            date: "2024-01-01T09:00:00+09:00".to_string(),
            temperature: 20.0,
            humidity: 40.0,
        };

        let reading = payload.into_reading().unwrap();
        assert_eq!(reading.device_id, 7);
        assert_eq!(reading.date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_payload_keeps_fractional_seconds() {
        let payload = ReadingPayload {
            device: 1,
            date: "2024-03-05T12:30:45.123456Z".to_string(),
            temperature: 20.0,
            humidity: 40.0,
        };

        let reading = payload.into_reading().unwrap();
        assert_eq!(reading.date.timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn test_payload_rejects_bad_date() {
        let payload = ReadingPayload {
            device: 1,
            date: "2024-01-01 00:00:00".to_string(),
            temperature: 20.0,
            humidity: 40.0,
        };

        assert!(matches!(
            payload.into_reading(),
            Err(crate::errors::Error::Timestamp(_))
        ));
    }

    #[test]
    fn test_reading_serializes_camel_case() {
        let reading = Reading {
            serial: 3,
            device_id: 1,
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            temperature: 22.5,
            humidity: 45.0,
        };

        let value = serde_json::to_value(&reading).unwrap();
        assert_eq!(value["serial"], 3);
        assert_eq!(value["deviceId"], 1);
        assert_eq!(value["date"], "2024-01-01T00:00:00Z");
        assert_eq!(value["temperature"], 22.5);
        assert_eq!(value["humidity"], 45.0);
    }
}
