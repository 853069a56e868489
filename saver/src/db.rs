use crate::errors::Result;
use crate::metrics::{DB_FAILURES_TOTAL, INSERT_LATENCY_SECONDS};
use crate::model::{NewReading, Reading};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info};

const SELECT_READINGS: &str =
    "SELECT serial, deviceId AS device_id, date, temperature, humidity FROM data";

/// Opens (creating if absent) the database file at `path` and makes sure the
/// `data` table exists.
pub async fn make_pool(path: impl AsRef<Path>) -> Result<SqlitePool> {
    let path = path.as_ref();
    info!("Opening database at {}", path.display());

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations completed");

    Ok(pool)
}

/// Appends one reading and returns the serial assigned by the store.
pub async fn insert_reading(pool: &SqlitePool, reading: &NewReading) -> Result<i64> {
    let start = Instant::now();

    let result = sqlx::query(
        "INSERT INTO data (deviceId, date, temperature, humidity) VALUES (?, ?, ?, ?)",
    )
    .bind(reading.device_id)
    .bind(reading.date)
    .bind(reading.temperature)
    .bind(reading.humidity)
    .execute(pool)
    .await
    .map_err(|e| {
        DB_FAILURES_TOTAL.inc();
        error!("Failed to insert reading: {}", e);
        e
    })?;

    INSERT_LATENCY_SECONDS.observe(start.elapsed().as_secs_f64());
    Ok(result.last_insert_rowid())
}

pub async fn fetch_all(pool: &SqlitePool) -> Result<Vec<Reading>> {
    let query = format!("{} ORDER BY serial", SELECT_READINGS);
    let readings = sqlx::query_as::<_, Reading>(&query)
        .fetch_all(pool)
        .await
        .map_err(record_failure)?;
    Ok(readings)
}

pub async fn fetch_by_device(pool: &SqlitePool, device_id: i64) -> Result<Vec<Reading>> {
    let query = format!("{} WHERE deviceId = ? ORDER BY serial", SELECT_READINGS);
    let readings = sqlx::query_as::<_, Reading>(&query)
        .bind(device_id)
        .fetch_all(pool)
        .await
        .map_err(record_failure)?;
    Ok(readings)
}

fn record_failure(e: sqlx::Error) -> sqlx::Error {
    DB_FAILURES_TOTAL.inc();
    error!("Database query failed: {}", e);
    e
}
