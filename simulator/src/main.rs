mod reading;

use chrono::Utc;
use clap::Parser;
use reading::Reading;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Posts generated sensor readings to a running saver.
#[derive(Debug, Parser)]
struct Args {
    /// Base URL of the saver service
    #[arg(long, env = "SAVER_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Readings per second
    #[arg(long, env = "RATE", default_value_t = 10)]
    rate: u64,

    /// Number of simulated devices
    #[arg(long, env = "DEVICES", default_value_t = 5)]
    devices: i64,

    /// Stop after this many readings; runs until interrupted when absent
    #[arg(long, env = "COUNT")]
    count: Option<u64>,
}

#[derive(Debug, Default)]
struct Tally {
    accepted: u64,
    rejected: u64,
    failed: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting sensor simulator");
    info!(
        "Target: {}, Rate: {} readings/s, Devices: {}",
        args.url, args.rate, args.devices
    );

    let client = reqwest::Client::new();
    let save_url = format!("{}/save", args.url.trim_end_matches('/'));
    let interval = Duration::from_micros(1_000_000 / args.rate.max(1));
    let mut ticker = tokio::time::interval(interval);
    let mut rng = rand::thread_rng();
    let mut tally = Tally::default();
    let mut counter = 0u64;

    loop {
        if args.count.is_some_and(|count| counter >= count) {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
        }

        let device = (counter % args.devices.max(1) as u64) as i64;
        let reading = Reading::generate(&mut rng, device, Utc::now());
        counter += 1;

        match client.post(&save_url).json(&reading).send().await {
            Ok(resp) if resp.status().is_success() => tally.accepted += 1,
            Ok(resp) if resp.status().is_client_error() => tally.rejected += 1,
            Ok(resp) => {
                tally.failed += 1;
                warn!("Saver responded with {}", resp.status());
            }
            Err(e) => {
                tally.failed += 1;
                error!("Failed to post reading: {}", e);
            }
        }

        if counter % 100 == 0 {
            info!(
                "Posted {} readings (accepted {}, rejected {}, failed {})",
                counter, tally.accepted, tally.rejected, tally.failed
            );
        }
    }

    info!(
        "Done: {} readings posted (accepted {}, rejected {}, failed {})",
        counter, tally.accepted, tally.rejected, tally.failed
    );
}
