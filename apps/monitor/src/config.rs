//! Environment-based configuration for the monitor binary.

use std::time::Duration;

use tracing::warn;

const DEFAULT_RECORDS_PATH: &str = "records.conf";
const DEFAULT_TICK_MS: u64 = 5_000;
const DEFAULT_FRAME_LIMIT: u32 = 60;
const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the purchase-records file.
    pub records_path: String,
    /// Interval between monitor ticks.
    pub tick_interval: Duration,
    /// Rendered frames per surface before the surface restarts.
    pub frame_limit: u32,
    /// Per-call timeout for the price provider.
    pub provider_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            records_path: std::env::var("STOCKWATCH_RECORDS")
                .unwrap_or_else(|_| DEFAULT_RECORDS_PATH.to_string()),
            tick_interval: Duration::from_millis(env_u64("STOCKWATCH_TICK_MS", DEFAULT_TICK_MS)),
            frame_limit: env_u64("STOCKWATCH_FRAME_LIMIT", u64::from(DEFAULT_FRAME_LIMIT)) as u32,
            provider_timeout: Duration::from_millis(env_u64(
                "STOCKWATCH_PROVIDER_TIMEOUT_MS",
                DEFAULT_PROVIDER_TIMEOUT_MS,
            )),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(parsed) if parsed > 0 => parsed,
            _ => {
                warn!("Invalid {}='{}', using default {}", key, value, default);
                default
            }
        },
        Err(_) => default,
    }
}
