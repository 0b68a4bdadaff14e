//! CLI configuration loaded from environment variables.

use anyhow::{Context, Result};
use kora_core::constants::{DEFAULT_DECAY_RATE, DEFAULT_LOOKBACK_DAYS, MIN_CONVICTION_THRESHOLD};

#[derive(Clone, Debug)]
pub struct Config {
    /// Weekly decay fraction applied to action age.
    pub decay_rate: f64,
    /// Lookback window in days.
    pub lookback_days: u32,
    /// Floor below which a score is logged as not meaningful.
    pub min_threshold: f64,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// library defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let decay_rate = match std::env::var("KORA_DECAY_RATE") {
            Ok(v) => v.parse().context("KORA_DECAY_RATE must be a number")?,
            Err(_) => DEFAULT_DECAY_RATE,
        };

        let lookback_days = match std::env::var("KORA_LOOKBACK_DAYS") {
            Ok(v) => v
                .parse()
                .context("KORA_LOOKBACK_DAYS must be a positive integer")?,
            Err(_) => DEFAULT_LOOKBACK_DAYS,
        };

        let min_threshold = match std::env::var("KORA_MIN_THRESHOLD") {
            Ok(v) => v.parse().context("KORA_MIN_THRESHOLD must be a number")?,
            Err(_) => MIN_CONVICTION_THRESHOLD,
        };

        Ok(Config {
            decay_rate,
            lookback_days,
            min_threshold,
        })
    }
}
