//! Error types for conviction scoring.
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Validation failures for malformed scoring input.
///
/// Empty or fully-filtered action histories are NOT errors; they produce
/// the documented `unranked`/`dormant` records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("invalid decay rate {0}: must be finite and non-negative")] InvalidDecayRate(f64),
    #[error("lookback window must be at least one day")] InvalidLookback,
    #[error("action timestamp {timestamp} is later than now {now}")] TimestampInFuture { timestamp: DateTime<Utc>, now: DateTime<Utc> },
    #[error("weighted total is not finite")] NonFiniteTotal,
}
