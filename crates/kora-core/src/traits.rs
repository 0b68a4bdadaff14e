//! Trait interfaces between Kora crates.
//!
//! [`ConvictionCalculator`] is the seam between the foundation types and
//! the aggregation pipeline (kora-engine implements it).

use chrono::{DateTime, Utc};

use crate::action::ConvictionAction;
use crate::error::ScoreError;
use crate::score::ConvictionScore;

/// Pure computation of a conviction score over an action history.
///
/// `now` is injected per call so results are deterministic and testable;
/// implementations must never read the system clock. Order of `actions` is
/// irrelevant, duplicates are allowed, and the slice may be empty.
pub trait ConvictionCalculator: Send + Sync {
    /// Score a subject's action history as of `now`.
    fn score(
        &self,
        actions: &[ConvictionAction],
        now: DateTime<Utc>,
    ) -> Result<ConvictionScore, ScoreError>;
}
