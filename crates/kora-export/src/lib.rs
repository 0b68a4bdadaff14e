//! # kora-export — Export record shape for downstream consumers.
//!
//! Pure formatting: maps a computed [`ConvictionScore`] into the flat,
//! stable record a transport collaborator pushes downstream. The push
//! itself (HTTP, retries, signing) is the collaborator's concern; nothing
//! here performs I/O or reads the clock.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kora_core::platform::Platform;
use kora_core::score::{ConsistencyRating, ConvictionScore, Tier};

/// Payload revision identifier for the transport collaborator.
pub const EXPORT_FORMAT: &str = "conviction_v1";

/// Region tag stamped on every export record.
pub const EXPORT_REGION: &str = "africa";

/// Flat export record for one subject's conviction score.
///
/// `impact_power` serializes as a decimal string so downstream accounting
/// never sees a binary-float approximation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportPayload {
    pub subject_id: String,
    pub score: f64,
    pub impact_power: Decimal,
    pub tier: Tier,
    pub percentile: f64,
    pub action_count: u64,
    pub platform_breakdown: BTreeMap<Platform, u64>,
    pub consistency_rating: ConsistencyRating,
    pub streak_days: u32,
    pub region: String,
    pub generated_at: DateTime<Utc>,
}

/// Map a computed score into the export record shape.
///
/// `generated_at` is injected by the caller; the library never reads the
/// system clock.
pub fn export_record(
    subject_id: &str,
    score: &ConvictionScore,
    generated_at: DateTime<Utc>,
) -> ExportPayload {
    ExportPayload {
        subject_id: subject_id.to_string(),
        score: score.score,
        impact_power: score.impact_power,
        tier: score.tier,
        percentile: score.percentile,
        action_count: score.action_count,
        platform_breakdown: score.platform_breakdown.clone(),
        consistency_rating: score.consistency_rating,
        streak_days: score.streak_days,
        region: EXPORT_REGION.to_string(),
        generated_at,
    }
}

/// Format many subjects at once for a periodic downstream sync.
pub fn export_batch<'a, I>(scores: I, generated_at: DateTime<Utc>) -> Vec<ExportPayload>
where
    I: IntoIterator<Item = (&'a str, &'a ConvictionScore)>,
{
    scores
        .into_iter()
        .map(|(subject_id, score)| export_record(subject_id, score, generated_at))
        .collect()
}
