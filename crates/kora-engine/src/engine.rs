//! Conviction engine implementing the [`ConvictionCalculator`] trait.
//!
//! Pipeline: filter to verified actions inside the lookback window, weight
//! each by recency decay × platform trust × action commitment, sum into a
//! raw total, then apply the platform diversity bonus once to the total.
//! Impact Power scales the pre-bonus raw total; the reported score uses the
//! post-bonus total. The two diverge on purpose: Impact Power measures raw
//! verified effort, the score is the ranked metric.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use kora_core::action::ConvictionAction;
use kora_core::constants::{
    DAYS_PER_WEEK, DEFAULT_DECAY_RATE, DEFAULT_LOOKBACK_DAYS, DIVERSITY_BONUS_MAX,
    IMPACT_POWER_SCALE,
};
use kora_core::error::ScoreError;
use kora_core::platform::Platform;
use kora_core::score::{ConsistencyRating, ConvictionScore, Tier, estimate_percentile};
use kora_core::traits::ConvictionCalculator;

use crate::streak;

/// Scoring configuration: weekly decay fraction and lookback window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Weekly exponential decay fraction applied to action age.
    pub decay_rate: f64,
    /// Trailing day-count within which actions are eligible.
    pub lookback_days: u32,
}

impl ScoringParams {
    /// Check the documented invariants: `decay_rate` finite and
    /// non-negative, `lookback_days` at least 1.
    pub fn validate(&self) -> Result<(), ScoreError> {
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(ScoreError::InvalidDecayRate(self.decay_rate));
        }
        if self.lookback_days == 0 {
            return Err(ScoreError::InvalidLookback);
        }
        Ok(())
    }
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            decay_rate: DEFAULT_DECAY_RATE,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// The production conviction calculator.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use kora_core::score::Tier;
/// use kora_core::traits::ConvictionCalculator;
/// use kora_engine::ConvictionEngine;
///
/// let engine = ConvictionEngine::with_defaults();
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// let record = engine.score(&[], now).unwrap();
/// assert_eq!(record.tier, Tier::Unranked);
/// ```
#[derive(Debug, Clone)]
pub struct ConvictionEngine {
    params: ScoringParams,
}

impl ConvictionEngine {
    /// Create an engine, failing fast on malformed configuration.
    pub fn new(params: ScoringParams) -> Result<Self, ScoreError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Engine with the default decay rate and lookback window.
    pub fn with_defaults() -> Self {
        Self {
            params: ScoringParams::default(),
        }
    }

    /// The configuration this engine scores with.
    pub fn params(&self) -> ScoringParams {
        self.params
    }

    /// Weight of one action at `now`: recency decay × platform trust ×
    /// action base weight. Age truncates to whole days before the weekly
    /// exponent.
    fn action_weight(&self, action: &ConvictionAction, now: DateTime<Utc>) -> f64 {
        let age_days = (now - action.timestamp).num_days();
        let age_weeks = age_days as f64 / DAYS_PER_WEEK;
        let time_weight = (-self.params.decay_rate * age_weeks).exp();
        time_weight * action.platform.trust_weight() * action.action_type.base_weight()
    }
}

impl ConvictionCalculator for ConvictionEngine {
    fn score(
        &self,
        actions: &[ConvictionAction],
        now: DateTime<Utc>,
    ) -> Result<ConvictionScore, ScoreError> {
        // Future-dated actions are malformed input, never silently coerced.
        for action in actions {
            if action.timestamp > now {
                return Err(ScoreError::TimestampInFuture {
                    timestamp: action.timestamp,
                    now,
                });
            }
        }

        // No history at all: distinct from "history exists but nothing
        // scorable" below.
        if actions.is_empty() {
            return Ok(ConvictionScore::unranked());
        }

        let cutoff = now - Duration::days(i64::from(self.params.lookback_days));
        let recent: Vec<&ConvictionAction> = actions
            .iter()
            .filter(|a| a.verified && a.timestamp >= cutoff)
            .collect();

        if recent.is_empty() {
            return Ok(ConvictionScore::dormant());
        }

        let mut raw_total = 0.0;
        let mut platform_breakdown: BTreeMap<Platform, u64> = BTreeMap::new();
        for action in &recent {
            raw_total += self.action_weight(action, now);
            *platform_breakdown.entry(action.platform).or_insert(0) += 1;
        }
        if !raw_total.is_finite() {
            return Err(ScoreError::NonFiniteTotal);
        }

        // Impact Power scales the pre-bonus total and must stay exact
        // decimal for downstream accounting.
        let impact_power = Decimal::from_f64(raw_total * IMPACT_POWER_SCALE)
            .ok_or(ScoreError::NonFiniteTotal)?;

        let diversity = platform_breakdown.len() as f64 / Platform::COUNT as f64;
        let total = raw_total * (1.0 + diversity * DIVERSITY_BONUS_MAX);

        let active_days: BTreeSet<NaiveDate> =
            recent.iter().map(|a| a.timestamp.date_naive()).collect();
        let streak_days = streak::consecutive_days(&active_days);
        let density = active_days.len() as f64 / f64::from(self.params.lookback_days);

        let score = round2(total);

        Ok(ConvictionScore {
            score,
            impact_power,
            percentile: estimate_percentile(score),
            tier: Tier::for_score(score),
            action_count: recent.len() as u64,
            platform_breakdown,
            consistency_rating: ConsistencyRating::for_density(density),
            streak_days,
        })
    }
}

/// Round to 2 decimal places, the precision of the reported score.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
