//! Score result type and the pure classifier functions.
//!
//! Classifiers are total: every finite score maps to a tier and a
//! percentile estimate, every density to a consistency rating. The
//! aggregator's empty-history and all-filtered edge cases override the
//! tier with `unranked`/`dormant` and report percentile 0 directly.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Discrete rank label derived from the score threshold ladder.
///
/// `Dormant` and `Unranked` are never produced by [`Tier::for_score`]; they
/// mark the aggregator's edge cases (history with nothing scorable vs no
/// history at all).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Starter,
    Bronze,
    Silver,
    Gold,
    Diamond,
    Dormant,
    Unranked,
}

impl Tier {
    /// Map a score onto the ranked tier ladder.
    ///
    /// | Score   | Tier    |
    /// |---------|---------|
    /// | ≥ 500   | diamond |
    /// | ≥ 250   | gold    |
    /// | ≥ 100   | silver  |
    /// | ≥ 50    | bronze  |
    /// | < 50    | starter |
    ///
    /// # Examples
    ///
    /// ```
    /// use kora_core::score::Tier;
    /// assert_eq!(Tier::for_score(500.0), Tier::Diamond);
    /// assert_eq!(Tier::for_score(499.99), Tier::Gold);
    /// assert_eq!(Tier::for_score(0.0), Tier::Starter);
    /// ```
    pub fn for_score(score: f64) -> Tier {
        if score >= 500.0 {
            Tier::Diamond
        } else if score >= 250.0 {
            Tier::Gold
        } else if score >= 100.0 {
            Tier::Silver
        } else if score >= 50.0 {
            Tier::Bronze
        } else {
            Tier::Starter
        }
    }

    /// Minimum score required to hold this tier.
    ///
    /// Returns `None` for the unranked edge-case tiers, which have no
    /// position on the ladder.
    pub fn min_score(&self) -> Option<f64> {
        match self {
            Self::Starter => Some(0.0),
            Self::Bronze => Some(50.0),
            Self::Silver => Some(100.0),
            Self::Gold => Some(250.0),
            Self::Diamond => Some(500.0),
            Self::Dormant | Self::Unranked => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Diamond => "diamond",
            Self::Dormant => "dormant",
            Self::Unranked => "unranked",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Percentile
// ---------------------------------------------------------------------------

/// Coarse percentile estimate for a score.
///
/// A step function over the observed score distribution, not a computed
/// rank. Below the 50-score step the estimate degrades to `max(1, score/2)`.
///
/// | Score  | Percentile        |
/// |--------|-------------------|
/// | ≥ 1000 | 99                |
/// | ≥ 500  | 95                |
/// | ≥ 250  | 85                |
/// | ≥ 100  | 70                |
/// | ≥ 50   | 50                |
/// | < 50   | max(1, score / 2) |
///
/// # Examples
///
/// ```
/// use kora_core::score::estimate_percentile;
/// assert_eq!(estimate_percentile(1000.0), 99.0);
/// assert_eq!(estimate_percentile(40.0), 20.0);
/// assert_eq!(estimate_percentile(0.5), 1.0);
/// ```
pub fn estimate_percentile(score: f64) -> f64 {
    if score >= 1000.0 {
        99.0
    } else if score >= 500.0 {
        95.0
    } else if score >= 250.0 {
        85.0
    } else if score >= 100.0 {
        70.0
    } else if score >= 50.0 {
        50.0
    } else {
        (score / 2.0).max(1.0)
    }
}

// ---------------------------------------------------------------------------
// Consistency
// ---------------------------------------------------------------------------

/// Label for the density of distinct active days in the lookback window.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyRating {
    Inactive,
    Sporadic,
    Building,
    Good,
    Excellent,
    Legendary,
}

impl ConsistencyRating {
    /// Rate an activity density (`distinct_active_days / lookback_days`).
    ///
    /// | Density | Rating    |
    /// |---------|-----------|
    /// | ≥ 0.7   | legendary |
    /// | ≥ 0.5   | excellent |
    /// | ≥ 0.3   | good      |
    /// | ≥ 0.1   | building  |
    /// | < 0.1   | sporadic  |
    ///
    /// Never returns `Inactive`; that rating is reserved for the
    /// aggregator's empty edge cases, which short-circuit upstream.
    pub fn for_density(density: f64) -> ConsistencyRating {
        if density >= 0.7 {
            Self::Legendary
        } else if density >= 0.5 {
            Self::Excellent
        } else if density >= 0.3 {
            Self::Good
        } else if density >= 0.1 {
            Self::Building
        } else {
            Self::Sporadic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Sporadic => "sporadic",
            Self::Building => "building",
            Self::Good => "good",
            Self::Excellent => "excellent",
            Self::Legendary => "legendary",
        }
    }
}

impl fmt::Display for ConsistencyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConvictionScore
// ---------------------------------------------------------------------------

/// Aggregation result for one subject over one lookback window.
///
/// Produced fresh on every call, never persisted by the core.
///
/// # Invariants
///
/// * `action_count == platform_breakdown.values().sum()`
/// * `tier` and `percentile` are monotonic in `score` (overridden only by
///   the `unranked`/`dormant` edge cases)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConvictionScore {
    /// Diversity-adjusted total, rounded to 2 decimal places.
    pub score: f64,
    /// Pre-bonus raw total scaled by 10, carried as an exact decimal for
    /// financial-adjacent downstream use.
    pub impact_power: Decimal,
    /// Coarse percentile estimate, 0–100.
    pub percentile: f64,
    /// Rank label on the threshold ladder.
    pub tier: Tier,
    /// Number of actions included in the score.
    pub action_count: u64,
    /// Included actions per platform.
    pub platform_breakdown: BTreeMap<Platform, u64>,
    /// Density rating of distinct active days in the window.
    pub consistency_rating: ConsistencyRating,
    /// Consecutive-day streak anchored at the most recent action date.
    pub streak_days: u32,
}

impl ConvictionScore {
    fn zeroed(tier: Tier) -> Self {
        Self {
            score: 0.0,
            impact_power: Decimal::ZERO,
            percentile: 0.0,
            tier,
            action_count: 0,
            platform_breakdown: BTreeMap::new(),
            consistency_rating: ConsistencyRating::Inactive,
            streak_days: 0,
        }
    }

    /// Zero record for a subject with no action history at all.
    pub fn unranked() -> Self {
        Self::zeroed(Tier::Unranked)
    }

    /// Zero record for a history with nothing verified inside the window.
    /// Distinct from [`unranked`](Self::unranked): signals "was active,
    /// isn't now".
    pub fn dormant() -> Self {
        Self::zeroed(Tier::Dormant)
    }
}
