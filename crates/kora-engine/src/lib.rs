//! # kora-engine — Conviction aggregation pipeline.
//!
//! Implements [`ConvictionCalculator`](kora_core::traits::ConvictionCalculator):
//! - **Exponential recency decay**: an action one decay-period old
//!   contributes `e^-1` ≈ 37% of a fresh one.
//! - **Platform trust × action commitment weighting**: each surviving
//!   action is scaled by both fixed weight tables.
//! - **Diversity bonus**: up to a 20% uplift for spreading engagement
//!   across every defined platform, applied once to the summed total.
//! - **Streak and consistency derivation** over distinct UTC calendar days.
//!
//! All computation is pure; "now" is injected per call.

pub mod engine;
pub mod streak;

pub use engine::{ConvictionEngine, ScoringParams};
