//! Action taxonomy and the verified engagement event record.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// A type of verifiable fan action.
///
/// Closed set. Base weights reflect commitment cost: spending money
/// (purchase, tip) weighs most, passive social signals least.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Stream,
    Share,
    Purchase,
    Tip,
    Mission,
    Referral,
    SocialProof,
}

impl ActionType {
    /// Every defined action type, in declaration order.
    pub const ALL: [ActionType; 7] = [
        ActionType::Stream,
        ActionType::Share,
        ActionType::Purchase,
        ActionType::Tip,
        ActionType::Mission,
        ActionType::Referral,
        ActionType::SocialProof,
    ];

    /// Fixed base weight applied to every action of this type.
    ///
    /// | Action       | Weight |
    /// |--------------|--------|
    /// | stream       | 1.0    |
    /// | share        | 1.5    |
    /// | purchase     | 5.0    |
    /// | tip          | 4.0    |
    /// | mission      | 2.0    |
    /// | referral     | 3.0    |
    /// | social_proof | 0.5    |
    pub fn base_weight(&self) -> f64 {
        match self {
            Self::Stream => 1.0,
            Self::Share => 1.5,
            Self::Purchase => 5.0,
            Self::Tip => 4.0,
            Self::Mission => 2.0,
            Self::Referral => 3.0,
            Self::SocialProof => 0.5,
        }
    }

    /// Reporting bucket this action type belongs to.
    pub fn category(&self) -> ActionCategory {
        match self {
            Self::Stream => ActionCategory::Streaming,
            Self::Share | Self::SocialProof => ActionCategory::Social,
            Self::Mission => ActionCategory::Mission,
            Self::Purchase | Self::Tip => ActionCategory::Payment,
            Self::Referral => ActionCategory::Referral,
        }
    }

    /// Canonical lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Share => "share",
            Self::Purchase => "purchase",
            Self::Tip => "tip",
            Self::Mission => "mission",
            Self::Referral => "referral",
            Self::SocialProof => "social_proof",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporting bucket for score breakdowns.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Streaming,
    Social,
    Mission,
    Payment,
    Referral,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Streaming => "streaming",
            Self::Social => "social",
            Self::Mission => "mission",
            Self::Payment => "payment",
            Self::Referral => "referral",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single metadata value attached to an action.
///
/// Constrained to scalar JSON types so export payloads stay schema-stable.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

/// One verifiable fan event, produced by the verification subsystem at the
/// moment a claim is confirmed. Immutable thereafter.
///
/// Only actions with `verified = true` contribute to scoring; unverified
/// actions are retained by callers for audit and skipped by the aggregator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConvictionAction {
    /// What the fan did.
    pub action_type: ActionType,
    /// Where it happened.
    pub platform: Platform,
    /// When it happened, UTC.
    pub timestamp: DateTime<Utc>,
    /// Whether the verification subsystem confirmed the claim.
    pub verified: bool,
    /// Opaque evidentiary reference from the verifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_hash: Option<String>,
    /// Free-form scalar annotations from the verifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, MetadataValue>>,
}

impl ConvictionAction {
    /// Create an action with no proof hash or metadata.
    pub fn new(
        action_type: ActionType,
        platform: Platform,
        timestamp: DateTime<Utc>,
        verified: bool,
    ) -> Self {
        Self {
            action_type,
            platform,
            timestamp,
            verified,
            proof_hash: None,
            metadata: None,
        }
    }

    /// Attach an evidentiary proof hash.
    pub fn with_proof_hash(mut self, proof_hash: impl Into<String>) -> Self {
        self.proof_hash = Some(proof_hash.into());
        self
    }

    /// Attach scalar metadata.
    pub fn with_metadata(mut self, metadata: BTreeMap<String, MetadataValue>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Count actions per reporting bucket.
///
/// Operates on whatever slice the caller passes; apply any verified/window
/// filtering beforehand if the breakdown should match a score.
pub fn category_breakdown(actions: &[ConvictionAction]) -> BTreeMap<ActionCategory, u64> {
    let mut counts = BTreeMap::new();
    for action in actions {
        *counts.entry(action.action_type.category()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    // --- ActionType ---

    #[test]
    fn base_weights_match_table() {
        let expected: &[(ActionType, f64)] = &[
            (ActionType::Stream, 1.0),
            (ActionType::Share, 1.5),
            (ActionType::Purchase, 5.0),
            (ActionType::Tip, 4.0),
            (ActionType::Mission, 2.0),
            (ActionType::Referral, 3.0),
            (ActionType::SocialProof, 0.5),
        ];
        for &(action, weight) in expected {
            assert_eq!(action.base_weight(), weight, "{action}");
        }
    }

    #[test]
    fn purchase_outweighs_every_other_action() {
        for action in ActionType::ALL {
            if action != ActionType::Purchase {
                assert!(action.base_weight() < ActionType::Purchase.base_weight());
            }
        }
    }

    #[test]
    fn every_action_type_has_a_category() {
        // Exhaustiveness is compiler-enforced; pin the mapping itself.
        assert_eq!(ActionType::Stream.category(), ActionCategory::Streaming);
        assert_eq!(ActionType::Share.category(), ActionCategory::Social);
        assert_eq!(ActionType::SocialProof.category(), ActionCategory::Social);
        assert_eq!(ActionType::Mission.category(), ActionCategory::Mission);
        assert_eq!(ActionType::Purchase.category(), ActionCategory::Payment);
        assert_eq!(ActionType::Tip.category(), ActionCategory::Payment);
        assert_eq!(ActionType::Referral.category(), ActionCategory::Referral);
    }

    #[test]
    fn serde_uses_snake_case_names() {
        assert_eq!(
            serde_json::to_string(&ActionType::SocialProof).unwrap(),
            "\"social_proof\""
        );
        let parsed: ActionType = serde_json::from_str("\"tip\"").unwrap();
        assert_eq!(parsed, ActionType::Tip);
    }

    // --- ConvictionAction ---

    #[test]
    fn new_has_no_proof_or_metadata() {
        let action =
            ConvictionAction::new(ActionType::Stream, Platform::Boomplay, sample_time(), true);
        assert!(action.proof_hash.is_none());
        assert!(action.metadata.is_none());
        assert!(action.verified);
    }

    #[test]
    fn builders_attach_proof_and_metadata() {
        let mut meta = BTreeMap::new();
        meta.insert("track_id".to_string(), MetadataValue::Text("trk-9".into()));
        meta.insert("plays".to_string(), MetadataValue::Number(12.0));
        meta.insert("premium".to_string(), MetadataValue::Flag(true));

        let action =
            ConvictionAction::new(ActionType::Stream, Platform::Audiomack, sample_time(), true)
                .with_proof_hash("ab34")
                .with_metadata(meta);

        assert_eq!(action.proof_hash.as_deref(), Some("ab34"));
        assert_eq!(action.metadata.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn action_round_trips_through_json() {
        let action =
            ConvictionAction::new(ActionType::Purchase, Platform::MtnMusic, sample_time(), true)
                .with_proof_hash("deadbeef");
        let json = serde_json::to_string(&action).unwrap();
        let back: ConvictionAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }

    #[test]
    fn optional_fields_may_be_absent_in_json() {
        let json = r#"{
            "action_type": "share",
            "platform": "telegram",
            "timestamp": "2024-06-01T12:00:00Z",
            "verified": false
        }"#;
        let action: ConvictionAction = serde_json::from_str(json).unwrap();
        assert_eq!(action.action_type, ActionType::Share);
        assert!(!action.verified);
        assert!(action.proof_hash.is_none());
    }

    #[test]
    fn metadata_values_keep_their_scalar_types() {
        let json = r#"{"a": "text", "b": 2.5, "c": false}"#;
        let meta: BTreeMap<String, MetadataValue> = serde_json::from_str(json).unwrap();
        assert_eq!(meta["a"], MetadataValue::Text("text".into()));
        assert_eq!(meta["b"], MetadataValue::Number(2.5));
        assert_eq!(meta["c"], MetadataValue::Flag(false));
    }

    // --- category_breakdown ---

    #[test]
    fn category_breakdown_counts_per_bucket() {
        let t = sample_time();
        let actions = vec![
            ConvictionAction::new(ActionType::Stream, Platform::Boomplay, t, true),
            ConvictionAction::new(ActionType::Stream, Platform::Audiomack, t, true),
            ConvictionAction::new(ActionType::Share, Platform::Telegram, t, true),
            ConvictionAction::new(ActionType::SocialProof, Platform::Twitter, t, true),
            ConvictionAction::new(ActionType::Tip, Platform::MtnMusic, t, true),
            ConvictionAction::new(ActionType::Referral, Platform::Whatsapp, t, true),
        ];
        let counts = category_breakdown(&actions);
        assert_eq!(counts[&ActionCategory::Streaming], 2);
        assert_eq!(counts[&ActionCategory::Social], 2);
        assert_eq!(counts[&ActionCategory::Payment], 1);
        assert_eq!(counts[&ActionCategory::Referral], 1);
        assert!(!counts.contains_key(&ActionCategory::Mission));
    }

    #[test]
    fn category_breakdown_total_matches_input_len() {
        let t = sample_time();
        let actions = vec![
            ConvictionAction::new(ActionType::Mission, Platform::Telegram, t, true),
            ConvictionAction::new(ActionType::Purchase, Platform::Boomplay, t, false),
        ];
        let counts = category_breakdown(&actions);
        assert_eq!(counts.values().sum::<u64>(), actions.len() as u64);
    }

    #[test]
    fn category_breakdown_empty() {
        assert!(category_breakdown(&[]).is_empty());
    }
}
