//! Platform taxonomy and trust weights.
//!
//! Platforms form a closed set, fixed at compile time. Each carries a trust
//! weight reflecting how reliably engagement on it can be verified:
//! African-first platforms sit above 1.0, bot-prone global platforms below.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A platform on which a fan action can be verified.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Boomplay,
    Audiomack,
    MtnMusic,
    Youtube,
    Telegram,
    Whatsapp,
    Twitter,
}

impl Platform {
    /// Every defined platform, in declaration order.
    pub const ALL: [Platform; 7] = [
        Platform::Boomplay,
        Platform::Audiomack,
        Platform::MtnMusic,
        Platform::Youtube,
        Platform::Telegram,
        Platform::Whatsapp,
        Platform::Twitter,
    ];

    /// Number of defined platforms (the diversity-bonus denominator).
    pub const COUNT: usize = Self::ALL.len();

    /// Fixed trust weight applied to every action on this platform.
    ///
    /// | Platform   | Weight |
    /// |------------|--------|
    /// | boomplay   | 1.2    |
    /// | audiomack  | 1.1    |
    /// | mtn_music  | 1.3    |
    /// | youtube    | 0.9    |
    /// | telegram   | 1.0    |
    /// | whatsapp   | 1.1    |
    /// | twitter    | 0.8    |
    ///
    /// # Examples
    ///
    /// ```
    /// use kora_core::platform::Platform;
    /// assert_eq!(Platform::MtnMusic.trust_weight(), 1.3);
    /// assert_eq!(Platform::Twitter.trust_weight(), 0.8);
    /// ```
    pub fn trust_weight(&self) -> f64 {
        match self {
            Self::Boomplay => 1.2,
            Self::Audiomack => 1.1,
            Self::MtnMusic => 1.3, // telco verification
            Self::Youtube => 0.9,
            Self::Telegram => 1.0,
            Self::Whatsapp => 1.1,
            Self::Twitter => 0.8, // bot-heavy
        }
    }

    /// Canonical lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boomplay => "boomplay",
            Self::Audiomack => "audiomack",
            Self::MtnMusic => "mtn_music",
            Self::Youtube => "youtube",
            Self::Telegram => "telegram",
            Self::Whatsapp => "whatsapp",
            Self::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_platform() {
        assert_eq!(Platform::ALL.len(), Platform::COUNT);
        for (i, a) in Platform::ALL.iter().enumerate() {
            for b in &Platform::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn trust_weights_match_table() {
        let expected: &[(Platform, f64)] = &[
            (Platform::Boomplay, 1.2),
            (Platform::Audiomack, 1.1),
            (Platform::MtnMusic, 1.3),
            (Platform::Youtube, 0.9),
            (Platform::Telegram, 1.0),
            (Platform::Whatsapp, 1.1),
            (Platform::Twitter, 0.8),
        ];
        for &(platform, weight) in expected {
            assert_eq!(platform.trust_weight(), weight, "{platform}");
        }
    }

    #[test]
    fn trust_weights_are_positive() {
        for platform in Platform::ALL {
            assert!(platform.trust_weight() > 0.0);
        }
    }

    #[test]
    fn serde_uses_snake_case_names() {
        assert_eq!(
            serde_json::to_string(&Platform::MtnMusic).unwrap(),
            "\"mtn_music\""
        );
        let parsed: Platform = serde_json::from_str("\"boomplay\"").unwrap();
        assert_eq!(parsed, Platform::Boomplay);
    }

    #[test]
    fn display_matches_serialized_form() {
        for platform in Platform::ALL {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{platform}\""));
        }
    }

    #[test]
    fn unknown_platform_name_is_rejected() {
        let result: Result<Platform, _> = serde_json::from_str("\"myspace\"");
        assert!(result.is_err());
    }
}
