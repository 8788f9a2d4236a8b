//! Deduction rule set.
//!
//! The player collects clue tokens; the creature's nature is revealed while
//! the collected set contains at least one revealing pair.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the six clue tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClueToken {
    /// No image in the mirror.
    ReversedReflection,
    /// Casts no shadow.
    NoShadow,
    /// Recoils from salt.
    SaltReaction,
    /// Avoids garlic.
    GarlicAversion,
    /// An unnaturally long tongue.
    ExtendedTongue,
    /// Bat-like wings.
    LeatheryWings,
}

impl ClueToken {
    /// The full token universe.
    pub const ALL: [ClueToken; 6] = [
        ClueToken::ReversedReflection,
        ClueToken::NoShadow,
        ClueToken::SaltReaction,
        ClueToken::GarlicAversion,
        ClueToken::ExtendedTongue,
        ClueToken::LeatheryWings,
    ];

    /// Stable token id.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ClueToken::ReversedReflection => "reversed-reflection",
            ClueToken::NoShadow => "no-shadow",
            ClueToken::SaltReaction => "salt-reaction",
            ClueToken::GarlicAversion => "garlic-aversion",
            ClueToken::ExtendedTongue => "extended-tongue",
            ClueToken::LeatheryWings => "leathery-wings",
        }
    }
}

impl fmt::Display for ClueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token id outside the universe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown clue token: {0}")]
pub struct UnknownClueToken(pub String);

impl FromStr for ClueToken {
    type Err = UnknownClueToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ClueToken::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| UnknownClueToken(s.to_owned()))
    }
}

/// Token pairs that each reveal the creature.
pub const REVEALING_PAIRS: [(ClueToken, ClueToken); 3] = [
    (ClueToken::ReversedReflection, ClueToken::NoShadow),
    (ClueToken::SaltReaction, ClueToken::GarlicAversion),
    (ClueToken::ExtendedTongue, ClueToken::LeatheryWings),
];

/// Tokens collected in the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionState {
    /// Collected tokens.
    pub tokens_collected: BTreeSet<ClueToken>,
}

impl DeductionState {
    /// Returns `true` if `token` is collected.
    #[must_use]
    pub fn has(&self, token: ClueToken) -> bool {
        self.tokens_collected.contains(&token)
    }
}

/// Adds `token` if absent, removes it if present.
#[must_use]
pub fn toggle_token(state: &DeductionState, token: ClueToken) -> DeductionState {
    let mut next = state.clone();
    if !next.tokens_collected.remove(&token) {
        next.tokens_collected.insert(token);
    }
    next
}

/// The first revealing pair fully contained in the collected set.
#[must_use]
pub fn revealing_pair(state: &DeductionState) -> Option<(ClueToken, ClueToken)> {
    REVEALING_PAIRS
        .into_iter()
        .find(|(a, b)| state.has(*a) && state.has(*b))
}

/// Whether the collected set reveals the creature. Recomputed on every call.
#[must_use]
pub fn is_revealed(state: &DeductionState) -> bool {
    revealing_pair(state).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_of(tokens: &[ClueToken]) -> DeductionState {
        DeductionState {
            tokens_collected: tokens.iter().copied().collect(),
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let empty = DeductionState::default();

        let once = toggle_token(&empty, ClueToken::NoShadow);
        assert!(once.has(ClueToken::NoShadow));

        let twice = toggle_token(&once, ClueToken::NoShadow);
        assert_eq!(twice, empty);
    }

    #[test]
    fn test_double_toggle_restores_any_state() {
        let starts = [
            state_of(&[]),
            state_of(&[ClueToken::SaltReaction]),
            state_of(&[ClueToken::ExtendedTongue, ClueToken::LeatheryWings]),
            state_of(&ClueToken::ALL),
        ];
        for start in &starts {
            for token in ClueToken::ALL {
                let round = toggle_token(&toggle_token(start, token), token);
                assert_eq!(&round, start, "token {token}");
            }
        }
    }

    #[test]
    fn test_each_pair_reveals() {
        for (a, b) in REVEALING_PAIRS {
            assert!(is_revealed(&state_of(&[a, b])));
            assert!(!is_revealed(&state_of(&[a])));
        }
    }

    #[test]
    fn test_mixed_tokens_without_full_pair_do_not_reveal() {
        let state = state_of(&[
            ClueToken::ReversedReflection,
            ClueToken::SaltReaction,
            ClueToken::ExtendedTongue,
        ]);
        assert!(!is_revealed(&state));
    }

    #[test]
    fn test_reveal_is_not_sticky() {
        let revealed = state_of(&[ClueToken::SaltReaction, ClueToken::GarlicAversion]);
        assert!(is_revealed(&revealed));

        let reverted = toggle_token(&revealed, ClueToken::GarlicAversion);
        assert!(!is_revealed(&reverted));
    }

    #[test]
    fn test_superset_reveals_and_reports_pair() {
        let state = state_of(&[
            ClueToken::NoShadow,
            ClueToken::LeatheryWings,
            ClueToken::ExtendedTongue,
        ]);
        assert_eq!(
            revealing_pair(&state),
            Some((ClueToken::ExtendedTongue, ClueToken::LeatheryWings))
        );
    }

    #[test]
    fn test_token_ids_parse() {
        for token in ClueToken::ALL {
            assert_eq!(token.as_str().parse::<ClueToken>(), Ok(token));
        }
        assert_eq!(
            "silver-burn".parse::<ClueToken>(),
            Err(UnknownClueToken("silver-burn".to_owned()))
        );
    }

    #[test]
    fn test_token_serializes_as_kebab_case_id() {
        let json = serde_json::to_value(ClueToken::ReversedReflection).unwrap();
        assert_eq!(json, serde_json::json!("reversed-reflection"));
    }
}
