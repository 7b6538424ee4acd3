//! Consent record model: the persisted decision and its classification.
//!
//! A page-load session is either *undecided* (no recognized value stored)
//! or *decided* (any other non-empty string stored). The stored strings
//! `"null"` and `"undefined"` count as undecided; earlier front-end builds
//! wrote them verbatim when serializing an empty slot.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed key the consent decision is persisted under.
pub const CONSENT_KEY: &str = "cookieConsent";

/// A recognized consent decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentDecision {
    Accepted,
    Declined,
}

impl ConsentDecision {
    pub fn all() -> &'static [ConsentDecision] {
        &[Self::Accepted, Self::Declined]
    }

    /// The exact string persisted to storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConsentDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Logical consent state of a page-load session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentState {
    /// No usable value stored; the banner should be shown.
    Undecided,
    /// A value is stored. Carries the raw string, which may fall outside
    /// the recognized decision set; any such value still suppresses the
    /// banner.
    Decided(String),
}

impl ConsentState {
    /// The stored decision, if it is one of the recognized values.
    pub fn decision(&self) -> Option<ConsentDecision> {
        match self {
            Self::Undecided => None,
            Self::Decided(raw) => ConsentDecision::from_name(raw),
        }
    }

    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Decided(_))
    }
}

/// Classify a raw stored value.
///
/// Absent, empty, or the literal strings `"null"`/`"undefined"` mean no
/// decision has been recorded. Everything else counts as decided.
pub fn classify(raw: Option<&str>) -> ConsentState {
    match raw {
        None | Some("") | Some("null") | Some("undefined") => {
            debug!("stored consent value {:?} classified as undecided", raw);
            ConsentState::Undecided
        }
        Some(value) => ConsentState::Decided(value.to_string()),
    }
}
