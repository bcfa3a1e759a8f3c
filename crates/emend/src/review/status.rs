//! Review status of a suggestion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a suggestion stands in review. Any status may move to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    /// Not yet reviewed.
    #[default]
    Pending,
    /// Replacement is applied when rendering.
    Accepted,
    /// Original text is kept.
    Rejected,
}

impl SuggestionStatus {
    pub const ALL: [SuggestionStatus; 3] = [
        SuggestionStatus::Pending,
        SuggestionStatus::Accepted,
        SuggestionStatus::Rejected,
    ];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "Pending",
            SuggestionStatus::Accepted => "Accepted",
            SuggestionStatus::Rejected => "Rejected",
        }
    }

    /// Check if this is a decision (not pending).
    pub fn is_decided(&self) -> bool {
        !matches!(self, SuggestionStatus::Pending)
    }

    /// Whether the renderer emits the replacement.
    pub fn applies_replacement(&self) -> bool {
        matches!(self, SuggestionStatus::Accepted)
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionStatus::Pending => write!(f, "pending"),
            SuggestionStatus::Accepted => write!(f, "accepted"),
            SuggestionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for SuggestionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(SuggestionStatus::Pending),
            "accepted" | "accept" => Ok(SuggestionStatus::Accepted),
            "rejected" | "reject" => Ok(SuggestionStatus::Rejected),
            _ => Err(format!(
                "Unknown status: {}. Use pending, accepted, or rejected.",
                s
            )),
        }
    }
}
