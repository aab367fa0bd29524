//! Interaction journal domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The writing action a suggestion was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Rephrase,
    Correct,
    Summarize,
    Expand,
    Custom,
}

impl ActionKind {
    /// Stable label used for display and storage.
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Rephrase => "rephrase",
            ActionKind::Correct => "correct",
            ActionKind::Summarize => "summarize",
            ActionKind::Expand => "expand",
            ActionKind::Custom => "custom",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Simple size metrics for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub chars: usize,
    pub words: usize,
}

impl TextStats {
    /// Measures a text: character count and whitespace-separated word count.
    pub fn measure(text: &str) -> Self {
        Self {
            chars: text.chars().count(),
            words: text.split_whitespace().count(),
        }
    }
}

/// A recorded before/after pair for an accepted suggestion.
///
/// Created only when the user accepts a suggestion; never mutated afterward.
/// Destroyed individually, en masse, or by capacity eviction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique, time-ordered identifier assigned by the journal.
    pub id: String,
    pub text_before: String,
    pub text_after: String,
    pub action: ActionKind,
    /// Name of the persona the suggestion was generated with, if any.
    pub persona_label: Option<String>,
    pub stats_before: TextStats,
    pub stats_after: TextStats,
    /// Assigned by the journal at append time.
    pub timestamp: DateTime<Utc>,
}

/// The caller-supplied part of a journal entry; id and timestamp are
/// assigned by the journal on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalEntry {
    pub text_before: String,
    pub text_after: String,
    pub action: ActionKind,
    pub persona_label: Option<String>,
    pub stats_before: TextStats,
    pub stats_after: TextStats,
}

impl NewJournalEntry {
    /// Builds an entry for an accepted suggestion, measuring both texts.
    pub fn accepted(
        action: ActionKind,
        persona_label: Option<String>,
        text_before: impl Into<String>,
        text_after: impl Into<String>,
    ) -> Self {
        let text_before = text_before.into();
        let text_after = text_after.into();
        Self {
            stats_before: TextStats::measure(&text_before),
            stats_after: TextStats::measure(&text_after),
            text_before,
            text_after,
            action,
            persona_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_stats_measure() {
        let stats = TextStats::measure("Bonjour le monde");
        assert_eq!(stats.chars, 16);
        assert_eq!(stats.words, 3);
    }

    #[test]
    fn test_text_stats_empty() {
        let stats = TextStats::measure("");
        assert_eq!(stats.chars, 0);
        assert_eq!(stats.words, 0);
    }

    #[test]
    fn test_text_stats_counts_characters_not_bytes() {
        assert_eq!(TextStats::measure("été").chars, 3);
    }

    #[test]
    fn test_accepted_measures_both_sides() {
        let entry = NewJournalEntry::accepted(
            ActionKind::Rephrase,
            Some("Formel".to_string()),
            "salut",
            "bonjour monsieur",
        );
        assert_eq!(entry.stats_before.words, 1);
        assert_eq!(entry.stats_after.words, 2);
    }
}
