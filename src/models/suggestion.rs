use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Schedule,
    Optimize,
    Conflict,
    Reminder,
}

// Sorted pair of event ids. Conflict suggestions carry one so re-running the
// analyzer never reports the same pair twice, regardless of what the titles
// look like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictKey(String, String);

impl ConflictKey {
    pub fn new(event_a: &str, event_b: &str) -> Self {
        if event_a <= event_b {
            Self(event_a.to_string(), event_b.to_string())
        } else {
            Self(event_b.to_string(), event_a.to_string())
        }
    }

    pub fn involves(&self, event_id: &str) -> bool {
        self.0 == event_id || self.1 == event_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AISuggestion {
    pub id: String,
    pub suggestion_type: SuggestionType,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub conflict_key: Option<ConflictKey>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionDraft {
    pub suggestion_type: SuggestionType,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub conflict_key: Option<ConflictKey>,
}

impl SuggestionDraft {
    pub fn new(
        suggestion_type: SuggestionType,
        title: &str,
        description: &str,
        priority: Priority,
    ) -> Self {
        Self {
            suggestion_type,
            title: title.to_string(),
            description: description.to_string(),
            priority,
            conflict_key: None,
        }
    }

    pub fn with_conflict_key(mut self, key: ConflictKey) -> Self {
        self.conflict_key = Some(key);
        self
    }
}
