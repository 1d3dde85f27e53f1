//! Todo items -- the entities routine tasks act upon.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A single todo list entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl TodoItem {
    /// Create a new incomplete todo with a fresh id.
    /// Rejects blank text; surrounding whitespace is trimmed.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::new("text", "todo text must not be empty"));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
        })
    }

    /// Construct with a caller-supplied id (scenario files, tests).
    pub fn with_id(id: &str, text: &str, completed: bool) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            completed,
        }
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Replace the text via a direct user edit. Blank text is rejected,
    /// completion state is untouched.
    pub fn set_text(&mut self, text: &str) -> Result<(), ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::new("text", "todo text must not be empty"));
        }
        self.text = text.to_string();
        Ok(())
    }
}
