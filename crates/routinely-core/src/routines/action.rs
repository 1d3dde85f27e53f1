//! Action definitions for routine tasks.
//!
//! The only action kind today rewrites a todo item's text; the enum leaves
//! room for more.

use serde::{Deserialize, Serialize};

/// The effect of a fired task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Action {
    /// Replace the referenced todo's text with `new_text`.
    /// Completion state is untouched.
    #[serde(rename = "UpdateTodo")]
    UpdateTodo {
        todo_item_id: String,
        new_text: String,
    },
}

impl Action {
    /// Id of the todo this action targets.
    pub fn todo_item_id(&self) -> &str {
        match self {
            Action::UpdateTodo { todo_item_id, .. } => todo_item_id,
        }
    }

    /// Get a human-readable description of this action.
    pub fn description(&self) -> String {
        match self {
            Action::UpdateTodo {
                todo_item_id,
                new_text,
            } => format!("Set todo {todo_item_id} text to \"{new_text}\""),
        }
    }

    /// Get the type name of this action.
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::UpdateTodo { .. } => "UpdateTodo",
        }
    }
}
