//! Mutation application and the referential guard.
//!
//! The guard on [`delete_todo`] is the only thing keeping task actions from
//! dangling, so [`apply_action`] treats a missing target as a defensive
//! branch: the action is skipped and reported, never applied partially.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApplyError, DeleteTodoError};
use crate::routines::{Action, Firing};
use crate::store::EntityStore;
use crate::todo::TodoItem;

/// Delete a todo, refusing while any routine task's action references it.
/// On refusal the store is left unchanged; the blocking task is named so the
/// caller can tell the user what to unhook first.
pub fn delete_todo(store: &mut EntityStore, id: &str) -> Result<TodoItem, DeleteTodoError> {
    if store.todo(id).is_none() {
        return Err(DeleteTodoError::NotFound(id.to_string()));
    }

    let in_use = store
        .list_routines()
        .flat_map(|routine| routine.tasks.iter())
        .find(|task| task.action.todo_item_id() == id);

    if let Some(task) = in_use {
        return Err(DeleteTodoError::Blocked {
            todo_id: id.to_string(),
            task_name: task.name.clone(),
        });
    }

    // Existence was checked above.
    Ok(store.remove_todo(id).unwrap())
}

/// Apply a single fired action: replace the target todo's text, leaving its
/// completion state alone. Returns the updated todo.
pub fn apply_action(store: &mut EntityStore, action: &Action) -> Result<TodoItem, ApplyError> {
    let Action::UpdateTodo {
        todo_item_id,
        new_text,
    } = action;

    let todo = store
        .todo_mut(todo_item_id)
        .ok_or_else(|| ApplyError::TodoNotFound(todo_item_id.clone()))?;
    todo.text = new_text.clone();
    Ok(todo.clone())
}

/// Outcome of applying one firing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApplyStatus {
    /// The todo's text was replaced.
    Applied,
    /// The target todo was gone; the action was skipped.
    SkippedMissingTodo { todo_item_id: String },
}

/// One entry of an [`ApplyReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub routine_name: String,
    pub task_name: String,
    pub action_type: String,
    pub status: ApplyStatus,
}

/// Report of one evaluation batch's mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyReport {
    pub applied_at: DateTime<Utc>,
    pub outcomes: Vec<ApplyOutcome>,
}

impl ApplyReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == ApplyStatus::Applied)
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.applied_count()
    }
}

/// Apply a batch of firings in order. Later writes to the same todo win.
/// A missing target skips that firing and the rest still apply.
pub fn apply_all(store: &mut EntityStore, firings: &[Firing]) -> ApplyReport {
    let mut outcomes = Vec::with_capacity(firings.len());

    for firing in firings {
        let status = match apply_action(store, &firing.action) {
            Ok(_) => ApplyStatus::Applied,
            Err(ApplyError::TodoNotFound(id)) => ApplyStatus::SkippedMissingTodo {
                todo_item_id: id,
            },
        };
        outcomes.push(ApplyOutcome {
            routine_name: firing.routine_name.clone(),
            task_name: firing.task_name.clone(),
            action_type: firing.action.type_name().to_string(),
            status,
        });
    }

    ApplyReport {
        applied_at: Utc::now(),
        outcomes,
    }
}
