//! Task rule model: a trigger + action pair and its validating builder.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::routines::trigger::{validate_hhmm, Geofence, Trigger};
use crate::routines::Action;

/// A validated task. The trigger sum type guarantees that exactly one of
/// activation time / geofence is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub trigger: Trigger,
    pub action: Action,
}

/// Trigger kind selected on the edit surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Time,
    Geofence,
}

/// Unvalidated task input, shaped like the edit form: a trigger-type tag
/// plus one optional field per trigger kind. [`TaskDraft::build`] turns it
/// into a [`Task`] or reports the first violated constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDraft {
    /// Present when editing an existing task; new tasks get a fresh id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub trigger_type: TriggerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_time: Option<String>,
    /// Id of the todo the action targets.
    pub todo_item_id: String,
    /// Replacement text applied when the task fires.
    pub new_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geofence: Option<Geofence>,
}

impl TaskDraft {
    /// Validate and build. Constraints are checked in order and the first
    /// violation wins; aggregating every violation is a form-layer concern.
    pub fn build(&self) -> Result<Task, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "task name must not be empty"));
        }

        let trigger = match self.trigger_type {
            TriggerType::Time => {
                if self.geofence.is_some() {
                    return Err(ValidationError::new(
                        "geofence",
                        "a time task must not carry a geofence",
                    ));
                }
                let at = self.activation_time.as_deref().ok_or_else(|| {
                    ValidationError::new("activation_time", "a time task needs an activation time")
                })?;
                validate_hhmm(at)?;
                Trigger::Time { at: at.to_string() }
            }
            TriggerType::Geofence => {
                if self.activation_time.is_some() {
                    return Err(ValidationError::new(
                        "activation_time",
                        "a geofence task must not carry an activation time",
                    ));
                }
                let fence = self.geofence.clone().ok_or_else(|| {
                    ValidationError::new("geofence", "a geofence task needs a geofence")
                })?;
                fence.validate()?;
                Trigger::Geofence(fence)
            }
        };

        if self.todo_item_id.is_empty() {
            return Err(ValidationError::new(
                "todo_item_id",
                "the action must reference a todo item",
            ));
        }
        if self.new_text.trim().is_empty() {
            return Err(ValidationError::new(
                "new_text",
                "the action's replacement text must not be empty",
            ));
        }

        Ok(Task {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name.trim().to_string(),
            trigger,
            action: Action::UpdateTodo {
                todo_item_id: self.todo_item_id.clone(),
                new_text: self.new_text.clone(),
            },
        })
    }
}

impl Task {
    /// Draft form of this task, for re-editing.
    pub fn to_draft(&self) -> TaskDraft {
        let (trigger_type, activation_time, geofence) = match &self.trigger {
            Trigger::Time { at } => (TriggerType::Time, Some(at.clone()), None),
            Trigger::Geofence(fence) => (TriggerType::Geofence, None, Some(fence.clone())),
        };
        let Action::UpdateTodo {
            todo_item_id,
            new_text,
        } = &self.action;
        TaskDraft {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            trigger_type,
            activation_time,
            geofence,
            todo_item_id: todo_item_id.clone(),
            new_text: new_text.clone(),
        }
    }
}
