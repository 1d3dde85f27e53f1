//! Core error types for routinely-core.
//!
//! One thiserror enum per concern, aggregated into [`CoreError`] so callers
//! that don't care about the distinction can use a single error type.

use thiserror::Error;

/// A single violated constraint while building a task or routine.
///
/// Field-level validation stops at the first violated constraint; collecting
/// every violation for display is a UI concern, not a rule-model one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value for '{field}': {reason}")]
pub struct ValidationError {
    /// Name of the offending input field (e.g. "activation_time").
    pub field: String,
    /// Human-readable explanation of the violation.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from whole-routine save/delete operations.
#[derive(Error, Debug)]
pub enum RoutineError {
    /// `existing_id` was given but no such routine is stored.
    #[error("routine '{0}' not found")]
    NotFound(String),

    /// The routine name or one of its draft tasks failed validation.
    /// Nothing was written to the store.
    #[error("invalid routine: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors from deleting a todo item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeleteTodoError {
    /// The referential guard refused the delete: at least one routine task's
    /// action still targets this todo.
    #[error("todo '{todo_id}' is in use by task '{task_name}'")]
    Blocked { todo_id: String, task_name: String },

    /// No todo with this id exists.
    #[error("todo '{0}' not found")]
    NotFound(String),
}

/// Errors from applying a fired task action to the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// The action's target todo is gone. The delete guard is the sole
    /// prevention mechanism, so this is a defensive branch: the action is
    /// skipped and reported, never a panic.
    #[error("todo '{0}' referenced by action no longer exists")]
    TodoNotFound(String),
}

/// Errors from the AI refinement call. One attempt per user-initiated call,
/// no retry; a failure leaves every entity unchanged.
#[derive(Error, Debug)]
pub enum RefineError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("refinement request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("refinement API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// The endpoint answered 2xx but the body did not match the contract.
    #[error("malformed refinement response: {0}")]
    MalformedResponse(String),
}

/// Configuration load/save errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read/write config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to locate config directory")]
    NoConfigDir,
}

/// Core error type aggregating every concern.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("routine error: {0}")]
    Routine(#[from] RoutineError),

    #[error("delete refused: {0}")]
    DeleteTodo(#[from] DeleteTodoError),

    #[error("apply error: {0}")]
    Apply(#[from] ApplyError),

    #[error("refinement error: {0}")]
    Refine(#[from] RefineError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
