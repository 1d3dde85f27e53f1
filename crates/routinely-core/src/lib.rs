//! # Routinely Core Library
//!
//! Core business logic for Routinely, a todo list paired with "routines":
//! named groups of conditional tasks that, when their time-of-day or
//! geofence trigger fires, rewrite a todo item's text.
//!
//! ## Architecture
//!
//! - **Entity Store**: in-memory, display-ordered todo and routine
//!   collections; a dumb container with no validation
//! - **Rule Model**: validated trigger + action task values built from
//!   form-shaped drafts
//! - **Evaluator**: matches clock ticks and position samples against every
//!   task, owning the per-task geofence edge-detection state
//! - **Applier**: commits fired actions under the referential guard
//! - **Refine**: one-shot HTTP client for AI-assisted todo text refinement
//!
//! Evaluation is synchronous: each trigger event is matched, applied, and
//! committed before the next is considered.

pub mod config;
pub mod error;
pub mod events;
pub mod refine;
pub mod routines;
pub mod simulation;
pub mod store;
pub mod todo;

pub use config::{Config, RefineConfig};
pub use error::{
    ApplyError, ConfigError, CoreError, DeleteTodoError, RefineError, RoutineError,
    ValidationError,
};
pub use events::TriggerEvent;
pub use refine::{HttpRefiner, Refinement, Refiner};
pub use routines::{
    Action, ApplyReport, Firing, Geofence, Routine, RoutineDraft, RoutineEvaluator, Task,
    TaskDraft, TransitionKind, Trigger, TriggerType,
};
pub use simulation::{Scenario, SimulationReport};
pub use store::EntityStore;
pub use todo::TodoItem;
