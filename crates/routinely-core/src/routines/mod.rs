//! Routine rule engine: triggers, actions, tasks, lifecycle, evaluation.
//!
//! A routine is a named group of tasks; each task pairs a trigger (time of
//! day or geofence transition) with an action that rewrites a todo's text.

pub mod action;
pub mod apply;
pub mod evaluator;
pub mod routine;
pub mod task;
pub mod trigger;

pub use action::Action;
pub use apply::{apply_action, apply_all, delete_todo, ApplyOutcome, ApplyReport, ApplyStatus};
pub use evaluator::{Firing, RoutineEvaluator};
pub use routine::{delete_routine, save_routine, Routine, RoutineDraft};
pub use task::{Task, TaskDraft, TriggerType};
pub use trigger::{haversine_meters, Geofence, TransitionKind, Trigger};
