//! Routines and their whole-value edit lifecycle.
//!
//! The edit surface works on a draft (name + full task list) and hands the
//! finished draft to [`save_routine`]; cancelling an edit simply drops the
//! draft. The store never sees a partial task list.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RoutineError, ValidationError};
use crate::routines::evaluator::RoutineEvaluator;
use crate::routines::task::{Task, TaskDraft};
use crate::store::EntityStore;

/// A named, user-defined group of tasks. Tasks are exclusively owned; their
/// order is insertion order and has no effect on evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Routine {
    pub id: String,
    pub name: String,
    pub tasks: Vec<Task>,
}

/// The edit-transaction value: everything a save needs, nothing stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutineDraft {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<TaskDraft>,
}

impl RoutineDraft {
    /// Validate the draft without touching any store. All-or-nothing: the
    /// first invalid task aborts the whole build.
    fn build_tasks(&self) -> Result<Vec<Task>, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new(
                "name",
                "routine name must not be empty",
            ));
        }
        self.tasks.iter().map(TaskDraft::build).collect()
    }
}

/// Save a routine as a single atomic operation.
///
/// With `existing_id`, the stored routine's name and task list are replaced
/// together, keeping its display position; id-less draft tasks get fresh ids,
/// tasks that kept their id keep it, and dropped tasks disappear. Without
/// `existing_id`, a new routine is created and prepended (newest first).
///
/// On any validation error nothing is written and no evaluator state moves.
pub fn save_routine(
    store: &mut EntityStore,
    evaluator: &mut RoutineEvaluator,
    existing_id: Option<&str>,
    draft: &RoutineDraft,
) -> Result<Routine, RoutineError> {
    let tasks = draft.build_tasks()?;

    let routine = match existing_id {
        Some(id) => {
            let previous = store
                .routine(id)
                .ok_or_else(|| RoutineError::NotFound(id.to_string()))?
                .clone();

            let routine = Routine {
                id: id.to_string(),
                name: draft.name.trim().to_string(),
                tasks,
            };
            store.update_routine(routine.clone());
            evaluator.evict_changed_tasks(&previous, &routine);
            routine
        }
        None => {
            let routine = Routine {
                id: Uuid::new_v4().to_string(),
                name: draft.name.trim().to_string(),
                tasks,
            };
            store.insert_routine(routine.clone());
            routine
        }
    };

    Ok(routine)
}

/// Delete a routine and all its tasks unconditionally. Tasks only reference
/// todos, never the reverse, so no referential guard applies. Per-task
/// evaluator state is evicted. Returns false if the id is unknown.
pub fn delete_routine(store: &mut EntityStore, evaluator: &mut RoutineEvaluator, id: &str) -> bool {
    match store.remove_routine(id) {
        Some(routine) => {
            evaluator.evict_tasks_of(&routine);
            true
        }
        None => false,
    }
}

impl Routine {
    /// Draft form of this routine, for re-editing.
    pub fn to_draft(&self) -> RoutineDraft {
        RoutineDraft {
            name: self.name.clone(),
            tasks: self.tasks.iter().map(Task::to_draft).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::task::TriggerType;

    fn draft_with_tasks(name: &str, tasks: Vec<TaskDraft>) -> RoutineDraft {
        RoutineDraft {
            name: name.to_string(),
            tasks,
        }
    }

    fn time_task(name: &str, at: &str) -> TaskDraft {
        TaskDraft {
            id: None,
            name: name.to_string(),
            trigger_type: TriggerType::Time,
            activation_time: Some(at.to_string()),
            geofence: None,
            todo_item_id: "todo-1".to_string(),
            new_text: "Finalize project proposal draft".to_string(),
        }
    }

    #[test]
    fn new_routines_are_prepended() {
        let mut store = EntityStore::new();
        let mut evaluator = RoutineEvaluator::new();

        let first = save_routine(
            &mut store,
            &mut evaluator,
            None,
            &draft_with_tasks("Morning Kickstart", vec![time_task("Plan Day", "08:00")]),
        )
        .unwrap();
        let second = save_routine(
            &mut store,
            &mut evaluator,
            None,
            &draft_with_tasks("Evening Wrap", vec![]),
        )
        .unwrap();

        let ids: Vec<&str> = store.list_routines().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[test]
    fn save_assigns_ids_only_to_new_tasks() {
        let mut store = EntityStore::new();
        let mut evaluator = RoutineEvaluator::new();

        let routine = save_routine(
            &mut store,
            &mut evaluator,
            None,
            &draft_with_tasks("Morning Kickstart", vec![time_task("Plan Day", "08:00")]),
        )
        .unwrap();
        let kept_id = routine.tasks[0].id.clone();

        let mut draft = routine.to_draft();
        draft.tasks.push(time_task("Stretch", "08:30"));
        let saved = save_routine(&mut store, &mut evaluator, Some(&routine.id), &draft).unwrap();

        assert_eq!(saved.tasks[0].id, kept_id);
        assert_ne!(saved.tasks[1].id, kept_id);
        assert_eq!(store.routine_count(), 1);
    }

    #[test]
    fn failed_validation_changes_nothing() {
        let mut store = EntityStore::new();
        let mut evaluator = RoutineEvaluator::new();

        let routine = save_routine(
            &mut store,
            &mut evaluator,
            None,
            &draft_with_tasks("Morning Kickstart", vec![time_task("Plan Day", "08:00")]),
        )
        .unwrap();

        // Second task is invalid: name and tasks must both stay untouched.
        let mut bad = draft_with_tasks(
            "Renamed",
            vec![time_task("ok", "09:00"), time_task("bad", "99:99")],
        );
        bad.tasks[1].activation_time = Some("99:99".to_string());
        let err = save_routine(&mut store, &mut evaluator, Some(&routine.id), &bad);
        assert!(matches!(err, Err(RoutineError::Validation(_))));

        let stored = store.routine(&routine.id).unwrap();
        assert_eq!(stored.name, "Morning Kickstart");
        assert_eq!(stored.tasks.len(), 1);
    }

    #[test]
    fn save_with_unknown_id_is_not_found() {
        let mut store = EntityStore::new();
        let mut evaluator = RoutineEvaluator::new();
        let err = save_routine(
            &mut store,
            &mut evaluator,
            Some("missing"),
            &draft_with_tasks("Nope", vec![]),
        );
        assert!(matches!(err, Err(RoutineError::NotFound(_))));
        assert_eq!(store.routine_count(), 0);
    }

    #[test]
    fn delete_removes_routine_and_tasks() {
        let mut store = EntityStore::new();
        let mut evaluator = RoutineEvaluator::new();
        let routine = save_routine(
            &mut store,
            &mut evaluator,
            None,
            &draft_with_tasks("Morning Kickstart", vec![time_task("Plan Day", "08:00")]),
        )
        .unwrap();

        assert!(delete_routine(&mut store, &mut evaluator, &routine.id));
        assert_eq!(store.routine_count(), 0);
        assert!(!delete_routine(&mut store, &mut evaluator, &routine.id));
    }
}
