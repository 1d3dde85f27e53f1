//! Routine evaluation: decides which tasks fire for a trigger event.
//!
//! Evaluation is synchronous and single-threaded; each event is matched and
//! applied to completion before the next is considered. The evaluator is the
//! sole owner of the per-task geofence edge-detection state, keyed by task
//! id and explicitly evicted when a task is deleted or its trigger edited.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::events::TriggerEvent;
use crate::routines::trigger::{TransitionKind, Trigger};
use crate::routines::{Action, Routine};
use crate::store::EntityStore;

/// One fired task, with enough context to report and apply it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Firing {
    pub routine_id: String,
    pub routine_name: String,
    pub task_id: String,
    pub task_name: String,
    pub action: Action,
}

/// Matches trigger events against every task of every routine.
#[derive(Debug, Default)]
pub struct RoutineEvaluator {
    /// Last known inside/outside per geofence task id. Absent until the
    /// first position sample after the task appears.
    inside: HashMap<String, bool>,
}

impl RoutineEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all per-task state (e.g. when the location provider restarts).
    pub fn reset(&mut self) {
        self.inside.clear();
    }

    /// Forget the edge-detection state of a single task.
    pub fn evict_task(&mut self, task_id: &str) {
        self.inside.remove(task_id);
    }

    /// Forget the state of every task in a deleted routine.
    pub fn evict_tasks_of(&mut self, routine: &Routine) {
        for task in &routine.tasks {
            self.inside.remove(&task.id);
        }
    }

    /// After a routine save, forget the state of tasks that were removed and
    /// of tasks whose trigger was edited. Tasks that kept id and trigger
    /// keep their edge-detection state.
    pub fn evict_changed_tasks(&mut self, previous: &Routine, current: &Routine) {
        for old in &previous.tasks {
            match current.tasks.iter().find(|t| t.id == old.id) {
                Some(new) if new.trigger == old.trigger => {}
                _ => {
                    self.inside.remove(&old.id);
                }
            }
        }
    }

    /// Determine which tasks fire for this event, in routine-then-task
    /// iteration order. No coalescing: two firings may target the same todo
    /// and are applied in order (last write wins). A task whose trigger kind
    /// disagrees with the event kind never fires.
    pub fn evaluate(&mut self, store: &EntityStore, event: &TriggerEvent) -> Vec<Firing> {
        let mut fired = Vec::new();

        for routine in store.list_routines() {
            for task in &routine.tasks {
                let fires = match (&task.trigger, event) {
                    (Trigger::Time { at }, TriggerEvent::Tick { hhmm, .. }) => {
                        // Exact string match at minute granularity; repeat
                        // suppression within a minute is the scheduler's job.
                        at == hhmm
                    }
                    (
                        Trigger::Geofence(fence),
                        TriggerEvent::Position {
                            latitude,
                            longitude,
                            ..
                        },
                    ) => {
                        let inside_now = fence.contains(*latitude, *longitude);
                        let was_inside = self.inside.insert(task.id.clone(), inside_now);
                        match (fence.trigger_on, was_inside) {
                            // A first-ever sample only records state.
                            (_, None) => false,
                            (TransitionKind::Enter, Some(was)) => !was && inside_now,
                            (TransitionKind::Leave, Some(was)) => was && !inside_now,
                        }
                    }
                    _ => false,
                };

                if fires {
                    fired.push(Firing {
                        routine_id: routine.id.clone(),
                        routine_name: routine.name.clone(),
                        task_id: task.id.clone(),
                        task_name: task.name.clone(),
                        action: task.action.clone(),
                    });
                }
            }
        }

        fired
    }
}
