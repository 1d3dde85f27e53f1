//! Deterministic scenario replay.
//!
//! A scenario file declares todos, routine drafts, and a sequence of trigger
//! events. Running it builds a fresh store, replays the events through an
//! evaluator, applies every firing, and reports what happened. This powers
//! the CLI `simulate` command and the end-to-end tests.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::events::TriggerEvent;
use crate::routines::evaluator::{Firing, RoutineEvaluator};
use crate::routines::routine::save_routine;
use crate::routines::{apply_all, ApplyReport, RoutineDraft};
use crate::store::EntityStore;
use crate::todo::TodoItem;

/// A todo as declared in a scenario file. Ids are optional; explicit ids let
/// task actions reference the todo from the same file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Everything a simulation run needs, TOML-deserializable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default)]
    pub todos: Vec<ScenarioTodo>,
    #[serde(default)]
    pub routines: Vec<RoutineDraft>,
    #[serde(default)]
    pub events: Vec<TriggerEvent>,
}

/// One event's worth of evaluation and application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationStep {
    pub event: TriggerEvent,
    pub firings: Vec<Firing>,
    pub report: ApplyReport,
}

/// Full result of a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub steps: Vec<SimulationStep>,
    pub final_todos: Vec<TodoItem>,
}

impl SimulationReport {
    pub fn total_fired(&self) -> usize {
        self.steps.iter().map(|s| s.firings.len()).sum()
    }
}

impl Scenario {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Build the store and replay every event in order. Each event is
    /// matched and applied to completion before the next is considered.
    pub fn run(&self) -> Result<SimulationReport, CoreError> {
        let mut store = EntityStore::new();
        let mut evaluator = RoutineEvaluator::new();

        // The store prepends; insert in reverse so the file's order is the
        // display order.
        for declared in self.todos.iter().rev() {
            let todo = match &declared.id {
                Some(id) => TodoItem::with_id(id, &declared.text, declared.completed),
                None => TodoItem::new(&declared.text)?,
            };
            store.insert_todo(todo);
        }
        for draft in self.routines.iter().rev() {
            save_routine(&mut store, &mut evaluator, None, draft)?;
        }

        let mut steps = Vec::with_capacity(self.events.len());
        for event in &self.events {
            let firings = evaluator.evaluate(&store, event);
            let report = apply_all(&mut store, &firings);
            steps.push(SimulationStep {
                event: event.clone(),
                firings,
                report,
            });
        }

        Ok(SimulationReport {
            steps,
            final_todos: store.list_todos().cloned().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
[[todos]]
id = "todo-1"
text = "Draft project proposal"

[[todos]]
id = "todo-3"
text = "Review PR #123"

[[routines]]
name = "Morning Kickstart"

[[routines.tasks]]
name = "Plan Day"
trigger_type = "time"
activation_time = "08:00"
todo_item_id = "todo-1"
new_text = "Finalize project proposal draft"

[[routines]]
name = "Gym Arrival Focus"

[[routines.tasks]]
name = "Log Workout"
trigger_type = "geofence"
todo_item_id = "todo-3"
new_text = "Start workout log for today"

[routines.tasks.geofence]
latitude = 34.0522
longitude = -118.2437
radius_m = 50.0
trigger_on = "enter"

[[events]]
type = "Tick"
hhmm = "07:59"

[[events]]
type = "Tick"
hhmm = "08:00"

[[events]]
type = "Position"
latitude = 34.0531
longitude = -118.2437

[[events]]
type = "Position"
latitude = 34.05221
longitude = -118.2437
"#;

    #[test]
    fn scenario_parses_and_replays() {
        let scenario = Scenario::from_toml(SCENARIO).unwrap();
        let report = scenario.run().unwrap();

        assert_eq!(report.steps.len(), 4);
        assert!(report.steps[0].firings.is_empty());
        assert_eq!(report.steps[1].firings.len(), 1);
        assert_eq!(report.steps[1].firings[0].task_name, "Plan Day");
        // First position sample records state only; the second enters.
        assert!(report.steps[2].firings.is_empty());
        assert_eq!(report.steps[3].firings[0].task_name, "Log Workout");

        let texts: Vec<&str> = report.final_todos.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Finalize project proposal draft",
                "Start workout log for today"
            ]
        );
        assert_eq!(report.total_fired(), 2);
    }

    #[test]
    fn scenario_roundtrips_through_toml() {
        let scenario = Scenario::from_toml(SCENARIO).unwrap();
        let serialized = toml::to_string(&scenario).unwrap();
        let reparsed = Scenario::from_toml(&serialized).unwrap();
        assert_eq!(reparsed.routines, scenario.routines);
        assert_eq!(reparsed.todos, scenario.todos);
    }

    #[test]
    fn invalid_scenario_task_aborts_the_run() {
        let mut scenario = Scenario::from_toml(SCENARIO).unwrap();
        scenario.routines[0].tasks[0].activation_time = Some("25:61".to_string());
        assert!(scenario.run().is_err());
    }
}
