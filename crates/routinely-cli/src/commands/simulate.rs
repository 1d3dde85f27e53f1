//! Scenario replay CLI command.

use std::path::Path;

use routinely_core::simulation::{Scenario, SimulationReport};
use routinely_core::routines::ApplyStatus;
use routinely_core::TriggerEvent;

pub fn run(path: &Path, json: bool, tick_now: bool) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let mut scenario = Scenario::from_toml(&content)?;
    if tick_now {
        let hhmm = chrono::Local::now().format("%H:%M").to_string();
        scenario.events.push(TriggerEvent::tick(&hhmm));
    }
    let report = scenario.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &SimulationReport) {
    for (i, step) in report.steps.iter().enumerate() {
        println!("event {}: {}", i + 1, describe_event(&step.event));
        if step.firings.is_empty() {
            println!("  no tasks fired");
        }
        for (firing, outcome) in step.firings.iter().zip(&step.report.outcomes) {
            let status = match &outcome.status {
                ApplyStatus::Applied => "applied".to_string(),
                ApplyStatus::SkippedMissingTodo { todo_item_id } => {
                    format!("skipped (todo {todo_item_id} missing)")
                }
            };
            println!(
                "  fired: {} / {} -> {} [{}]",
                firing.routine_name,
                firing.task_name,
                firing.action.description(),
                status
            );
        }
    }

    println!();
    println!("final todos ({}):", report.final_todos.len());
    for todo in &report.final_todos {
        let mark = if todo.completed { "x" } else { " " };
        println!("  [{mark}] {}", todo.text);
    }
}

fn describe_event(event: &TriggerEvent) -> String {
    match event {
        TriggerEvent::Tick { hhmm, .. } => format!("clock tick {hhmm}"),
        TriggerEvent::Position {
            latitude,
            longitude,
            ..
        } => format!("position sample ({latitude:.5}, {longitude:.5})"),
    }
}
