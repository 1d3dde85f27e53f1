//! Routine draft validation CLI command.
//!
//! Reads a TOML file with `[[routines]]` drafts (a full scenario file works
//! too) and reports the first violated constraint per task. Exits non-zero
//! if anything is invalid.

use std::path::Path;

use routinely_core::simulation::Scenario;

pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let scenario = Scenario::from_toml(&content)?;

    if scenario.routines.is_empty() {
        println!("No routines found.");
        return Ok(());
    }

    let mut violations = 0usize;
    for draft in &scenario.routines {
        if draft.name.trim().is_empty() {
            println!("routine <unnamed>: name must not be empty");
            violations += 1;
            continue;
        }
        println!("routine {}:", draft.name);
        for task in &draft.tasks {
            match task.build() {
                Ok(built) => println!("  task {}: ok ({})", built.name, built.trigger.type_name()),
                Err(e) => {
                    println!("  task {}: {e}", task.name);
                    violations += 1;
                }
            }
        }
    }

    if violations > 0 {
        return Err(format!("{violations} invalid entr{}", plural(violations)).into());
    }
    println!("All routines valid.");
    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "y"
    } else {
        "ies"
    }
}
