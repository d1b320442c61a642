use crate::output::{print_json, print_table};
use anyhow::Context;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tutorbook_core::{
    manager::BookingManager,
    scenario::{run_scenario, Scenario},
    subscribers::EventLogger,
};

pub fn run(path: &Path, json: bool) -> anyhow::Result<()> {
    let scenario = Scenario::load(path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;

    let mut manager = BookingManager::new();
    manager.subscribe(Rc::new(RefCell::new(EventLogger)));

    let report = run_scenario(&mut manager, &scenario)
        .with_context(|| format!("scenario '{}' failed", scenario.name))?;

    if json {
        return print_json(&report);
    }

    println!("Scenario: {}", report.scenario);
    for outcome in &report.outcomes {
        println!("  - {outcome}");
    }

    println!("\nHistory:");
    print_table(
        &["#", "action", "current"],
        report
            .history
            .iter()
            .map(|e| {
                vec![
                    (e.position + 1).to_string(),
                    e.description.clone(),
                    if e.current { "*".to_string() } else { String::new() },
                ]
            })
            .collect(),
    );

    println!(
        "\n{} step(s), {} no-op(s), {} active booking(s)",
        report.steps_run, report.noops, report.active_bookings
    );
    Ok(())
}
