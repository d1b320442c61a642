use crate::error::Result;
use crate::lesson::{AddOn, LessonKind};
use crate::log::HistoryEntry;
use crate::manager::BookingManager;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Schedule {
        tutor: String,
        lesson: LessonKind,
        slot: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        add_ons: Vec<AddOn>,
    },
    Cancel {
        tutor: String,
        slot: String,
        #[serde(default)]
        reason: String,
    },
    Reschedule {
        tutor: String,
        lesson: LessonKind,
        from_slot: String,
        to_slot: String,
    },
    Undo,
    Redo,
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// A scripted booking session: a named list of steps replayed against a
/// fresh manager. Scenarios live in YAML files; nothing here persists the
/// resulting history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml(&data)
    }
}

// ---------------------------------------------------------------------------
// ScenarioReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub steps_run: usize,
    /// Undo/redo steps that had nothing to act on.
    pub noops: usize,
    pub outcomes: Vec<String>,
    pub history: Vec<HistoryEntry>,
    pub active_bookings: usize,
}

/// Replay a scenario against the given manager. Stops at the first failing
/// step and propagates its error; completed steps stay applied.
pub fn run_scenario(manager: &mut BookingManager, scenario: &Scenario) -> Result<ScenarioReport> {
    let mut outcomes = Vec::new();
    let mut noops = 0;

    for step in &scenario.steps {
        match step {
            Step::Schedule {
                tutor,
                lesson,
                slot,
                add_ons,
            } => {
                manager.schedule(tutor, *lesson, slot, add_ons.clone())?;
                outcomes.push(format!("scheduled {lesson} with {tutor} at {slot}"));
            }
            Step::Cancel {
                tutor,
                slot,
                reason,
            } => {
                manager.cancel(tutor, slot, reason.clone())?;
                outcomes.push(format!("cancelled booking for {tutor} at {slot}"));
            }
            Step::Reschedule {
                tutor,
                lesson,
                from_slot,
                to_slot,
            } => {
                manager.reschedule(tutor, *lesson, from_slot, to_slot)?;
                outcomes.push(format!(
                    "rescheduled {lesson} with {tutor} from {from_slot} to {to_slot}"
                ));
            }
            Step::Undo => match manager.undo()? {
                Some(desc) => outcomes.push(format!("undid: {desc}")),
                None => {
                    noops += 1;
                    outcomes.push("nothing to undo".to_string());
                }
            },
            Step::Redo => match manager.redo()? {
                Some(desc) => outcomes.push(format!("redid: {desc}")),
                None => {
                    noops += 1;
                    outcomes.push("nothing to redo".to_string());
                }
            },
        }
    }

    Ok(ScenarioReport {
        scenario: scenario.name.clone(),
        steps_run: scenario.steps.len(),
        noops,
        outcomes,
        history: manager.history().collect(),
        active_bookings: manager.ledger().len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
