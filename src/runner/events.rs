use super::state::{ScenarioResult, Status};
use colored::Colorize;

/// Run progress events, emitted in order from the single execution thread
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    RunStarted {
        scenario_count: usize,
        target_url: String,
    },
    ScenarioStarted {
        index: usize,
        name: String,
    },
    ScenarioFinished {
        index: usize,
        result: ScenarioResult,
    },
    RunFinished {
        passed: usize,
        total: usize,
    },
}

/// Receives run events
pub trait RunObserver {
    fn on_event(&mut self, event: &RunEvent);
}

/// Discards every event
pub struct NullObserver;

impl RunObserver for NullObserver {
    fn on_event(&mut self, _event: &RunEvent) {}
}

/// Prints progress lines to stdout
pub struct ConsoleObserver;

impl RunObserver for ConsoleObserver {
    fn on_event(&mut self, event: &RunEvent) {
        match event {
            RunEvent::RunStarted {
                scenario_count,
                target_url,
            } => {
                println!(
                    "\n{} Starting {} login scenarios against {}",
                    "🚀".yellow(),
                    scenario_count,
                    target_url.cyan()
                );
            }

            RunEvent::ScenarioStarted { name, .. } => {
                println!("{} Running test: {}", "🧪".blue(), name.white().bold());
            }

            RunEvent::ScenarioFinished { result, .. } => match result.status {
                Status::Pass | Status::Fail => {
                    let icon = if result.status == Status::Pass {
                        "✅".green()
                    } else {
                        "❌".red()
                    };
                    println!(
                        "   {} {}: Expected {}, Got {}",
                        icon, result.name, result.expected, result.actual
                    );
                }
                Status::Error => {
                    println!(
                        "   {} ERROR in {}: {}",
                        "💥".red(),
                        result.name,
                        result.error.as_deref().unwrap_or("unknown error").red()
                    );
                }
            },

            RunEvent::RunFinished { passed, total } => {
                println!(
                    "{} Finished: {}/{} scenarios passed",
                    "■".blue().bold(),
                    passed.to_string().green(),
                    total
                );
            }
        }
    }
}

/// Keeps every event, for inspection in tests
#[cfg(test)]
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Vec<RunEvent>,
}

#[cfg(test)]
impl RunObserver for RecordingObserver {
    fn on_event(&mut self, event: &RunEvent) {
        self.events.push(event.clone());
    }
}
