use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parser::types::{Outcome, ScenarioSpec};

/// Outcome observed after submitting the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActualOutcome {
    Success,
    Failure,
    Unknown,
}

impl ActualOutcome {
    pub fn matches(&self, expected: Outcome) -> bool {
        matches!(
            (self, expected),
            (ActualOutcome::Success, Outcome::Success) | (ActualOutcome::Failure, Outcome::Failure)
        )
    }
}

impl fmt::Display for ActualOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActualOutcome::Success => write!(f, "success"),
            ActualOutcome::Failure => write!(f, "failure"),
            ActualOutcome::Unknown => write!(f, "unknown"),
        }
    }
}

/// Verdict for a single scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "PASS"),
            Status::Fail => write!(f, "FAIL"),
            Status::Error => write!(f, "ERROR"),
        }
    }
}

/// Lifecycle of one scenario execution
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioPhase {
    NotStarted,
    Submitted,
    Classified {
        actual: ActualOutcome,
        final_url: String,
    },
    Recorded,
    Errored {
        message: String,
    },
}

impl ScenarioPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScenarioPhase::Recorded | ScenarioPhase::Errored { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioPhase::NotStarted => "not-started",
            ScenarioPhase::Submitted => "submitted",
            ScenarioPhase::Classified { .. } => "classified",
            ScenarioPhase::Recorded => "recorded",
            ScenarioPhase::Errored { .. } => "errored",
        }
    }
}

/// Tracks one scenario through its phases and produces its result
#[derive(Debug)]
pub struct ScenarioState<'a> {
    spec: &'a ScenarioSpec,
    phase: ScenarioPhase,
}

impl<'a> ScenarioState<'a> {
    pub fn new(spec: &'a ScenarioSpec) -> Self {
        Self {
            spec,
            phase: ScenarioPhase::NotStarted,
        }
    }

    pub fn phase(&self) -> &ScenarioPhase {
        &self.phase
    }

    pub fn submit(&mut self) {
        if matches!(self.phase, ScenarioPhase::NotStarted) {
            self.phase = ScenarioPhase::Submitted;
        }
    }

    pub fn classify(&mut self, actual: ActualOutcome, final_url: String) {
        if matches!(self.phase, ScenarioPhase::Submitted) {
            self.phase = ScenarioPhase::Classified { actual, final_url };
        }
    }

    /// Enter `Errored` from any non-terminal phase
    pub fn fail(&mut self, message: String) {
        if !self.phase.is_terminal() {
            self.phase = ScenarioPhase::Errored { message };
        }
    }

    /// Close the scenario and build its result.
    ///
    /// A scenario that never reached classification is recorded as an error.
    pub fn record(&mut self) -> ScenarioResult {
        let phase = std::mem::replace(&mut self.phase, ScenarioPhase::Recorded);
        match phase {
            ScenarioPhase::Classified { actual, final_url } => {
                let status = if actual.matches(self.spec.expected) {
                    Status::Pass
                } else {
                    Status::Fail
                };
                self.result(actual, status, None, Some(final_url))
            }
            ScenarioPhase::Errored { message } => {
                let result = self.result(ActualOutcome::Unknown, Status::Error, Some(message.clone()), None);
                self.phase = ScenarioPhase::Errored { message };
                result
            }
            other => {
                let message = format!("scenario stopped while {}", other.name());
                self.phase = ScenarioPhase::Errored {
                    message: message.clone(),
                };
                self.result(ActualOutcome::Unknown, Status::Error, Some(message), None)
            }
        }
    }

    fn result(
        &self,
        actual: ActualOutcome,
        status: Status,
        error: Option<String>,
        url: Option<String>,
    ) -> ScenarioResult {
        ScenarioResult {
            name: self.spec.name.clone(),
            username: self.spec.username.clone(),
            password: self.spec.masked_password(),
            expected: self.spec.expected,
            actual,
            status,
            url,
            error,
        }
    }
}

/// Outcome of one scenario, as written to the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    #[serde(rename = "test_name")]
    pub name: String,
    pub username: String,
    /// Masked: `***` or `empty`
    pub password: String,
    pub expected: Outcome,
    pub actual: ActualOutcome,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
