use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome a scenario is expected to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Failure => write!(f, "failure"),
        }
    }
}

/// One credential pair to submit, with the outcome it should produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    /// Submitted verbatim; an empty string is a deliberate input
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub expected: Outcome,
}

impl ScenarioSpec {
    pub fn new(name: &str, username: &str, password: &str, expected: Outcome) -> Self {
        Self {
            name: name.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            expected,
        }
    }

    /// Password as it may appear in reports and logs
    pub fn masked_password(&self) -> String {
        mask_password(&self.password)
    }
}

pub fn mask_password(password: &str) -> String {
    if password.is_empty() {
        "empty".to_string()
    } else {
        "***".to_string()
    }
}

/// Scenario file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub scenarios: Vec<ScenarioSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_password() {
        let spec = ScenarioSpec::new("x", "tomsmith", "SuperSecretPassword!", Outcome::Success);
        assert_eq!(spec.masked_password(), "***");
        let spec = ScenarioSpec::new("x", "tomsmith", "", Outcome::Failure);
        assert_eq!(spec.masked_password(), "empty");
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(serde_json::to_string(&Outcome::Success).unwrap(), "\"success\"");
        let parsed: Outcome = serde_json::from_str("\"failure\"").unwrap();
        assert_eq!(parsed, Outcome::Failure);
    }
}
