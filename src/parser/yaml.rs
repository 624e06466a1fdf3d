use super::types::{Outcome, ScenarioFile, ScenarioSpec};
use anyhow::{Context, Result};
use std::path::Path;

/// Built-in login scenarios for the-internet.herokuapp.com
pub fn default_scenarios() -> Vec<ScenarioSpec> {
    vec![
        ScenarioSpec::new(
            "Valid Credentials",
            "tomsmith",
            "SuperSecretPassword!",
            Outcome::Success,
        ),
        ScenarioSpec::new("Invalid Username", "wronguser", "wrongpass", Outcome::Failure),
        ScenarioSpec::new("Invalid Password", "tomsmith", "wrongpass", Outcome::Failure),
        ScenarioSpec::new("Empty Username", "", "somepassword", Outcome::Failure),
        ScenarioSpec::new("Empty Password", "tomsmith", "", Outcome::Failure),
        ScenarioSpec::new("Both Empty", "", "", Outcome::Failure),
        ScenarioSpec::new("Email as Username", "user@name", "pass", Outcome::Failure),
        ScenarioSpec::new("Space in Username", "user name", "pass", Outcome::Failure),
    ]
}

/// Parse a YAML scenario file
pub fn load_scenarios(path: &Path) -> Result<Vec<ScenarioSpec>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    parse_scenarios(&content)
        .with_context(|| format!("Invalid scenario file: {}", path.display()))
}

/// Accepts either `scenarios: [...]` or a bare list
pub fn parse_scenarios(content: &str) -> Result<Vec<ScenarioSpec>> {
    let doc: serde_yaml::Value = serde_yaml::from_str(content)?;
    // A mapping is the `scenarios:` layout, anything else must be a bare list
    let scenarios = if doc.is_mapping() {
        serde_yaml::from_value::<ScenarioFile>(doc)?.scenarios
    } else {
        serde_yaml::from_value(doc)?
    };
    Ok(scenarios)
}
