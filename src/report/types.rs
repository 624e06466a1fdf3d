use crate::runner::state::ScenarioResult;
use serde::{Deserialize, Serialize};

/// Static description of where and how the run happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestEnvironment {
    pub website: String,
    pub driver: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    /// Percentage in 0..=100, two decimals
    pub success_rate: f64,
}

/// The single durable artifact of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub summary: RunSummary,
    pub detailed_results: Vec<ScenarioResult>,
    pub test_environment: TestEnvironment,
}
