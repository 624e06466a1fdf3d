pub mod types;
pub mod yaml;

pub use types::{mask_password, Outcome, ScenarioSpec};
pub use yaml::{default_scenarios, load_scenarios};
