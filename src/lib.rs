pub mod driver;
pub mod parser;
pub mod report;
pub mod runner;
pub mod sorter;
pub mod utils;

// Re-export common items
pub use report::generate_report;
pub use runner::run_login_suite;
pub use sorter::{sort_by_key_partitioned, sort_by_key_strict, sort_by_key_with_default};
