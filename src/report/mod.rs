pub mod json;
pub mod junit;
pub mod types;

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::runner::state::{ScenarioResult, Status};
pub use types::{RunReport, RunSummary, TestEnvironment};

/// Aggregate scenario results into a report. Pure: no I/O.
pub fn build_report(results: Vec<ScenarioResult>, environment: TestEnvironment) -> RunReport {
    let count = |status: Status| results.iter().filter(|r| r.status == status).count();
    let total_tests = results.len();
    let passed = count(Status::Pass);

    RunReport {
        summary: RunSummary {
            total_tests,
            passed,
            failed: count(Status::Fail),
            errors: count(Status::Error),
            success_rate: success_rate(passed, total_tests),
        },
        detailed_results: results,
        test_environment: environment,
    }
}

/// `passed / total` as a percentage rounded to two decimals; 0 for an empty run
pub fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = passed as f64 / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Overall verdict line for a finished run
pub fn verdict(success_rate: f64) -> &'static str {
    if success_rate >= 80.0 {
        "Excellent! Tests completed successfully!"
    } else if success_rate >= 60.0 {
        "Good! Most tests passed."
    } else {
        "Some tests failed. Review the results."
    }
}

/// Print the run summary to stdout
pub fn print_summary(report: &RunReport) {
    let summary = &report.summary;

    println!("\n{} === TEST REPORT ===", "📊".blue());
    println!("  Total Tests: {}", summary.total_tests);
    println!("  Passed: {}", summary.passed.to_string().green());
    println!("  Failed: {}", summary.failed.to_string().red());
    println!("  Errors: {}", summary.errors.to_string().yellow());
    println!("  Success Rate: {:.2}%", summary.success_rate);

    println!("\n{} Detailed Results:", "📝".blue());
    for result in &report.detailed_results {
        let status = match result.status {
            Status::Pass => "PASS".green(),
            Status::Fail => "FAIL".red(),
            Status::Error => "ERROR".yellow(),
        };
        println!("   {} {}", status, result.name);
    }

    println!("\n{}", verdict(summary.success_rate).bold());
}

/// Render a saved JSON report in another format
pub async fn generate_report(results_path: &Path, format: &str, output: Option<&Path>) -> Result<()> {
    let report = json::read(results_path)?;

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&report)?,
        "junit" => junit::generate_junit_xml(&report)?,
        _ => anyhow::bail!("Unknown format: {}", format),
    };

    if let Some(path) = output {
        std::fs::write(path, rendered)?;
        println!("{} report saved to: {}", format, path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}
