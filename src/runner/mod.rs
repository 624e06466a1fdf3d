pub mod classify;
pub mod events;
pub mod executor;
pub mod state;

#[cfg(test)]
pub(crate) mod fake_driver;

use colored::Colorize;
use futures::FutureExt;
use log::{error, warn};
use std::panic::AssertUnwindSafe;

pub use classify::classify;
pub use events::*;
pub use executor::ScenarioRunner;
pub use state::*;

use crate::driver::traits::PageDriver;
use crate::driver::web::{WebDriver, WebDriverConfig};
use crate::parser::types::ScenarioSpec;
use crate::report::{self, RunReport, TestEnvironment};
use crate::utils::config::RunConfig;
use crate::utils::system::{check_prerequisites, SetupError};

/// Check prerequisites, launch the browser and run the scenarios.
///
/// Only setup faults are returned; everything after the browser is up is
/// reflected in the report.
pub async fn run_login_suite(
    config: &RunConfig,
    specs: &[ScenarioSpec],
) -> Result<RunReport, SetupError> {
    check_prerequisites(config)?;

    let driver = WebDriver::new(WebDriverConfig {
        headless: config.headless,
        ..WebDriverConfig::default()
    })
    .await?;

    Ok(run_session(driver, config, specs, &mut ConsoleObserver).await)
}

/// Own the driver for the whole run and close it exactly once afterwards,
/// including when the run panics. The panic is resumed after closing.
pub async fn run_session<D: PageDriver>(
    driver: D,
    config: &RunConfig,
    specs: &[ScenarioSpec],
    observer: &mut dyn RunObserver,
) -> RunReport {
    let outcome = AssertUnwindSafe(run_suite(&driver, config, specs, observer))
        .catch_unwind()
        .await;

    match driver.close().await {
        Ok(()) => println!("{} WebDriver closed", "🔚".blue()),
        Err(e) => warn!("{}", e),
    }

    match outcome {
        Ok(report) => report,
        Err(panic) => {
            error!("Scenario run aborted, browser session released");
            std::panic::resume_unwind(panic)
        }
    }
}

/// Run all scenarios, then report and capture evidence.
///
/// Report and screenshot write failures are logged and do not affect the
/// returned report.
pub async fn run_suite<D: PageDriver + ?Sized>(
    driver: &D,
    config: &RunConfig,
    specs: &[ScenarioSpec],
    observer: &mut dyn RunObserver,
) -> RunReport {
    let results = ScenarioRunner::new(driver, config)
        .run_all_observed(specs, observer)
        .await;

    let report = report::build_report(
        results,
        TestEnvironment {
            website: config.target_url.clone(),
            driver: driver.description(),
        },
    );
    report::print_summary(&report);

    match report::json::write(&report, &config.report_path) {
        Ok(()) => println!(
            "\n{} Results saved to '{}'",
            "💾".blue(),
            config.report_path.display()
        ),
        Err(e) => warn!("Could not save report: {:#}", e),
    }

    if let Some(ref junit_path) = config.junit_path {
        match report::junit::write(&report, junit_path) {
            Ok(()) => println!("{} JUnit report saved to '{}'", "💾".blue(), junit_path.display()),
            Err(e) => warn!("Could not save JUnit report: {:#}", e),
        }
    }

    match driver.take_screenshot(&config.screenshot_path).await {
        Ok(()) => println!(
            "{} Evidence saved to '{}'",
            "📸".blue(),
            config.screenshot_path.display()
        ),
        Err(e) => {
            warn!("{}", e);
            println!("{} Could not save screenshot: {}", "⚠️".yellow(), e);
        }
    }

    report
}
