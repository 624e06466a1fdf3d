use crate::driver::traits::Selector;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TARGET_URL: &str = "https://the-internet.herokuapp.com/login";

/// Stable identifiers of the login form elements
#[derive(Debug, Clone, PartialEq)]
pub struct LoginForm {
    pub username: Selector,
    pub password: Selector,
    pub submit: Selector,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: Selector::id("username"),
            password: Selector::id("password"),
            submit: Selector::css("button[type='submit']"),
        }
    }
}

/// Scenario run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Login page every scenario starts from
    pub target_url: String,

    /// Fixed wait between submit and page inspection
    pub settle_delay: Duration,

    pub form: LoginForm,

    /// JSON report destination
    pub report_path: PathBuf,

    /// Evidence screenshot destination
    pub screenshot_path: PathBuf,

    /// Optional JUnit XML destination
    pub junit_path: Option<PathBuf>,

    pub headless: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        let target_url =
            std::env::var("LUMI_TARGET_URL").unwrap_or_else(|_| DEFAULT_TARGET_URL.to_string());

        let settle_ms = std::env::var("LUMI_SETTLE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(2000);

        let headless = std::env::var("LUMI_HEADLESS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Self {
            target_url,
            settle_delay: Duration::from_millis(settle_ms),
            form: LoginForm::default(),
            report_path: PathBuf::from("test_results.json"),
            screenshot_path: PathBuf::from("test_execution_evidence.png"),
            junit_path: None,
            headless,
        }
    }
}
