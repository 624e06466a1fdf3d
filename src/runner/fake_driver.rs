//! In-memory stand-in for the login site, used by runner tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crate::driver::traits::{DriverError, DriverResult, PageDriver, Selector};
use crate::utils::config::RunConfig;

#[derive(Default)]
struct PageState {
    url: String,
    content: String,
    inputs: HashMap<String, String>,
    calls: Vec<String>,
}

pub struct FakeDriver {
    state: Mutex<PageState>,
    missing: Vec<Selector>,
    page_state_fails: bool,
    screenshot_fails: bool,
    closed: Mutex<u32>,
}

impl FakeDriver {
    pub const LOGIN_URL: &'static str = "https://fake.test/login";
    pub const SECURE_URL: &'static str = "https://fake.test/secure";

    pub fn new() -> Self {
        Self {
            state: Mutex::new(PageState::default()),
            missing: Vec::new(),
            page_state_fails: false,
            screenshot_fails: false,
            closed: Mutex::new(0),
        }
    }

    pub fn config() -> RunConfig {
        RunConfig {
            target_url: Self::LOGIN_URL.to_string(),
            settle_delay: Duration::ZERO,
            ..RunConfig::default()
        }
    }

    pub fn without(mut self, selector: Selector) -> Self {
        self.missing.push(selector);
        self
    }

    pub fn failing_page_state(mut self) -> Self {
        self.page_state_fails = true;
        self
    }

    pub fn failing_screenshot(mut self) -> Self {
        self.screenshot_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn close_count(&self) -> u32 {
        *self.closed.lock().unwrap()
    }

    fn log(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn check(&self, selector: &Selector) -> DriverResult<()> {
        if self.missing.contains(selector) {
            Err(DriverError::not_found(selector))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    fn description(&self) -> String {
        "fake driver".to_string()
    }

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("navigate {}", url));
        state.url = url.to_string();
        state.content = "<form id=\"login\"></form>".to_string();
        state.inputs.clear();
        Ok(())
    }

    async fn locate(&self, selector: &Selector) -> DriverResult<()> {
        self.log(format!("locate {}", selector));
        self.check(selector)
    }

    async fn clear(&self, selector: &Selector) -> DriverResult<()> {
        self.check(selector)?;
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("clear {}", selector));
        state.inputs.insert(selector.to_css(), String::new());
        Ok(())
    }

    async fn type_text(&self, selector: &Selector, text: &str) -> DriverResult<()> {
        self.check(selector)?;
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("type {} '{}'", selector, text));
        state.inputs.insert(selector.to_css(), text.to_string());
        Ok(())
    }

    async fn click(&self, selector: &Selector) -> DriverResult<()> {
        self.check(selector)?;
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("click {}", selector));

        let username = state.inputs.get("#username").cloned().unwrap_or_default();
        let password = state.inputs.get("#password").cloned().unwrap_or_default();
        if username == "tomsmith" && password == "SuperSecretPassword!" {
            state.url = Self::SECURE_URL.to_string();
            state.content = "<div class=\"flash success\">You logged into a secure area!</div>".to_string();
        } else {
            state.url = Self::LOGIN_URL.to_string();
            state.content = "<div class=\"flash error\">Your username is invalid!</div>".to_string();
        }
        Ok(())
    }

    async fn current_url(&self) -> DriverResult<String> {
        if self.page_state_fails {
            return Err(DriverError::PageState {
                message: "target closed".to_string(),
            });
        }
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn page_content(&self) -> DriverResult<String> {
        Ok(self.state.lock().unwrap().content.clone())
    }

    async fn take_screenshot(&self, path: &Path) -> DriverResult<()> {
        self.log(format!("screenshot {}", path.display()));
        if self.screenshot_fails {
            return Err(DriverError::Screenshot {
                path: path.display().to_string(),
                message: "no page".to_string(),
            });
        }
        std::fs::write(path, b"png").map_err(|e| DriverError::Screenshot {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    async fn close(&self) -> DriverResult<()> {
        *self.closed.lock().unwrap() += 1;
        Ok(())
    }
}
