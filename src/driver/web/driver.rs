//! Web Driver implementation using Playwright
//!
//! Drives a single Chromium page for the login scenarios.

use async_trait::async_trait;
use colored::Colorize;
use log::{debug, info};
use playwright::api::{Browser, BrowserContext, ElementHandle, Page, Viewport};
use playwright::Playwright;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::driver::traits::{DriverError, DriverResult, PageDriver, Selector};

/// Web Driver configuration
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Explicit browser executable; discovered from the system when unset
    pub executable: Option<PathBuf>,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        let headless = std::env::var("LUMI_HEADLESS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        let executable = std::env::var("PLAYWRIGHT_CHROMIUM_EXECUTABLE_PATH")
            .ok()
            .map(PathBuf::from);

        Self {
            headless,
            viewport_width: 1920,
            viewport_height: 1080,
            executable,
        }
    }
}

/// Web Driver using Playwright
pub struct WebDriver {
    #[allow(dead_code)]
    playwright: Playwright,
    browser: Browser,
    #[allow(dead_code)]
    context: BrowserContext,
    page: Mutex<Page>,
    config: WebDriverConfig,
}

impl WebDriver {
    /// Launch a browser session. Any failure here is fatal to the run.
    pub async fn new(config: WebDriverConfig) -> DriverResult<Self> {
        let playwright = Playwright::initialize()
            .await
            .map_err(|e| setup_error("Failed to initialize Playwright", e))?;

        let executable = config.executable.clone().or_else(find_system_browser);
        let args: Vec<String> = ["--no-sandbox", "--disable-dev-shm-usage", "--disable-gpu"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let chromium = playwright.chromium();
        let mut launcher = chromium.launcher().headless(config.headless);
        if let Some(ref path) = executable {
            println!("{} Using browser: {}", "🌐".blue(), path.display());
            launcher = launcher.executable(path);
        } else {
            println!(
                "{} No browser executable found, installing Playwright browsers...",
                "ℹ".blue()
            );
            playwright
                .prepare()
                .map_err(|e| setup_error("Failed to install Playwright browsers", e))?;
        }

        launcher = launcher.args(&args);

        let browser = launcher
            .launch()
            .await
            .map_err(|e| setup_error("Failed to launch Chromium", e))?;

        let context = browser
            .context_builder()
            .build()
            .await
            .map_err(|e| setup_error("Failed to create browser context", e))?;

        let page = context
            .new_page()
            .await
            .map_err(|e| setup_error("Failed to open page", e))?;

        page.set_viewport_size(Viewport {
            width: config.viewport_width as i32,
            height: config.viewport_height as i32,
        })
        .await
        .map_err(|e| setup_error("Failed to set viewport", e))?;

        println!("{} WebDriver setup successful", "✅".green());

        Ok(Self {
            playwright,
            browser,
            context,
            page: Mutex::new(page),
            config,
        })
    }

    async fn element(&self, page: &Page, selector: &Selector) -> DriverResult<ElementHandle> {
        let sel = selector.to_css();
        page.query_selector(&sel)
            .await
            .map_err(|e| DriverError::interaction("locate", selector, e))?
            .ok_or_else(|| DriverError::not_found(selector))
    }
}

#[async_trait]
impl PageDriver for WebDriver {
    fn description(&self) -> String {
        let mode = if self.config.headless {
            "headless"
        } else {
            "headed"
        };
        format!("Chromium ({}) via Playwright", mode)
    }

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        let page = self.page.lock().await;
        debug!("navigate {}", url);
        page.goto_builder(url)
            .goto()
            .await
            .map_err(|e| DriverError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn locate(&self, selector: &Selector) -> DriverResult<()> {
        let page = self.page.lock().await;
        self.element(&page, selector).await.map(|_| ())
    }

    async fn clear(&self, selector: &Selector) -> DriverResult<()> {
        let page = self.page.lock().await;
        let el = self.element(&page, selector).await?;
        el.fill_builder("")
            .fill()
            .await
            .map_err(|e| DriverError::interaction("clear", selector, e))
    }

    async fn type_text(&self, selector: &Selector, text: &str) -> DriverResult<()> {
        let page = self.page.lock().await;
        let el = self.element(&page, selector).await?;
        el.fill_builder(text)
            .fill()
            .await
            .map_err(|e| DriverError::interaction("type into", selector, e))
    }

    async fn click(&self, selector: &Selector) -> DriverResult<()> {
        let page = self.page.lock().await;
        let el = self.element(&page, selector).await?;
        el.click_builder()
            .click()
            .await
            .map_err(|e| DriverError::interaction("click", selector, e))
    }

    async fn current_url(&self) -> DriverResult<String> {
        let page = self.page.lock().await;
        page.evaluate::<(), String>("() => location.href", ())
            .await
            .map_err(|e| DriverError::PageState {
                message: e.to_string(),
            })
    }

    async fn page_content(&self) -> DriverResult<String> {
        let page = self.page.lock().await;
        page.content().await.map_err(|e| DriverError::PageState {
            message: e.to_string(),
        })
    }

    async fn take_screenshot(&self, path: &Path) -> DriverResult<()> {
        let page = self.page.lock().await;
        let screenshot_error = |message: String| DriverError::Screenshot {
            path: path.display().to_string(),
            message,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| screenshot_error(e.to_string()))?;
        }

        page.screenshot_builder()
            .path(path.to_path_buf())
            .screenshot()
            .await
            .map_err(|e| screenshot_error(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) -> DriverResult<()> {
        info!("closing browser session");
        self.browser
            .close()
            .await
            .map_err(|e| DriverError::Teardown {
                message: e.to_string(),
            })
    }
}

fn setup_error(what: &str, err: impl std::fmt::Display) -> DriverError {
    DriverError::SessionSetup(format!("{}: {}", what, err))
}

/// Look for a Chrome/Chromium binary in well-known locations, then on PATH
pub fn find_system_browser() -> Option<PathBuf> {
    let common_paths = [
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
    ];

    for path in common_paths {
        let p = Path::new(path);
        if p.exists() {
            return Some(p.to_path_buf());
        }
    }

    ["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"]
        .iter()
        .find_map(|name| which::which(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_error_message() {
        let err = setup_error("Failed to launch Chromium", "no display");
        assert_eq!(
            err.to_string(),
            "Browser session could not be created: Failed to launch Chromium: no display"
        );
    }

    #[test]
    fn test_default_viewport() {
        let config = WebDriverConfig::default();
        assert_eq!((config.viewport_width, config.viewport_height), (1920, 1080));
    }
}
