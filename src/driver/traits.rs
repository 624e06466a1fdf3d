use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Element selector for page elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Select by element id attribute
    Id(String),
    /// Select by CSS selector
    Css(String),
}

impl Selector {
    pub fn id(id: &str) -> Self {
        Selector::Id(id.to_string())
    }

    pub fn css(css: &str) -> Self {
        Selector::Css(css.to_string())
    }

    /// Selector string understood by the browser engine
    pub fn to_css(&self) -> String {
        match self {
            Selector::Id(id) => format!("#{}", id),
            Selector::Css(css) => css.clone(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "id={}", id),
            Selector::Css(css) => write!(f, "css={}", css),
        }
    }
}

/// Faults raised by a page driver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriverError {
    #[error("Browser session could not be created: {0}")]
    SessionSetup(String),

    #[error("Failed to navigate to {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Failed to {action} {selector}: {message}")]
    Interaction {
        action: &'static str,
        selector: String,
        message: String,
    },

    #[error("Could not read page state: {message}")]
    PageState { message: String },

    #[error("Could not save screenshot to {path}: {message}")]
    Screenshot { path: String, message: String },

    #[error("Browser session did not close cleanly: {message}")]
    Teardown { message: String },
}

impl DriverError {
    pub fn not_found(selector: &Selector) -> Self {
        DriverError::ElementNotFound {
            selector: selector.to_string(),
        }
    }

    pub fn interaction(action: &'static str, selector: &Selector, err: impl fmt::Display) -> Self {
        DriverError::Interaction {
            action,
            selector: selector.to_string(),
            message: err.to_string(),
        }
    }
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Browser page interface used by the scenario runner
///
/// The runner only needs a handful of primitives: navigation, element
/// lookup and interaction, and reading back the resulting page state.
/// Implementations own one live browser session.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Human-readable description, recorded in report metadata
    fn description(&self) -> String;

    /// Load a URL in the current page
    async fn navigate(&self, url: &str) -> DriverResult<()>;

    /// Check that an element exists on the current page
    ///
    /// # Returns
    /// `ElementNotFound` if nothing matches the selector
    async fn locate(&self, selector: &Selector) -> DriverResult<()>;

    /// Clear an input element
    async fn clear(&self, selector: &Selector) -> DriverResult<()>;

    /// Type literal text into an input element. Empty text is valid.
    async fn type_text(&self, selector: &Selector, text: &str) -> DriverResult<()>;

    /// Click an element
    async fn click(&self, selector: &Selector) -> DriverResult<()>;

    /// Address of the current page
    async fn current_url(&self) -> DriverResult<String>;

    /// Full HTML content of the current page
    async fn page_content(&self) -> DriverResult<String>;

    /// Capture the visible page to an image file
    async fn take_screenshot(&self, path: &Path) -> DriverResult<()>;

    /// End the browser session
    async fn close(&self) -> DriverResult<()>;
}

#[async_trait]
impl<T: PageDriver + ?Sized> PageDriver for Arc<T> {
    fn description(&self) -> String {
        (**self).description()
    }

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        (**self).navigate(url).await
    }

    async fn locate(&self, selector: &Selector) -> DriverResult<()> {
        (**self).locate(selector).await
    }

    async fn clear(&self, selector: &Selector) -> DriverResult<()> {
        (**self).clear(selector).await
    }

    async fn type_text(&self, selector: &Selector, text: &str) -> DriverResult<()> {
        (**self).type_text(selector, text).await
    }

    async fn click(&self, selector: &Selector) -> DriverResult<()> {
        (**self).click(selector).await
    }

    async fn current_url(&self) -> DriverResult<String> {
        (**self).current_url().await
    }

    async fn page_content(&self) -> DriverResult<String> {
        (**self).page_content().await
    }

    async fn take_screenshot(&self, path: &Path) -> DriverResult<()> {
        (**self).take_screenshot(path).await
    }

    async fn close(&self) -> DriverResult<()> {
        (**self).close().await
    }
}
