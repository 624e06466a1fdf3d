pub mod driver;

pub use driver::{find_system_browser, WebDriver, WebDriverConfig};
