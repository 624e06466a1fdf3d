pub mod traits;
pub mod web;

pub use traits::{DriverError, DriverResult, PageDriver, Selector};
