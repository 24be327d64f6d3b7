//! Configuration loading and validation.

mod loader;
mod types;

pub use loader::{ConfigError, API_URL_ENV};
pub use types::{ApiConfig, CatalogConfig, Config, SessionConfig};
