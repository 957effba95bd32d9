//! Configuration system for rentbnb.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`RENTBNB_*`)
//! 3. Private site config (`rentbnb.local.yaml`)
//! 4. Site config (`rentbnb.yaml`)
//! 5. User config (`<data_dir>/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use rentbnb::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("breakfast costs {} {}", config.addon_rate(), config.currency());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, PricingConfig};
pub use validator::ConfigValidator;

#[cfg(test)]
mod proptests;
