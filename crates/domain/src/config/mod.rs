//! Configuration module for splitdns
//!
//! - `root`: Main configuration and CLI overrides
//! - `upstream`: DNS-over-HTTPS backend settings
//! - `cache`: Answer cache bounds
//! - `rules`: Rule file location
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod root;
pub mod rules;
pub mod upstream;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use rules::RulesConfig;
pub use upstream::UpstreamConfig;
