//! splitdns Domain Layer
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod resolution;
pub mod rule;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use resolution::{AliasedResolution, Resolution, Termination, MAX_CHAIN_HOPS};
pub use rule::{matches_rules, Rule, RuleSet};
