use async_trait::async_trait;
use splitdns_domain::{DomainError, RuleSet};

/// Somewhere domain-suffix rules can be loaded from.
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Fails only when the source cannot be opened or read.
    async fn load(&self) -> Result<RuleSet, DomainError>;
}
