use splitdns_domain::{DomainError, RuleSet};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::ports::RuleSource;

pub struct LoadRulesUseCase {
    source: Arc<dyn RuleSource>,
}

impl LoadRulesUseCase {
    pub fn new(source: Arc<dyn RuleSource>) -> Self {
        Self { source }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<RuleSet, DomainError> {
        let rules = self.source.load().await.map_err(|e| {
            error!(source = %self.source.describe(), error = %e, "Failed to load rules");
            e
        })?;

        info!(
            source = %self.source.describe(),
            rules = rules.len(),
            "Domain-suffix rules loaded"
        );

        Ok(rules)
    }
}
