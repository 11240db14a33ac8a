use splitdns_application::ports::ResolutionEventSink;
use splitdns_application::use_cases::{LoadRulesUseCase, ResolveDomainUseCase};
use splitdns_domain::Config;
use splitdns_infrastructure::dns::{CacheMetrics, DohBackend, HttpsTransport, MemoryAnswerCache};
use splitdns_infrastructure::rules::FileRuleSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Adapters wired into the use cases.
pub struct Services {
    pub resolve: Arc<ResolveDomainUseCase>,
    pub load_rules: LoadRulesUseCase,
    pub cache_metrics: Arc<CacheMetrics>,
}

impl Services {
    pub fn build(config: &Config, events: Arc<dyn ResolutionEventSink>) -> Self {
        let transport = Arc::new(HttpsTransport::new(config.upstream.doh_url.clone()));
        let backend = Arc::new(DohBackend::new(
            transport,
            Duration::from_millis(config.upstream.query_timeout_ms),
        ));

        let cache = Arc::new(MemoryAnswerCache::new(config.cache.max_entries));
        let cache_metrics = cache.metrics();

        let rule_source = Arc::new(FileRuleSource::new(config.rules.path.clone()));

        info!(
            upstream = %config.upstream.doh_url,
            rules = %config.rules.path,
            "Services wired"
        );

        Self {
            resolve: Arc::new(ResolveDomainUseCase::new(backend, cache, events)),
            load_rules: LoadRulesUseCase::new(rule_source),
            cache_metrics,
        }
    }
}
