use dashmap::DashMap;
use splitdns_application::ports::{ResolutionEvent, ResolutionEventSink};
use splitdns_domain::{RecordType, Termination};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Resolution metrics tracker
///
/// Counts terminations, backend traffic and per-domain totals from the event
/// stream. Cheap to clone; clones share the same counters.
#[derive(Clone)]
pub struct ResolutionMetrics {
    /// Total number of finished resolutions
    resolutions: Arc<AtomicU64>,

    /// Resolutions ending in `CacheHit` or `AnswerFound`
    successful: Arc<AtomicU64>,

    /// Resolutions ending in any other termination
    failed: Arc<AtomicU64>,

    cache_hits: Arc<AtomicU64>,

    cnames_followed: Arc<AtomicU64>,

    backend_errors: Arc<AtomicU64>,

    /// Per-termination counts
    termination_counts: Arc<DashMap<Termination, u64>>,

    /// Answers per record type that produced them
    answer_type_counts: Arc<DashMap<RecordType, u64>>,

    /// Per-requested-domain resolution counts
    domain_counts: Arc<DashMap<Arc<str>, u64>>,

    /// Sum of hops over all resolutions
    total_hops: Arc<AtomicU64>,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self {
            resolutions: Arc::new(AtomicU64::new(0)),
            successful: Arc::new(AtomicU64::new(0)),
            failed: Arc::new(AtomicU64::new(0)),
            cache_hits: Arc::new(AtomicU64::new(0)),
            cnames_followed: Arc::new(AtomicU64::new(0)),
            backend_errors: Arc::new(AtomicU64::new(0)),
            termination_counts: Arc::new(DashMap::new()),
            answer_type_counts: Arc::new(DashMap::new()),
            domain_counts: Arc::new(DashMap::new()),
            total_hops: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn track(&self, event: &ResolutionEvent) {
        match event {
            ResolutionEvent::CacheHit { .. } => {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
            }
            ResolutionEvent::Answer { record_type, .. } => {
                self.answer_type_counts
                    .entry(*record_type)
                    .and_modify(|c| *c += 1)
                    .or_insert(1);
            }
            ResolutionEvent::CnameFollowed { .. } => {
                self.cnames_followed.fetch_add(1, Ordering::Relaxed);
            }
            ResolutionEvent::BackendError { .. } => {
                self.backend_errors.fetch_add(1, Ordering::Relaxed);
            }
            ResolutionEvent::Terminated {
                requested,
                termination,
                hops,
                ..
            } => {
                self.resolutions.fetch_add(1, Ordering::Relaxed);

                if termination.is_success() {
                    self.successful.fetch_add(1, Ordering::Relaxed);
                } else {
                    self.failed.fetch_add(1, Ordering::Relaxed);
                }

                self.total_hops.fetch_add(*hops as u64, Ordering::Relaxed);

                self.termination_counts
                    .entry(*termination)
                    .and_modify(|c| *c += 1)
                    .or_insert(1);

                self.domain_counts
                    .entry(Arc::clone(requested))
                    .and_modify(|c| *c += 1)
                    .or_insert(1);
            }
        }
    }

    pub fn resolutions(&self) -> u64 {
        self.resolutions.load(Ordering::Relaxed)
    }

    pub fn successful(&self) -> u64 {
        self.successful.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cnames_followed(&self) -> u64 {
        self.cnames_followed.load(Ordering::Relaxed)
    }

    pub fn backend_errors(&self) -> u64 {
        self.backend_errors.load(Ordering::Relaxed)
    }

    /// Get success rate (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        let total = self.resolutions();
        if total == 0 {
            return 0.0;
        }
        self.successful() as f64 / total as f64
    }

    pub fn avg_hops(&self) -> f64 {
        let total = self.resolutions();
        if total == 0 {
            return 0.0;
        }
        self.total_hops.load(Ordering::Relaxed) as f64 / total as f64
    }

    pub fn termination_count(&self, termination: Termination) -> u64 {
        self.termination_counts
            .get(&termination)
            .map(|v| *v)
            .unwrap_or(0)
    }

    pub fn answer_type_count(&self, record_type: RecordType) -> u64 {
        self.answer_type_counts
            .get(&record_type)
            .map(|v| *v)
            .unwrap_or(0)
    }

    pub fn domain_count(&self, domain: &str) -> u64 {
        self.domain_counts.get(domain).map(|v| *v).unwrap_or(0)
    }

    /// Get top N requested domains by resolution count
    pub fn top_domains(&self, n: usize) -> Vec<(String, u64)> {
        let mut domains: Vec<_> = self
            .domain_counts
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect();

        domains.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        domains.truncate(n);
        domains
    }

    pub fn reset(&self) {
        self.resolutions.store(0, Ordering::Relaxed);
        self.successful.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cnames_followed.store(0, Ordering::Relaxed);
        self.backend_errors.store(0, Ordering::Relaxed);
        self.total_hops.store(0, Ordering::Relaxed);
        self.termination_counts.clear();
        self.answer_type_counts.clear();
        self.domain_counts.clear();
    }
}

impl ResolutionEventSink for ResolutionMetrics {
    fn record(&self, event: ResolutionEvent) {
        self.track(&event);
    }
}

impl Default for ResolutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
