use splitdns_domain::{RecordType, Termination};
use std::sync::Arc;

/// Structured diagnostic emitted while a resolution walks its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionEvent {
    CacheHit {
        domain: Arc<str>,
        answer: Arc<str>,
    },
    Answer {
        domain: Arc<str>,
        record_type: RecordType,
        answer: Arc<str>,
    },
    CnameFollowed {
        from: Arc<str>,
        to: Arc<str>,
    },
    /// A backend query failed. Flow continued as if it returned nothing.
    BackendError {
        domain: Arc<str>,
        record_type: RecordType,
        error: String,
    },
    Terminated {
        requested: Arc<str>,
        position: Arc<str>,
        termination: Termination,
        hops: usize,
    },
}

/// Observability sink injected into the resolver.
///
/// `record` is called inline on the resolution path and must not block.
pub trait ResolutionEventSink: Send + Sync {
    fn record(&self, event: ResolutionEvent);
}
