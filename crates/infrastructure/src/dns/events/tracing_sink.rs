use splitdns_application::ports::{ResolutionEvent, ResolutionEventSink};
use splitdns_domain::Termination;
use tracing::{debug, info, warn};

/// Renders resolution events as structured log records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl ResolutionEventSink for TracingEventSink {
    fn record(&self, event: ResolutionEvent) {
        match event {
            ResolutionEvent::CacheHit { domain, answer } => {
                debug!(domain = %domain, answer = %answer, "Answer served from cache");
            }
            ResolutionEvent::Answer {
                domain,
                record_type,
                answer,
            } => {
                debug!(
                    domain = %domain,
                    record_type = %record_type,
                    answer = %answer,
                    "Backend answered"
                );
            }
            ResolutionEvent::CnameFollowed { from, to } => {
                debug!(from = %from, to = %to, "Following CNAME");
            }
            ResolutionEvent::BackendError {
                domain,
                record_type,
                error,
            } => {
                warn!(
                    domain = %domain,
                    record_type = %record_type,
                    error = %error,
                    "Backend query failed, continuing"
                );
            }
            ResolutionEvent::Terminated {
                requested,
                position,
                termination,
                hops,
            } => match termination {
                Termination::CacheHit | Termination::AnswerFound => {
                    info!(
                        domain = %requested,
                        position = %position,
                        termination = %termination,
                        hops = hops,
                        "Resolution finished"
                    );
                }
                Termination::NoAnswer | Termination::CycleDetected | Termination::DepthExceeded => {
                    warn!(
                        domain = %requested,
                        position = %position,
                        termination = %termination,
                        hops = hops,
                        "Resolution gave up"
                    );
                }
            },
        }
    }
}
