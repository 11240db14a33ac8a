use splitdns_domain::{
    AliasedResolution, RecordType, Resolution, RuleSet, Termination, MAX_CHAIN_HOPS,
};
use std::sync::Arc;
use tracing::instrument;

use super::chain::ResolutionChain;
use crate::ports::{
    AnswerCache, PrimaryAnswer, ResolutionEvent, ResolutionEventSink, ResolverBackend,
};

/// What one hop of the chain produced.
enum Hop {
    Done(Termination, AliasedResolution),
    Follow(Arc<str>),
}

/// Resolves a domain by chasing CNAMEs and tags the answer with a rule match.
///
/// Each hop probes the cache, then asks the backend for an address (A, with
/// any CNAME target it reports), then IPv6 (AAAA), then follows the CNAME,
/// and only when there is no alias falls back to a broad (ANY) query whose
/// first value wins. Every answer taken from the backend is cached under the
/// chain position it was found for.
///
/// The rule match is computed against the chain position where resolution
/// stopped, not the name originally asked for: resolving `cdn.example.com`
/// through a CNAME to `edge.cdnprovider.net` is matched against
/// `edge.cdnprovider.net`.
///
/// Every failure (no answer, CNAME loop, more than [`MAX_CHAIN_HOPS`] hops)
/// returns the same negative [`Resolution`]; the distinction is only visible
/// to the event sink.
pub struct ResolveDomainUseCase {
    backend: Arc<dyn ResolverBackend>,
    cache: Arc<dyn AnswerCache>,
    events: Arc<dyn ResolutionEventSink>,
}

impl ResolveDomainUseCase {
    pub fn new(
        backend: Arc<dyn ResolverBackend>,
        cache: Arc<dyn AnswerCache>,
        events: Arc<dyn ResolutionEventSink>,
    ) -> Self {
        Self {
            backend,
            cache,
            events,
        }
    }

    #[instrument(skip(self, rules), fields(rules = rules.len()))]
    pub async fn execute(&self, domain: &str, rules: &RuleSet) -> Resolution {
        self.walk(domain, rules).await.resolution
    }

    /// Same resolution as [`execute`](Self::execute), also returning the CNAME
    /// that accompanied the address on the terminal hop's primary answer.
    #[instrument(skip(self, rules), fields(rules = rules.len()))]
    pub async fn execute_with_alias(&self, domain: &str, rules: &RuleSet) -> AliasedResolution {
        self.walk(domain, rules).await
    }

    async fn walk(&self, domain: &str, rules: &RuleSet) -> AliasedResolution {
        let mut chain = ResolutionChain::new(domain);

        while chain.hops() < MAX_CHAIN_HOPS {
            if !chain.enter() {
                return self.finish(
                    &chain,
                    Termination::CycleDetected,
                    AliasedResolution::negative(),
                );
            }

            match self.hop(chain.current(), rules).await {
                Hop::Done(termination, outcome) => {
                    return self.finish(&chain, termination, outcome);
                }
                Hop::Follow(target) => {
                    self.events.record(ResolutionEvent::CnameFollowed {
                        from: Arc::clone(chain.current()),
                        to: Arc::clone(&target),
                    });
                    chain.advance(target);
                }
            }
        }

        self.finish(
            &chain,
            Termination::DepthExceeded,
            AliasedResolution::negative(),
        )
    }

    async fn hop(&self, current: &Arc<str>, rules: &RuleSet) -> Hop {
        if let Some(cached) = self.cache.get(current) {
            self.events.record(ResolutionEvent::CacheHit {
                domain: Arc::clone(current),
                answer: Arc::clone(&cached),
            });
            return Hop::Done(
                Termination::CacheHit,
                AliasedResolution {
                    resolution: Resolution::new(rules.matches(current), cached),
                    last_cname: None,
                },
            );
        }

        let primary = match self.backend.query_with_cname(current).await {
            Ok(answer) => answer,
            Err(e) => {
                self.backend_error(current, RecordType::A, e.to_string());
                PrimaryAnswer::empty()
            }
        };
        let cname = primary.cname.filter(|target| !target.is_empty());

        if let Some(address) = primary.address.filter(|a| !a.is_empty()) {
            let resolution = self.answer(current, RecordType::A, address, rules);
            return Hop::Done(
                Termination::AnswerFound,
                AliasedResolution {
                    resolution,
                    last_cname: cname,
                },
            );
        }

        match self.backend.query_aaaa(current).await {
            Ok(Some(address)) if !address.is_empty() => {
                let resolution = self.answer(current, RecordType::AAAA, address, rules);
                return Hop::Done(
                    Termination::AnswerFound,
                    AliasedResolution {
                        resolution,
                        last_cname: None,
                    },
                );
            }
            Ok(_) => {}
            Err(e) => self.backend_error(current, RecordType::AAAA, e.to_string()),
        }

        if let Some(target) = cname {
            return Hop::Follow(target);
        }

        match self.backend.query_all(current).await {
            Ok(records) => {
                if let Some(value) = records.first_value() {
                    let resolution =
                        self.answer(current, RecordType::ANY, Arc::clone(value), rules);
                    return Hop::Done(
                        Termination::AnswerFound,
                        AliasedResolution {
                            resolution,
                            last_cname: None,
                        },
                    );
                }
            }
            Err(e) => self.backend_error(current, RecordType::ANY, e.to_string()),
        }

        Hop::Done(Termination::NoAnswer, AliasedResolution::negative())
    }

    /// Cache a backend answer for `current` and build the positive result.
    fn answer(
        &self,
        current: &Arc<str>,
        record_type: RecordType,
        answer: Arc<str>,
        rules: &RuleSet,
    ) -> Resolution {
        self.cache.set(current, Arc::clone(&answer));
        self.events.record(ResolutionEvent::Answer {
            domain: Arc::clone(current),
            record_type,
            answer: Arc::clone(&answer),
        });
        Resolution::new(rules.matches(current), answer)
    }

    fn backend_error(&self, current: &Arc<str>, record_type: RecordType, error: String) {
        self.events.record(ResolutionEvent::BackendError {
            domain: Arc::clone(current),
            record_type,
            error,
        });
    }

    fn finish(
        &self,
        chain: &ResolutionChain,
        termination: Termination,
        outcome: AliasedResolution,
    ) -> AliasedResolution {
        self.events.record(ResolutionEvent::Terminated {
            requested: Arc::clone(chain.requested()),
            position: Arc::clone(chain.current()),
            termination,
            hops: chain.hops(),
        });
        outcome
    }
}
