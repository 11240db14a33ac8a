#![allow(dead_code)]

use async_trait::async_trait;
use splitdns_application::ports::{
    AnswerCache, PrimaryAnswer, RecordSet, ResolutionEvent, ResolutionEventSink,
    ResolverBackend, RuleSource,
};
use splitdns_application::use_cases::ResolveDomainUseCase;
use splitdns_domain::{DomainError, RecordType, RuleSet, Termination};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

// ============================================================================
// Mock ResolverBackend
// ============================================================================

/// Scripted backend: answers per (name, query kind), records every call.
#[derive(Clone, Default)]
pub struct MockResolverBackend {
    primary: Arc<RwLock<HashMap<String, PrimaryAnswer>>>,
    aaaa: Arc<RwLock<HashMap<String, String>>>,
    all: Arc<RwLock<HashMap<String, RecordSet>>>,
    failing: Arc<RwLock<Vec<(String, RecordType)>>>,
    calls: Arc<Mutex<Vec<(RecordType, String)>>>,
}

impl MockResolverBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_address(&self, name: &str, address: &str) {
        self.primary
            .write()
            .await
            .insert(name.to_string(), PrimaryAnswer::address(address));
    }

    pub async fn set_cname(&self, name: &str, target: &str) {
        self.primary
            .write()
            .await
            .insert(name.to_string(), PrimaryAnswer::cname(target));
    }

    pub async fn set_primary(&self, name: &str, answer: PrimaryAnswer) {
        self.primary.write().await.insert(name.to_string(), answer);
    }

    pub async fn set_aaaa(&self, name: &str, address: &str) {
        self.aaaa
            .write()
            .await
            .insert(name.to_string(), address.to_string());
    }

    pub async fn set_all(&self, name: &str, records: RecordSet) {
        self.all.write().await.insert(name.to_string(), records);
    }

    /// Make one query kind for `name` fail with a transport error.
    pub async fn fail(&self, name: &str, record_type: RecordType) {
        self.failing
            .write()
            .await
            .push((name.to_string(), record_type));
    }

    pub fn calls(&self) -> Vec<(RecordType, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, record_type: RecordType) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(rt, _)| *rt == record_type)
            .count()
    }

    fn log(&self, record_type: RecordType, name: &str) {
        self.calls
            .lock()
            .unwrap()
            .push((record_type, name.to_string()));
    }

    async fn check_failure(&self, name: &str, record_type: RecordType) -> Result<(), DomainError> {
        let failing = self.failing.read().await;
        if failing
            .iter()
            .any(|(n, rt)| n == name && *rt == record_type)
        {
            return Err(DomainError::Transport(format!(
                "mock {} query for {} failed",
                record_type, name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ResolverBackend for MockResolverBackend {
    async fn query_with_cname(&self, name: &str) -> Result<PrimaryAnswer, DomainError> {
        self.log(RecordType::A, name);
        self.check_failure(name, RecordType::A).await?;
        Ok(self
            .primary
            .read()
            .await
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    async fn query_aaaa(&self, name: &str) -> Result<Option<Arc<str>>, DomainError> {
        self.log(RecordType::AAAA, name);
        self.check_failure(name, RecordType::AAAA).await?;
        Ok(self
            .aaaa
            .read()
            .await
            .get(name)
            .map(|a| Arc::from(a.as_str())))
    }

    async fn query_all(&self, name: &str) -> Result<RecordSet, DomainError> {
        self.log(RecordType::ANY, name);
        self.check_failure(name, RecordType::ANY).await?;
        Ok(self
            .all
            .read()
            .await
            .get(name)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Mock AnswerCache
// ============================================================================

#[derive(Clone, Default)]
pub struct MockAnswerCache {
    entries: Arc<Mutex<HashMap<String, Arc<str>>>>,
}

impl MockAnswerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<(&str, &str)>) -> Self {
        let cache = Self::new();
        for (name, value) in entries {
            cache.set(name, Arc::from(value));
        }
        cache
    }

    pub fn peek(&self, name: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(name)
            .map(|v| v.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl AnswerCache for MockAnswerCache {
    fn get(&self, name: &str) -> Option<Arc<str>> {
        self.entries.lock().unwrap().get(name).cloned()
    }

    fn set(&self, name: &str, value: Arc<str>) {
        self.entries.lock().unwrap().insert(name.to_string(), value);
    }
}

// ============================================================================
// Recording event sink
// ============================================================================

#[derive(Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<ResolutionEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ResolutionEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Terminal state of the most recent resolution.
    pub fn last_termination(&self) -> Option<(Termination, usize)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|event| match event {
                ResolutionEvent::Terminated {
                    termination, hops, ..
                } => Some((*termination, *hops)),
                _ => None,
            })
    }

    pub fn backend_errors(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, ResolutionEvent::BackendError { .. }))
            .count()
    }
}

impl ResolutionEventSink for RecordingEventSink {
    fn record(&self, event: ResolutionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ============================================================================
// Mock RuleSource
// ============================================================================

pub struct MockRuleSource {
    text: Option<String>,
}

impl MockRuleSource {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    pub fn unreadable() -> Self {
        Self { text: None }
    }
}

#[async_trait]
impl RuleSource for MockRuleSource {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    async fn load(&self) -> Result<RuleSet, DomainError> {
        match &self.text {
            Some(text) => Ok(RuleSet::parse(text)),
            None => Err(DomainError::IoError("mock source unreadable".to_string())),
        }
    }
}

// ============================================================================
// Fixture
// ============================================================================

pub struct Fixture {
    pub backend: MockResolverBackend,
    pub cache: MockAnswerCache,
    pub events: RecordingEventSink,
    pub use_case: ResolveDomainUseCase,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_cache(MockAnswerCache::new())
    }

    pub fn with_cache(cache: MockAnswerCache) -> Self {
        let backend = MockResolverBackend::new();
        let events = RecordingEventSink::new();
        let use_case = ResolveDomainUseCase::new(
            Arc::new(backend.clone()),
            Arc::new(cache.clone()),
            Arc::new(events.clone()),
        );
        Self {
            backend,
            cache,
            events,
            use_case,
        }
    }
}
