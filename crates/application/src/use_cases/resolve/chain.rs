use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Per-call walk state: where the chain currently points and every name it
/// has already stood on.
pub(super) struct ResolutionChain {
    requested: Arc<str>,
    current: Arc<str>,
    visited: FxHashSet<Arc<str>>,
    hops: usize,
}

impl ResolutionChain {
    pub(super) fn new(domain: &str) -> Self {
        let requested: Arc<str> = Arc::from(domain);
        Self {
            current: Arc::clone(&requested),
            requested,
            visited: FxHashSet::default(),
            hops: 0,
        }
    }

    /// Step onto `current`, consuming one hop.
    ///
    /// Returns false when `current` was already visited in this call.
    pub(super) fn enter(&mut self) -> bool {
        self.hops += 1;
        self.visited.insert(Arc::clone(&self.current))
    }

    pub(super) fn advance(&mut self, target: Arc<str>) {
        self.current = target;
    }

    pub(super) fn requested(&self) -> &Arc<str> {
        &self.requested
    }

    pub(super) fn current(&self) -> &Arc<str> {
        &self.current
    }

    pub(super) fn hops(&self) -> usize {
        self.hops
    }
}
