use std::sync::Arc;

/// Name → answer store consulted before every backend lookup.
///
/// `get` and `set` must each be safe under concurrent use. Nothing stronger
/// is required: two calls that miss on the same name may both query and
/// both `set`, and the last write wins. Expiry and eviction are entirely up
/// to the implementation.
pub trait AnswerCache: Send + Sync {
    fn get(&self, name: &str) -> Option<Arc<str>>;

    fn set(&self, name: &str, value: Arc<str>);
}
