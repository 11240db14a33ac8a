pub mod answer_cache;
pub mod resolution_events;
pub mod resolver_backend;
pub mod rule_source;

pub use answer_cache::AnswerCache;
pub use resolution_events::{ResolutionEvent, ResolutionEventSink};
pub use resolver_backend::{PrimaryAnswer, RecordSet, ResolverBackend};
pub use rule_source::RuleSource;
