pub mod backend;
pub mod cache;
pub mod events;
pub mod forwarding;
pub mod transport;

pub use backend::DohBackend;
pub use cache::{CacheMetrics, MemoryAnswerCache};
pub use events::{
    ChannelEventSink, FanoutEventSink, NoopEventSink, ResolutionMetrics, TracingEventSink,
};
pub use transport::{DnsTransport, HttpsTransport};
