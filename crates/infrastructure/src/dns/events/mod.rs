//! Resolution event sinks
//!
//! Adapters for the application's `ResolutionEventSink` port.
//!
//! ## Components
//!
//! - `ChannelEventSink`: Non-blocking forwarder to an unbounded channel
//! - `TracingEventSink`: Renders every event as a `tracing` record
//! - `ResolutionMetrics`: Atomic counters fed by events
//! - `FanoutEventSink`: Delivers each event to several sinks
//! - `NoopEventSink`: Discards everything
//!
//! ## Usage
//!
//! ```rust,no_run
//! use splitdns_infrastructure::dns::events::{ChannelEventSink, ResolutionMetrics};
//!
//! let (sink, mut rx) = ChannelEventSink::new_enabled();
//! let metrics = ResolutionMetrics::new();
//!
//! tokio::spawn(async move {
//!     while let Some(event) = rx.recv().await {
//!         metrics.track(&event);
//!     }
//! });
//! ```

pub mod emitter;
pub mod metrics;
pub mod tracing_sink;

pub use emitter::{ChannelEventSink, FanoutEventSink, NoopEventSink};
pub use metrics::ResolutionMetrics;
pub use tracing_sink::TracingEventSink;
