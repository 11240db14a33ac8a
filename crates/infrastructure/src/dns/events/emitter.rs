use splitdns_application::ports::{ResolutionEvent, ResolutionEventSink};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Non-blocking event sink backed by an unbounded channel.
///
/// Sending never awaits, so it is safe to call from the resolution path.
/// If the sink is disabled or the receiver is gone, events are silently
/// dropped.
#[derive(Clone)]
pub struct ChannelEventSink {
    /// - Some: events are sent
    /// - None: `record()` is a no-op
    sender: Option<mpsc::UnboundedSender<ResolutionEvent>>,
}

impl ChannelEventSink {
    pub fn new_disabled() -> Self {
        Self { sender: None }
    }

    /// Creates an enabled sink and returns the receiver for the consumer.
    pub fn new_enabled() -> (Self, mpsc::UnboundedReceiver<ResolutionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Self { sender: Some(tx) };
        (sink, rx)
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }
}

impl ResolutionEventSink for ChannelEventSink {
    fn record(&self, event: ResolutionEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event);
        }
    }
}

impl Default for ChannelEventSink {
    fn default() -> Self {
        Self::new_disabled()
    }
}

impl std::fmt::Debug for ChannelEventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelEventSink")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl ResolutionEventSink for NoopEventSink {
    fn record(&self, _event: ResolutionEvent) {}
}

/// Delivers each event to every inner sink, in insertion order.
#[derive(Clone, Default)]
pub struct FanoutEventSink {
    sinks: Vec<Arc<dyn ResolutionEventSink>>,
}

impl FanoutEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn ResolutionEventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ResolutionEventSink for FanoutEventSink {
    fn record(&self, event: ResolutionEvent) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.record(event.clone());
            }
            last.record(event);
        }
    }
}

impl std::fmt::Debug for FanoutEventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutEventSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
