//! splitdns Infrastructure Layer
//!
//! Concrete adapters for the application ports: the DNS-over-HTTPS backend,
//! the in-memory answer cache, resolution event sinks and the rule file.
pub mod dns;
pub mod rules;
