//! splitdns Application Layer
//!
//! Ports describe the collaborators the resolver consumes (DoH backend,
//! answer cache, event sink, rule source); use cases drive them.
pub mod ports;
pub mod use_cases;
