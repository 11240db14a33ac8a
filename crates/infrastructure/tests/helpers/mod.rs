#![allow(dead_code)]

pub mod wire;

pub use wire::{MockTransport, Reply, WireRecord};
