//! # Client Services
//!
//! High-level entry points assembled from the protocol and transport
//! layers.

pub mod driver;

pub use driver::{BoltDriver, HandshakeOutcome};
