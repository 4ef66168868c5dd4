//! # Error Types
//!
//! Comprehensive error handling for the Bolt client core.
//!
//! This module defines all error variants that can occur while connecting,
//! negotiating a protocol version, and encoding messages.
//!
//! ## Error Categories
//! - **Transport errors**: connection refused, read/write failures, timeouts
//! - **Negotiation errors**: server rejected every offered protocol version,
//!   or a handshake step was attempted out of order
//! - **Encoding errors**: a value does not fit its PackStream size class, or
//!   a frame body exceeds the maximum chunk length
//!
//! All errors implement `std::error::Error` for interoperability. None are
//! retried automatically; every failure is surfaced to the caller as a
//! distinct, inspectable variant.

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
/// Static strings are borrowed, avoiding heap allocations for common error cases.
pub mod constants {
    /// Negotiation errors
    pub const ERR_NO_COMMON_VERSION: &str = "no mutually supported protocol version";

    /// Handshake ordering errors
    pub const ERR_PREAMBLE_NOT_SENT: &str = "preamble must be sent before the version offer";
    pub const ERR_OFFER_NOT_SENT: &str = "version offer must be sent before reading the reply";
    pub const ERR_HANDSHAKE_FINISHED: &str = "handshake already completed";
}

// BoltError is the primary error type for all driver operations
#[derive(Error, Debug)]
pub enum BoltError {
    #[error("Transport error: {0}")]
    Io(#[from] io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Connection timed out")]
    Timeout,

    #[error("Negotiation failed: {0}")]
    Negotiation(String),

    #[error("Handshake state error: {0}")]
    HandshakeState(&'static str),

    #[error("String too long for tiny encoding: {0} bytes")]
    ValueTooLong(usize),

    #[error("Map too large for tiny encoding: {0} entries")]
    MapTooLarge(usize),

    #[error("Structure too large for tiny encoding: {0} fields")]
    StructureTooLarge(usize),

    #[error("Frame body too large: {0} bytes")]
    OversizedFrame(usize),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Results using BoltError
pub type Result<T> = std::result::Result<T, BoltError>;
