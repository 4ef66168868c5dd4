//! # Bolt Protocol Layer
//!
//! Version negotiation and message construction on top of the core wire
//! encoding.
//!
//! ## Components
//! - **Version**: protocol version words and the 16-byte candidate offer
//! - **Handshake**: the preamble / offer / reply state machine
//! - **Message**: the HELLO authentication structure

pub mod handshake;
pub mod message;
pub mod version;

/// Message signature bytes.
pub mod sig {
    /// Authentication request (client → server).
    pub const HELLO: u8 = 0x01;
    /// Connection teardown (client → server).
    pub const GOODBYE: u8 = 0x02;
    /// Request completed (server → client).
    pub const SUCCESS: u8 = 0x70;
    /// Request failed (server → client).
    pub const FAILURE: u8 = 0x7F;
}
