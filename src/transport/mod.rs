//! # Transport Layer
//!
//! Socket-level plumbing. The protocol layer never touches sockets
//! directly; it is written against `AsyncRead`/`AsyncWrite` and the
//! connect/send/receive/close contract exposed here.

pub mod tcp;

pub use tcp::Connection;
