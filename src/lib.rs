//! # bolt-driver
//!
//! Client-side core for the Bolt graph-database wire protocol.
//!
//! The crate covers the part of a Bolt client with real protocol-state
//! semantics and byte-exact framing:
//!
//! - **Version negotiation**: the magic preamble and the two-phase
//!   candidate/agreed version exchange ([`protocol::handshake`])
//! - **PackStream encoding**: the compact type-tagged binary format used to
//!   build the HELLO authentication message ([`core::packstream`])
//! - **Chunked framing**: length-prefixed, terminator-delimited message
//!   frames ([`core::chunk`])
//!
//! [`BoltDriver`] ties these together over a TCP transport: connect,
//! negotiate, authenticate, and return the server's raw reply. Response
//! decoding, TLS, pooling, and the wider Bolt message vocabulary are out of
//! scope.
//!
//! ## Example
//! ```no_run
//! use bolt_driver::{BoltDriver, DriverConfig};
//!
//! #[tokio::main]
//! async fn main() -> bolt_driver::Result<()> {
//!     let driver = BoltDriver::new(DriverConfig::default())?;
//!     let outcome = driver.connect_basic("neo4j", "secret").await?;
//!     println!("negotiated Bolt {}", outcome.version);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod service;
pub mod transport;

pub use config::DriverConfig;
pub use error::{BoltError, Result};
pub use protocol::handshake::{HandshakePhase, Negotiator};
pub use protocol::message::AuthCredentials;
pub use protocol::version::{ProtocolVersion, VersionOffer};
pub use service::{BoltDriver, HandshakeOutcome};
pub use transport::Connection;
