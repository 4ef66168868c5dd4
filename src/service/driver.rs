//! # Bolt Driver
//!
//! High-level client flow: connect, negotiate a protocol version, send the
//! HELLO authentication message, and hand the server's raw reply back to
//! the caller.
//!
//! The connection is a scoped resource: whichever step fails, it is closed
//! exactly once before the error propagates, and close failures never mask
//! the original error. The server's reply to HELLO is returned
//! uninterpreted; decoding it is the caller's concern.

use crate::config::DriverConfig;
use crate::core::chunk::ChunkCodec;
use crate::error::{BoltError, Result};
use crate::protocol::handshake::Negotiator;
use crate::protocol::message::{self, AuthCredentials};
use crate::protocol::version::ProtocolVersion;
use crate::transport::Connection;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio_util::codec::Framed;
use tracing::{info, instrument};

/// Result of a successful connect-and-authenticate exchange.
#[derive(Debug, Clone)]
pub struct HandshakeOutcome {
    /// The protocol version the server agreed to.
    pub version: ProtocolVersion,
    /// The raw body of the server's reply to HELLO, uninterpreted.
    pub server_response: Bytes,
}

/// Client driver for a Bolt server.
///
/// Holds only configuration; every `connect` call owns its connection and
/// buffers exclusively, so independent handshakes may run concurrently
/// without coordination.
#[derive(Debug, Clone)]
pub struct BoltDriver {
    config: DriverConfig,
}

impl BoltDriver {
    /// Creates a driver from a validated configuration.
    ///
    /// # Errors
    /// Returns `BoltError::Config` if the configuration is invalid.
    pub fn new(config: DriverConfig) -> Result<Self> {
        config.validate_strict()?;
        Ok(Self { config })
    }

    /// The driver's configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Connects, negotiates a version, authenticates, and returns the
    /// negotiated version together with the server's raw reply.
    ///
    /// # Errors
    /// Any transport, negotiation, or encoding failure aborts the whole
    /// exchange; the connection is closed before the error is returned.
    #[instrument(skip(self, credentials), fields(host = %self.config.host, port = self.config.port))]
    pub async fn connect(&self, credentials: &AuthCredentials) -> Result<HandshakeOutcome> {
        // Encoding needs no socket; validate the message before dialing.
        let hello = message::build_hello(credentials)?;

        let mut conn = Connection::connect(
            &self.config.host,
            self.config.port,
            self.config.connect_timeout,
        )
        .await?;

        let result = self.run_exchange(&mut conn, hello).await;
        conn.close().await;
        result
    }

    /// Connects using the `basic` scheme and the configured user agent.
    ///
    /// # Errors
    /// Same failure modes as [`connect`](Self::connect).
    pub async fn connect_basic(
        &self,
        principal: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<HandshakeOutcome> {
        let credentials = AuthCredentials::basic(self.config.user_agent.clone(), principal, secret);
        self.connect(&credentials).await
    }

    async fn run_exchange(&self, conn: &mut Connection, hello: Bytes) -> Result<HandshakeOutcome> {
        let mut negotiator = Negotiator::new(self.config.version_offer()?);
        let version = negotiator.negotiate(conn).await?;
        info!(%version, "negotiated protocol version");

        // Past negotiation the stream speaks chunked messages.
        let mut framed = Framed::new(conn, ChunkCodec);
        framed.send(hello).await?;

        let server_response = framed
            .next()
            .await
            .ok_or(BoltError::ConnectionClosed)??;
        info!(bytes = server_response.len(), "received authentication reply");

        Ok(HandshakeOutcome {
            version,
            server_response,
        })
    }
}
