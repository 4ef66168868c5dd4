//! # Version Negotiation Handshake
//!
//! Client side of the Bolt handshake: send the 4-byte magic preamble, offer
//! up to four candidate versions, and read back the server's choice.
//!
//! The exchange is modeled as an explicit state machine so steps cannot run
//! out of order:
//!
//! ```text
//! Disconnected → PreambleSent → VersionsSent → Negotiated | Rejected
//! ```
//!
//! The negotiation is atomic from the caller's perspective: it either yields
//! a negotiated version or fails. A transport error at any step aborts the
//! handshake with no retry — the protocol offers no partial-negotiation
//! recovery. The candidate list is supplied at construction and never
//! changes afterwards.

use crate::error::{constants, BoltError, Result};
use crate::protocol::version::{ProtocolVersion, VersionOffer, BOLT_MAGIC};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

/// Phase of the version negotiation exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakePhase {
    /// No bytes exchanged yet.
    Disconnected,
    /// The magic preamble has been written.
    PreambleSent,
    /// The 16-byte version offer has been written.
    VersionsSent,
    /// The server accepted one of the offered versions.
    Negotiated(ProtocolVersion),
    /// The server rejected every offered version.
    Rejected,
}

/// Client-side version negotiator.
///
/// Owns the candidate version list and tracks the exchange phase; the byte
/// stream is borrowed per step, so the negotiator works over any duplex
/// transport.
#[derive(Debug)]
pub struct Negotiator {
    offer: VersionOffer,
    phase: HandshakePhase,
}

impl Negotiator {
    /// Creates a negotiator that will offer the given candidate versions.
    pub fn new(offer: VersionOffer) -> Self {
        Self {
            offer,
            phase: HandshakePhase::Disconnected,
        }
    }

    /// Current phase of the exchange.
    pub fn phase(&self) -> HandshakePhase {
        self.phase
    }

    /// Writes the fixed 4-byte magic preamble identifying the protocol
    /// family.
    ///
    /// # Errors
    /// Returns `BoltError::HandshakeState` if called out of order, or a
    /// transport error if the write fails.
    pub async fn send_preamble<S>(&mut self, stream: &mut S) -> Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        if self.phase != HandshakePhase::Disconnected {
            return Err(BoltError::HandshakeState(constants::ERR_HANDSHAKE_FINISHED));
        }
        stream.write_all(&BOLT_MAGIC).await?;
        self.phase = HandshakePhase::PreambleSent;
        debug!("sent Bolt magic preamble");
        Ok(())
    }

    /// Writes the version offer: exactly 16 bytes, four big-endian words in
    /// preference order with unused slots zero-filled.
    ///
    /// # Errors
    /// Returns `BoltError::HandshakeState` if the preamble has not been
    /// sent, or a transport error if the write fails.
    pub async fn send_version_offer<S>(&mut self, stream: &mut S) -> Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        if self.phase != HandshakePhase::PreambleSent {
            return Err(BoltError::HandshakeState(constants::ERR_PREAMBLE_NOT_SENT));
        }
        stream.write_all(&self.offer.to_wire()).await?;
        self.phase = HandshakePhase::VersionsSent;
        debug!(candidates = self.offer.versions().len(), "sent version offer");
        Ok(())
    }

    /// Reads the server's 4-byte reply. An all-zero word means the server
    /// accepted none of the offered versions.
    ///
    /// # Errors
    /// Returns `BoltError::HandshakeState` if the offer has not been sent,
    /// `BoltError::Negotiation` on rejection, or a transport error if the
    /// read fails.
    pub async fn read_agreed_version<S>(&mut self, stream: &mut S) -> Result<ProtocolVersion>
    where
        S: AsyncRead + Unpin,
    {
        if self.phase != HandshakePhase::VersionsSent {
            return Err(BoltError::HandshakeState(constants::ERR_OFFER_NOT_SENT));
        }
        let mut word = [0u8; 4];
        stream.read_exact(&mut word).await?;

        match ProtocolVersion::from_wire(word) {
            Some(version) => {
                self.phase = HandshakePhase::Negotiated(version);
                debug!(%version, "server agreed on protocol version");
                Ok(version)
            }
            None => {
                self.phase = HandshakePhase::Rejected;
                Err(BoltError::Negotiation(
                    constants::ERR_NO_COMMON_VERSION.into(),
                ))
            }
        }
    }

    /// Runs the full exchange: preamble, offer, server reply.
    #[instrument(skip(self, stream))]
    pub async fn negotiate<S>(&mut self, stream: &mut S) -> Result<ProtocolVersion>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        self.send_preamble(stream).await?;
        self.send_version_offer(stream).await?;
        self.read_agreed_version(stream).await
    }
}
