//! # Protocol Version Negotiation Types
//!
//! Bolt versions travel as 4-byte big-endian words whose two low-order
//! bytes carry the minor and major version numbers:
//!
//! ```text
//! [0x00] [0x00] [Minor(1)] [Major(1)]
//! ```
//!
//! A client offers up to four candidate versions in preference order; the
//! offer is always transmitted as exactly 16 bytes, with unused slots
//! zero-filled.

use crate::error::{BoltError, Result};
use serde::{Deserialize, Serialize};

/// Bolt magic preamble bytes, sent before the version offer.
pub const BOLT_MAGIC: [u8; 4] = [0x60, 0x60, 0xB0, 0x17];

/// Maximum number of candidate versions in one offer (protocol framing
/// constraint).
pub const MAX_OFFERED_VERSIONS: usize = 4;

/// Wire size of a version offer: four 4-byte big-endian words.
pub const OFFER_WIRE_LEN: usize = 16;

/// A Bolt protocol version as a (major, minor) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtocolVersion {
    pub major: u8,
    pub minor: u8,
}

impl ProtocolVersion {
    /// Creates a version from its major and minor numbers.
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Encodes the version as a 4-byte big-endian word.
    pub const fn to_wire(self) -> [u8; 4] {
        [0, 0, self.minor, self.major]
    }

    /// The raw 32-bit value as it appears on the wire.
    pub const fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.to_wire())
    }

    /// Decodes a 4-byte big-endian word into a version. Returns `None` for
    /// the all-zero "no version" word.
    pub fn from_wire(word: [u8; 4]) -> Option<Self> {
        let value = u32::from_be_bytes(word);
        if value == 0 {
            return None;
        }
        Some(Self {
            major: word[3],
            minor: word[2],
        })
    }
}

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// An ordered offer of up to four candidate versions, most preferred first.
///
/// Built once at negotiator construction and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionOffer {
    versions: Vec<ProtocolVersion>,
}

impl VersionOffer {
    /// Creates an offer from a preference-ordered list of versions.
    ///
    /// # Errors
    /// Returns `BoltError::Config` if the list is empty or holds more than
    /// four versions.
    pub fn new(versions: Vec<ProtocolVersion>) -> Result<Self> {
        if versions.is_empty() {
            return Err(BoltError::Config(
                "version offer must contain at least one version".into(),
            ));
        }
        if versions.len() > MAX_OFFERED_VERSIONS {
            return Err(BoltError::Config(format!(
                "version offer holds {} versions (maximum {})",
                versions.len(),
                MAX_OFFERED_VERSIONS
            )));
        }
        Ok(Self { versions })
    }

    /// The offered versions in preference order.
    pub fn versions(&self) -> &[ProtocolVersion] {
        &self.versions
    }

    /// Encodes the offer as exactly 16 wire bytes, zero-padding unused
    /// slots.
    pub fn to_wire(&self) -> [u8; OFFER_WIRE_LEN] {
        let mut wire = [0u8; OFFER_WIRE_LEN];
        for (slot, version) in self.versions.iter().enumerate() {
            wire[slot * 4..slot * 4 + 4].copy_from_slice(&version.to_wire());
        }
        wire
    }
}

impl Default for VersionOffer {
    /// Offers only Bolt 4.0.
    fn default() -> Self {
        Self {
            versions: vec![ProtocolVersion::new(4, 0)],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn version_wire_encoding() {
        assert_eq!(ProtocolVersion::new(4, 0).to_wire(), [0, 0, 0, 4]);
        assert_eq!(ProtocolVersion::new(4, 1).to_wire(), [0, 0, 1, 4]);
        assert_eq!(ProtocolVersion::new(4, 1).as_u32(), 260);
    }

    #[test]
    fn version_from_wire() {
        assert_eq!(
            ProtocolVersion::from_wire([0, 0, 1, 4]),
            Some(ProtocolVersion::new(4, 1))
        );
        assert_eq!(ProtocolVersion::from_wire([0, 0, 0, 0]), None);
    }

    #[test]
    fn offer_pads_to_sixteen_bytes() {
        let offer = VersionOffer::default();
        let wire = offer.to_wire();
        assert_eq!(wire.len(), OFFER_WIRE_LEN);
        assert_eq!(&wire[..4], &[0, 0, 0, 4]);
        assert_eq!(&wire[4..], &[0u8; 12]);
    }

    #[test]
    fn offer_preserves_preference_order() {
        let offer = VersionOffer::new(vec![
            ProtocolVersion::new(4, 1),
            ProtocolVersion::new(4, 0),
            ProtocolVersion::new(3, 0),
        ])
        .expect("valid offer");

        let wire = offer.to_wire();
        assert_eq!(&wire[..4], &[0, 0, 1, 4]);
        assert_eq!(&wire[4..8], &[0, 0, 0, 4]);
        assert_eq!(&wire[8..12], &[0, 0, 0, 3]);
        assert_eq!(&wire[12..], &[0, 0, 0, 0]);
    }

    #[test]
    fn offer_rejects_empty_and_oversized_lists() {
        assert!(VersionOffer::new(vec![]).is_err());

        let five = vec![ProtocolVersion::new(4, 0); 5];
        assert!(VersionOffer::new(five).is_err());
    }

    #[test]
    fn version_display() {
        assert_eq!(ProtocolVersion::new(4, 1).to_string(), "4.1");
    }
}
