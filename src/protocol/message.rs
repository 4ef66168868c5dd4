//! # Message Building
//!
//! Assembles client request messages as PackStream structures. Only the
//! authentication message ("HELLO") is modeled; other message kinds follow
//! the same shape with a different signature byte and field set.
//!
//! The HELLO message is a structure with one field, a map of exactly four
//! credential entries in a fixed wire order:
//!
//! ```text
//! [0xB1] [0x01] [0xA4] [user_agent] [scheme] [principal] [credentials]
//! ```
//!
//! Size markers are computed from the actual byte length of each value, and
//! any value that does not fit the tiny size class is rejected before a
//! single byte is framed.

use crate::core::chunk;
use crate::core::packstream;
use crate::error::Result;
use crate::protocol::sig;
use bytes::{Bytes, BytesMut};

/// Credential field keys in their fixed encoding order.
const AUTH_KEYS: [&str; 4] = ["user_agent", "scheme", "principal", "credentials"];

/// Authentication fields carried by the HELLO message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCredentials {
    /// Client name and version reported to the server.
    pub user_agent: String,
    /// Authentication scheme, e.g. `basic`.
    pub scheme: String,
    /// Principal to authenticate as (the user name for `basic`).
    pub principal: String,
    /// Proof of identity (the password for `basic`).
    pub credentials: String,
}

impl AuthCredentials {
    /// Credentials for the `basic` authentication scheme.
    pub fn basic(
        user_agent: impl Into<String>,
        principal: impl Into<String>,
        credentials: impl Into<String>,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            scheme: "basic".into(),
            principal: principal.into(),
            credentials: credentials.into(),
        }
    }

    /// The field values in wire order, paired with their keys.
    fn entries(&self) -> [(&str, &str); 4] {
        [
            (AUTH_KEYS[0], &self.user_agent),
            (AUTH_KEYS[1], &self.scheme),
            (AUTH_KEYS[2], &self.principal),
            (AUTH_KEYS[3], &self.credentials),
        ]
    }
}

/// Builds the HELLO structure body: `0xB1`, signature `0x01`, then the
/// four-entry credential map.
///
/// # Errors
/// Returns an encoding error if any field exceeds the tiny-string limit.
/// Validation happens before anything is written.
pub fn build_hello(credentials: &AuthCredentials) -> Result<Bytes> {
    let mut map = BytesMut::new();
    packstream::encode_tiny_map(&mut map, &credentials.entries())?;

    let mut body = BytesMut::with_capacity(map.len() + 2);
    packstream::encode_structure(&mut body, sig::HELLO, &[map.freeze()])?;
    Ok(body.freeze())
}

/// Builds the complete ready-to-send HELLO frame: the structure body with
/// its chunk length prefix and end-of-message terminator.
///
/// # Errors
/// Propagates encoding errors from `build_hello` and framing.
pub fn build_hello_frame(credentials: &AuthCredentials) -> Result<Bytes> {
    let body = build_hello(credentials)?;
    chunk::frame_message(&body)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::core::packstream::{decode_structure_header, decode_tiny_map};
    use crate::error::BoltError;

    #[test]
    fn hello_frame_layout() {
        let creds = AuthCredentials::basic("TestAgent", "neo4j", "pass");
        let frame = build_hello_frame(&creds).expect("build");

        // 2-byte length prefix covers the body, not the terminator.
        let body_len = u16::from_be_bytes([frame[0], frame[1]]) as usize;
        assert_eq!(body_len, frame.len() - 4);

        // Structure-of-1 marker and HELLO signature.
        assert_eq!(frame[2], 0xB1);
        assert_eq!(frame[3], 0x01);

        assert_eq!(&frame[frame.len() - 2..], &[0x00, 0x00]);
    }

    #[test]
    fn hello_roundtrips_to_ordered_credentials() {
        let creds = AuthCredentials::basic("TestAgent", "neo4j", "pass");
        let body = build_hello(&creds).expect("build");

        let (sig, field_count, header_len) = decode_structure_header(&body).expect("header");
        assert_eq!(sig, sig::HELLO);
        assert_eq!(field_count, 1);

        let (entries, used) = decode_tiny_map(&body[header_len..]).expect("map");
        assert_eq!(header_len + used, body.len());
        assert_eq!(
            entries,
            vec![
                ("user_agent".to_string(), "TestAgent".to_string()),
                ("scheme".to_string(), "basic".to_string()),
                ("principal".to_string(), "neo4j".to_string()),
                ("credentials".to_string(), "pass".to_string()),
            ]
        );
    }

    #[test]
    fn hello_matches_known_wire_image() {
        // Known-good wire image: a 75-byte body for these exact
        // credentials.
        let creds = AuthCredentials {
            user_agent: "Fbiville/0.0.0".into(),
            scheme: "basic".into(),
            principal: "neo4j".into(),
            credentials: "toto".into(),
        };
        let frame = build_hello_frame(&creds).expect("build");

        assert_eq!(&frame[..4], &[0x00, 75, 0xB1, 0x01]);
        assert_eq!(frame[4], 0xA4);
        // First entry: 10-byte key "user_agent", 14-byte value.
        assert_eq!(frame[5], 0x8A);
        assert_eq!(&frame[6..16], b"user_agent");
        assert_eq!(frame[16], 0x8E);
        assert_eq!(&frame[17..31], b"Fbiville/0.0.0");
        assert_eq!(frame.len(), 75 + 4);
    }

    #[test]
    fn hello_rejects_oversized_field() {
        let creds = AuthCredentials::basic("agent-name-way-too-long", "neo4j", "pass");
        let result = build_hello(&creds);
        assert!(matches!(result, Err(BoltError::ValueTooLong(23))));
    }

    #[test]
    fn marker_tracks_actual_value_length() {
        // Substituting values of different lengths must re-derive markers
        // rather than reuse fixed ones.
        let short = AuthCredentials::basic("A", "u", "p");
        let body = build_hello(&short).expect("build");

        let (entries, _) = decode_tiny_map(&body[2..]).expect("map");
        assert_eq!(entries[0].1, "A");
        assert_eq!(entries[2].1, "u");
        assert_eq!(entries[3].1, "p");
    }
}
