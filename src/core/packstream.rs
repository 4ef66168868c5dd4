//! # PackStream Encoding
//!
//! Minimal PackStream value encoding for Bolt client messages.
//!
//! PackStream is the compact, type-tagged binary serialization format used
//! by the Bolt protocol. Every value starts with a marker byte whose high
//! nibble encodes the type and whose low nibble encodes the size, for the
//! "tiny" size classes handled here:
//!
//! ```text
//! 0x80..=0x8F  tiny string     (0-15 UTF-8 bytes follow)
//! 0xA0..=0xAF  tiny map        (0-15 key/value pairs follow)
//! 0xB0..=0xBF  structure       (signature byte + 0-15 fields follow)
//! ```
//!
//! Markers are always computed from the actual byte length of the value;
//! values that do not fit the tiny size class are rejected before anything
//! is written. Extended size classes (8/16/32-bit lengths) are not needed
//! for the handshake message and are not modeled.
//!
//! All functions are pure byte producers with no I/O, so the encoding layer
//! is exhaustively testable without a socket.

use crate::error::{BoltError, Result};
use bytes::{BufMut, Bytes, BytesMut};

/// Marker base for tiny strings (length in the low nibble).
pub const TINY_STRING: u8 = 0x80;

/// Marker base for tiny maps (entry count in the low nibble).
pub const TINY_MAP: u8 = 0xA0;

/// Marker base for structures (field count in the low nibble).
pub const TINY_STRUCT: u8 = 0xB0;

/// Maximum payload size of any tiny value (strings: bytes, maps: entries,
/// structures: fields).
pub const TINY_MAX: usize = 0x0F;

/// Encodes `s` as a tiny string: marker `0x80 | len` followed by the UTF-8
/// bytes.
///
/// # Errors
/// Returns `BoltError::ValueTooLong` if `s` is longer than 15 bytes.
pub fn encode_tiny_string(buf: &mut BytesMut, s: &str) -> Result<()> {
    let len = s.len();
    if len > TINY_MAX {
        return Err(BoltError::ValueTooLong(len));
    }
    buf.put_u8(TINY_STRING | len as u8);
    buf.put_slice(s.as_bytes());
    Ok(())
}

/// Encodes `entries` as a tiny map: marker `0xA0 | n` followed by each
/// key/value pair as tiny strings, in insertion order.
///
/// # Errors
/// Returns `BoltError::MapTooLarge` if there are more than 15 entries, or
/// `BoltError::ValueTooLong` if any key or value is longer than 15 bytes.
pub fn encode_tiny_map(buf: &mut BytesMut, entries: &[(&str, &str)]) -> Result<()> {
    if entries.len() > TINY_MAX {
        return Err(BoltError::MapTooLarge(entries.len()));
    }
    buf.put_u8(TINY_MAP | entries.len() as u8);
    for (key, value) in entries {
        encode_tiny_string(buf, key)?;
        encode_tiny_string(buf, value)?;
    }
    Ok(())
}

/// Encodes a structure: marker `0xB0 | n`, the signature byte identifying
/// the message kind, then each pre-encoded field in order.
///
/// # Errors
/// Returns `BoltError::StructureTooLarge` if there are more than 15 fields.
pub fn encode_structure(buf: &mut BytesMut, signature: u8, fields: &[Bytes]) -> Result<()> {
    if fields.len() > TINY_MAX {
        return Err(BoltError::StructureTooLarge(fields.len()));
    }
    buf.put_u8(TINY_STRUCT | fields.len() as u8);
    buf.put_u8(signature);
    for field in fields {
        buf.put_slice(field);
    }
    Ok(())
}

/// Decodes a tiny string, returning the string and the number of bytes
/// consumed.
///
/// # Errors
/// Returns `BoltError::Decode` on a wrong marker, truncated input, or
/// invalid UTF-8.
pub fn decode_tiny_string(input: &[u8]) -> Result<(String, usize)> {
    let marker = *input
        .first()
        .ok_or_else(|| BoltError::Decode("empty input".into()))?;
    if marker & 0xF0 != TINY_STRING {
        return Err(BoltError::Decode(format!(
            "expected tiny string marker, got 0x{marker:02X}"
        )));
    }
    let len = (marker & 0x0F) as usize;
    let payload = input
        .get(1..1 + len)
        .ok_or_else(|| BoltError::Decode("truncated tiny string".into()))?;
    let s = std::str::from_utf8(payload)
        .map_err(|e| BoltError::Decode(format!("invalid UTF-8 in string: {e}")))?;
    Ok((s.to_string(), 1 + len))
}

/// Decodes a tiny map of string keys and string values, returning the
/// entries in wire order and the number of bytes consumed.
///
/// # Errors
/// Returns `BoltError::Decode` on a wrong marker or truncated input.
pub fn decode_tiny_map(input: &[u8]) -> Result<(Vec<(String, String)>, usize)> {
    let marker = *input
        .first()
        .ok_or_else(|| BoltError::Decode("empty input".into()))?;
    if marker & 0xF0 != TINY_MAP {
        return Err(BoltError::Decode(format!(
            "expected tiny map marker, got 0x{marker:02X}"
        )));
    }
    let count = (marker & 0x0F) as usize;
    let mut entries = Vec::with_capacity(count);
    let mut offset = 1;
    for _ in 0..count {
        let (key, used) = decode_tiny_string(&input[offset..])?;
        offset += used;
        let (value, used) = decode_tiny_string(&input[offset..])?;
        offset += used;
        entries.push((key, value));
    }
    Ok((entries, offset))
}

/// Decodes a structure header, returning `(signature, field_count,
/// header_len)`. Field payloads follow the header and are decoded by the
/// caller, which knows their types.
///
/// # Errors
/// Returns `BoltError::Decode` on a wrong marker or truncated input.
pub fn decode_structure_header(input: &[u8]) -> Result<(u8, usize, usize)> {
    if input.len() < 2 {
        return Err(BoltError::Decode("truncated structure header".into()));
    }
    let marker = input[0];
    if marker & 0xF0 != TINY_STRUCT {
        return Err(BoltError::Decode(format!(
            "expected structure marker, got 0x{marker:02X}"
        )));
    }
    Ok((input[1], (marker & 0x0F) as usize, 2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn tiny_string_roundtrip() {
        for s in ["", "a", "neo4j", "basic", "exactly15bytes!"] {
            let mut buf = BytesMut::new();
            encode_tiny_string(&mut buf, s).expect("encode");
            assert_eq!(buf[0], TINY_STRING | s.len() as u8);
            assert_eq!(buf.len(), 1 + s.len());

            let (decoded, used) = decode_tiny_string(&buf).expect("decode");
            assert_eq!(decoded, s);
            assert_eq!(used, buf.len());
        }
    }

    #[test]
    fn tiny_string_too_long_rejected() {
        let mut buf = BytesMut::new();
        let result = encode_tiny_string(&mut buf, "sixteen bytes!!!");
        assert!(matches!(result, Err(BoltError::ValueTooLong(16))));
        // Nothing may be written when validation fails.
        assert!(buf.is_empty());
    }

    #[test]
    fn tiny_string_multibyte_length_is_bytes_not_chars() {
        // 6 chars but 18 UTF-8 bytes.
        let mut buf = BytesMut::new();
        let result = encode_tiny_string(&mut buf, "日本語日本語");
        assert!(matches!(result, Err(BoltError::ValueTooLong(18))));
    }

    #[test]
    fn tiny_map_length_is_marker_plus_entries() {
        let entries = [("scheme", "basic"), ("principal", "neo4j")];
        let mut buf = BytesMut::new();
        encode_tiny_map(&mut buf, &entries).expect("encode");

        assert_eq!(buf[0], TINY_MAP | 2);
        let expected: usize = 1 + entries
            .iter()
            .map(|(k, v)| 2 + k.len() + v.len())
            .sum::<usize>();
        assert_eq!(buf.len(), expected);
    }

    #[test]
    fn tiny_map_roundtrip_preserves_order() {
        let entries = [("b", "2"), ("a", "1"), ("c", "3")];
        let mut buf = BytesMut::new();
        encode_tiny_map(&mut buf, &entries).expect("encode");

        let (decoded, used) = decode_tiny_map(&buf).expect("decode");
        assert_eq!(used, buf.len());
        let expected: Vec<_> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn tiny_map_too_many_entries_rejected() {
        let entries: Vec<(&str, &str)> = (0..16).map(|_| ("k", "v")).collect();
        let mut buf = BytesMut::new();
        let result = encode_tiny_map(&mut buf, &entries);
        assert!(matches!(result, Err(BoltError::MapTooLarge(16))));
    }

    #[test]
    fn structure_header_roundtrip() {
        let mut field = BytesMut::new();
        encode_tiny_string(&mut field, "payload").expect("encode field");

        let mut buf = BytesMut::new();
        encode_structure(&mut buf, 0x01, &[field.freeze()]).expect("encode");
        assert_eq!(buf[0], TINY_STRUCT | 1);
        assert_eq!(buf[1], 0x01);

        let (sig, fields, header_len) = decode_structure_header(&buf).expect("decode");
        assert_eq!(sig, 0x01);
        assert_eq!(fields, 1);
        assert_eq!(header_len, 2);
    }

    #[test]
    fn decode_rejects_wrong_marker() {
        assert!(decode_tiny_string(&[0xA1, b'x']).is_err());
        assert!(decode_tiny_map(&[0x85]).is_err());
        assert!(decode_structure_header(&[0x85, 0x01]).is_err());
    }

    #[test]
    fn decode_rejects_truncated_input() {
        assert!(decode_tiny_string(&[0x85, b'a', b'b']).is_err());
        assert!(decode_tiny_string(&[]).is_err());
        assert!(decode_structure_header(&[0xB1]).is_err());
    }
}
