//! # Chunked Message Framing
//!
//! Bolt transfers each message in chunks: a 2-byte big-endian length prefix,
//! the chunk body, and a 2-byte `0x0000` end-of-message terminator. The
//! messages in scope here always fit a single chunk.
//!
//! ```text
//! [Length(2, BE)] [Body(N)] [0x00 0x00]
//! ```
//!
//! `frame_message`/`unframe_message` are pure byte transforms; `ChunkCodec`
//! exposes the same rules as a tokio codec so the post-handshake message
//! phase can run through `Framed`.

use crate::error::{BoltError, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Maximum body length representable by the 2-byte chunk header.
pub const MAX_CHUNK_BODY: usize = 0xFFFF;

/// End-of-message terminator.
pub const MESSAGE_END: [u8; 2] = [0x00, 0x00];

/// Frames `body` as a single chunk: length prefix, body, terminator.
///
/// # Errors
/// Returns `BoltError::OversizedFrame` if `body` exceeds 65535 bytes.
pub fn frame_message(body: &[u8]) -> Result<Bytes> {
    if body.len() > MAX_CHUNK_BODY {
        return Err(BoltError::OversizedFrame(body.len()));
    }
    let mut framed = BytesMut::with_capacity(body.len() + 4);
    framed.put_u16(body.len() as u16);
    framed.put_slice(body);
    framed.put_slice(&MESSAGE_END);
    Ok(framed.freeze())
}

/// Extracts the body of a single-chunk message, validating the length
/// prefix and the terminator. Returns the body and the total bytes consumed.
///
/// # Errors
/// Returns `BoltError::Decode` on a truncated frame or missing terminator.
pub fn unframe_message(input: &[u8]) -> Result<(Bytes, usize)> {
    if input.len() < 2 {
        return Err(BoltError::Decode("truncated chunk header".into()));
    }
    let body_len = u16::from_be_bytes([input[0], input[1]]) as usize;
    let total = 2 + body_len + 2;
    if input.len() < total {
        return Err(BoltError::Decode("truncated chunk body".into()));
    }
    if input[2 + body_len..total] != MESSAGE_END {
        return Err(BoltError::Decode("missing end-of-message terminator".into()));
    }
    Ok((Bytes::copy_from_slice(&input[2..2 + body_len]), total))
}

/// Tokio codec for single-chunk Bolt messages.
///
/// Encoding frames the message body; decoding yields complete message
/// bodies and leaves partial frames in the buffer for the next read.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChunkCodec;

impl Encoder<Bytes> for ChunkCodec {
    type Error = BoltError;

    fn encode(&mut self, body: Bytes, dst: &mut BytesMut) -> Result<()> {
        if body.len() > MAX_CHUNK_BODY {
            return Err(BoltError::OversizedFrame(body.len()));
        }
        dst.reserve(body.len() + 4);
        dst.put_u16(body.len() as u16);
        dst.put_slice(&body);
        dst.put_slice(&MESSAGE_END);
        Ok(())
    }
}

impl Decoder for ChunkCodec {
    type Item = Bytes;
    type Error = BoltError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>> {
        if src.len() < 2 {
            return Ok(None);
        }
        let body_len = u16::from_be_bytes([src[0], src[1]]) as usize;
        let total = 2 + body_len + 2;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }
        if src[2 + body_len..total] != MESSAGE_END {
            return Err(BoltError::Decode("missing end-of-message terminator".into()));
        }
        src.advance(2);
        let body = src.split_to(body_len).freeze();
        src.advance(2);
        Ok(Some(body))
    }
}
