//! # Core Wire Components
//!
//! Low-level byte handling for the Bolt protocol: PackStream value encoding
//! and chunked message framing.
//!
//! ## Components
//! - **PackStream**: type-tagged binary value encoding (strings, maps, structures)
//! - **Chunk**: message framing with length prefix and end-of-message terminator
//!
//! ## Wire Format
//! ```text
//! [ChunkLength(2)] [Marker(1)] [Signature(1)] [Fields(N)] [0x00 0x00]
//! ```
//!
//! Both layers are pure byte transforms, validated before anything reaches
//! the wire, and testable without a socket.

pub mod chunk;
pub mod packstream;
