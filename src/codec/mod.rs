//! This module contains decoders for the payload compression methods
//! a book-pack archive may use.

mod copy;
pub mod lh5;
pub use copy::*;
pub use lh5::Lh5;

use alloc::vec::Vec;
use core::convert::TryFrom;
use either::Either;
use thiserror::Error;

/// The main interface trait for other code to use.
///
/// All codecs must implement it.
pub trait Codec {
    /// Take the given data buffer and decode it.
    ///
    /// Any required additional information that the codec can't deduce from the data stream
    /// (sizes, mostly) must be passed via the codec-specific constructor.
    ///
    /// Codecs that don't transform their input hand back a subslice of it instead of a copy.
    fn decode<'a>(&self, data: &'a [u8]) -> Result<Either<&'a [u8], Vec<u8>>, CodecError>;
}

/// All currently supported codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codecs {
    /// As the name implies, the data is stored as-is.
    Stored,
    /// LHA's `-lh5-`: LZ77 with an 8 KiB window and static Huffman blocks.
    Lh5,
}

impl TryFrom<u16> for Codecs {
    type Error = CodecError;
    /// Parse a compression method as stored in global and local heads.
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => return Ok(Codecs::Stored),
            5 => return Ok(Codecs::Lh5),
            _ => return Err(CodecError::UnsupportedCompression(value)),
        }
    }
}

/// The top-level codec error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The archive names a compression method this crate can't decode.
    #[error("unsupported compression method {0}")]
    UnsupportedCompression(u16),
    /// The compressed input ends before the decoder could produce the expected output.
    #[error("decompression needs {requested} compressed bytes, only {available} available")]
    DecompressionUnderrun { requested: usize, available: usize },
    /// The compressed input decodes to something impossible.
    #[error("corrupt compressed stream: {0}")]
    CorruptStream(&'static str),
}
