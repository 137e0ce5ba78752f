//! This module provides the top-level error type for this crate.

use crate::codec::CodecError;
use crate::parser::{TadParserError, TadParserErrorKind};

use alloc::string::String;
use core::convert::From;
use thiserror::Error;

/// The top-level error type for this crate.
///
/// Parser errors point into the buffer they were raised on. They are converted to byte offsets
/// here, so the error does not borrow the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A segment, record or escape ladder declares more bytes than the buffer holds.
    #[error("truncated at byte {offset}: {declared} bytes declared, {available} available")]
    TruncatedSegment {
        offset: usize,
        declared: u64,
        available: usize,
    },
    #[error("unsupported compression method {0}")]
    UnsupportedCompression(u16),
    #[error("decompression needs {requested} compressed bytes, only {available} available")]
    DecompressionUnderrun { requested: usize, available: usize },
    #[error("corrupt compressed stream: {0}")]
    CorruptStream(&'static str),
    /// A fixed-layout structure could not be read.
    #[error("malformed {context} at byte {offset}")]
    Malformed {
        context: &'static str,
        offset: usize,
    },
    /// Only raised when CRC mismatches are configured to be fatal.
    #[error("crc mismatch: header says {expected:#06x}, data gives {actual:#06x}")]
    CrcMismatch { expected: u16, actual: u16 },
    #[error("no file named {0:?} in the archive")]
    NoSuchFileName(String),
    #[error("decoding was cancelled")]
    Cancelled,
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        return match e {
            CodecError::UnsupportedCompression(m) => Error::UnsupportedCompression(m),
            CodecError::DecompressionUnderrun {
                requested,
                available,
            } => Error::DecompressionUnderrun {
                requested,
                available,
            },
            CodecError::CorruptStream(what) => Error::CorruptStream(what),
        };
    }
}

/// Byte offset of `at` inside `base`. `at` must be a subslice of `base`.
fn offset_in(base: &[u8], at: &[u8]) -> usize {
    let start = base.as_ptr() as usize;
    let here = at.as_ptr() as usize;
    return here.saturating_sub(start).min(base.len());
}

impl Error {
    /// Convert a parser error raised somewhere inside `base`.
    pub(crate) fn from_parser(base: &[u8], e: TadParserError<&[u8]>) -> Error {
        let context = e.innermost_context();
        return match e.kind {
            TadParserErrorKind::TruncatedSegment {
                at,
                declared,
                available,
            } => Error::TruncatedSegment {
                offset: offset_in(base, at),
                declared,
                available,
            },
            TadParserErrorKind::UnsupportedCompression(m) => Error::UnsupportedCompression(m),
            TadParserErrorKind::Nom(at, _) => Error::Malformed {
                context,
                offset: offset_in(base, at),
            },
            TadParserErrorKind::ToUsizeConversionFailure(_) => Error::Malformed {
                context,
                offset: base.len(),
            },
        };
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::truncated;

    #[test]
    fn parser_offsets_are_relative_to_the_base() {
        let buf = [0u8; 10];
        let e = match truncated(&buf[4..], 12, 6) {
            nom::Err::Failure(e) => e,
            _ => unreachable!(),
        };
        assert_eq!(
            Error::from_parser(&buf, e),
            Error::TruncatedSegment {
                offset: 4,
                declared: 12,
                available: 6
            }
        );
    }

    #[test]
    fn codec_errors_map_one_to_one() {
        assert_eq!(
            Error::from(CodecError::UnsupportedCompression(7)),
            Error::UnsupportedCompression(7)
        );
        assert_eq!(
            Error::from(CodecError::CorruptStream("x")),
            Error::CorruptStream("x")
        );
    }
}
