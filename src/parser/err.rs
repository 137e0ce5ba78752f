use alloc::vec::Vec;
use core::convert::TryFrom;
use core::fmt;
use nom::error::*;

/// The types of errors that may be returned by the parser.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TadParserErrorKind<I> {
    Nom(I, nom::error::ErrorKind),
    /// A segment, length field or escape ladder claims more bytes than the buffer holds.
    /// `at` is the input at the start of the offending unit.
    TruncatedSegment {
        at: I,
        declared: u64,
        available: usize,
    },
    // UnsupportedCompression(method)
    UnsupportedCompression(u16),
    ToUsizeConversionFailure(<usize as TryFrom<u64>>::Error),
}

/// The error type returned by all parsers.
#[derive(Debug, Clone)]
pub struct TadParserError<I> {
    /// What kind of error this is
    pub kind: TadParserErrorKind<I>,
    /// All the context we have accumulated from previous errors.
    pub ctx: Vec<(I, &'static str)>,
}

impl<I> ParseError<I> for TadParserError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        return TadParserError::new(TadParserErrorKind::Nom(input, kind));
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I> TadParserError<I> {
    /// Creates a new error.
    pub fn new(kind: TadParserErrorKind<I>) -> Self {
        return TadParserError {
            kind,
            ctx: Vec::new(),
        };
    }

    /// The innermost context label, if any parser attached one.
    pub fn innermost_context(&self) -> &'static str {
        return match self.ctx.first() {
            Some((_, label)) => label,
            None => "unlabelled parser",
        };
    }
}

impl<I> ContextError<I> for TadParserError<I> {
    fn add_context(_input: I, _ctx: &'static str, mut other: Self) -> Self {
        other.ctx.push((_input, _ctx));
        return other;
    }
}

impl<I> fmt::Display for TadParserError<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TadParserErrorKind::Nom(_, kind) => {
                write!(f, "{:?} in {}", kind, self.innermost_context())
            }
            TadParserErrorKind::TruncatedSegment {
                declared,
                available,
                ..
            } => write!(
                f,
                "truncated segment: {} bytes declared, {} available",
                declared, available
            ),
            TadParserErrorKind::UnsupportedCompression(m) => {
                write!(f, "unsupported compression method {}", m)
            }
            TadParserErrorKind::ToUsizeConversionFailure(e) => write!(f, "{}", e),
        }
    }
}

/// Build the failure returned when a unit runs past the end of the buffer.
pub fn truncated<I>(at: I, declared: u64, available: usize) -> nom::Err<TadParserError<I>> {
    return nom::Err::Failure(TadParserError::new(
        TadParserErrorKind::TruncatedSegment {
            at,
            declared,
            available,
        },
    ));
}

/// Unwrap a top-level nom result into the parser error.
///
/// Every parser in this crate works on complete input, so `Incomplete` is reported as truncation
/// of the whole input.
pub fn finish<'a, T>(
    input: &'a [u8],
    res: nom::IResult<&'a [u8], T, TadParserError<&'a [u8]>>,
) -> Result<(&'a [u8], T), TadParserError<&'a [u8]>> {
    return match res {
        Ok(v) => Ok(v),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e),
        Err(nom::Err::Incomplete(_)) => Err(TadParserError::new(
            TadParserErrorKind::TruncatedSegment {
                at: input,
                declared: input.len() as u64 + 1,
                available: input.len(),
            },
        )),
    };
}
