//! Custom nom parsers for the TAD format

mod bit;
pub use bit::*;
mod length;
pub use length::*;
mod escape;
pub use escape::*;
mod token;
pub use token::*;
mod archive;
pub use archive::*;
mod body;
pub use body::*;
#[cfg(test)]
mod test;

use super::convert::*;
use super::err::*;
use super::types::*;

use alloc::vec::*;

use nom::bytes::complete::take;
use nom::error::context;
use nom::multi::count;
use nom::number::complete::{le_u16, le_u32, u8};

/// Error type that all parsers return.
pub type TadResult<'a, T> = nom::IResult<&'a [u8], T, TadParserError<&'a [u8]>>;

/// Read `n` TRON characters and cut them at the first null.
pub fn tc_string(input: &[u8], n: usize) -> TadResult<U16String> {
    let (input, chars) = context("tc_string chars", count(le_u16, n))(input)?;
    return Ok((input, tc_from_words(&chars)));
}

/// Build a TRON string from words, cut at the first null.
pub fn tc_from_words(words: &[u16]) -> U16String {
    let end = words.iter().position(|&c| c == 0).unwrap_or(words.len());
    return U16String::from_vec(words[..end].to_vec());
}

use widestring::U16String;
