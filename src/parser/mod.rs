//! Low-level parsing of TAD segment streams and the book-pack archive wrapper.

#[macro_use]
mod convert;
pub mod crc;
mod err;
pub mod parsers;
pub mod types;

pub use convert::*;
pub use err::*;
