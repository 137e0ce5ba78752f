#![forbid(unsafe_code)]
//! A crate for decoding BTRON TAD documents.
//! Plain TAD streams and LH5-compressed book-pack archives can be read;
//! writing them is out of scope.
//!
//! Every record decodes to an XML-like tag stream plus the raster images it carries.

#![no_std]
#![allow(clippy::needless_return)]

extern crate alloc;

pub mod codec;
pub mod decode;
mod parser;
pub mod read;

pub use decode::{DecodedRecord, Diagnostic, DirectiveError, RasterImage, ResolvedLink};
pub use read::*;
