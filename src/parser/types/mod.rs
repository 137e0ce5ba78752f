//! Structures that make up TAD streams and book-pack archives.
//! These are "low-level", meaning that they're meant to
//! reflect how data is stored in the buffer, not provide a friendly interface to it.

mod archive;
mod color;
mod geometry;
mod image;
mod segment;
mod segment_id;
pub use archive::*;
pub use color::*;
pub use geometry::*;
pub use image::*;
pub use segment::*;
pub use segment_id::*;

use alloc::vec::Vec;
use widestring::U16String;
