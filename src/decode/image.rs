//! Raster image segments to RGB buffers.

use super::writer::Tag;
use super::{parsed, DirectiveError, RecordDecoder};
use crate::parser::parsers::image_header;
use crate::parser::types::{ImageHeader, Segment};

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use log::trace;

/// Images larger than this are not rasterized.
pub const MAX_PIXELS: u64 = 1 << 26;

/// A decoded raster, three bytes per pixel, row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// File name a caller should store the PNG under.
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

const BLACK: [u8; 3] = [0, 0, 0];

fn byte(data: &[u8], at: usize) -> Option<u8> {
    return data.get(at).copied();
}

/// Colour of pixel `(x, y)`, counted from the top left of the bounds.
///
/// Reads past the end of `data` give black.
pub fn pixel(header: &ImageHeader, data: &[u8], x: usize, y: usize) -> [u8; 3] {
    let rowbytes = header.rowbytes as usize;
    let plane_row = |p: usize| -> Option<usize> {
        let base = *header.base_off.get(p)? as usize;
        return Some(base + y * rowbytes);
    };

    if header.planes == 3 && header.depth() == 8 {
        let mut rgb = BLACK;
        for (p, channel) in rgb.iter_mut().enumerate() {
            *channel = plane_row(p)
                .and_then(|row| byte(data, row + x))
                .unwrap_or(0);
        }
        return rgb;
    }

    let row = match plane_row(0) {
        Some(r) => r,
        None => return BLACK,
    };
    let storage = header.storage_bits() as usize;
    let bit = x * storage;
    let at = row + bit / 8;
    let read = || -> Option<[u8; 3]> {
        match header.depth() {
            1 => {
                let b = byte(data, at)?;
                let set = b & (0x80 >> (bit % 8)) != 0;
                return Some(if set { [0xFF, 0xFF, 0xFF] } else { BLACK });
            }
            8 => {
                let g = byte(data, at)?;
                return Some([g, g, g]);
            }
            16 => {
                let v = u16::from_le_bytes([byte(data, at)?, byte(data, at + 1)?]);
                let r = ((v >> 11) & 0x1F) as u8;
                let g = ((v >> 5) & 0x3F) as u8;
                let b = (v & 0x1F) as u8;
                return Some([(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]);
            }
            24 | 32 => {
                return Some([byte(data, at + 2)?, byte(data, at + 1)?, byte(data, at)?]);
            }
            _ => {
                let at = row + x * 3;
                return Some([byte(data, at + 2)?, byte(data, at + 1)?, byte(data, at)?]);
            }
        }
    };
    return read().unwrap_or(BLACK);
}

/// Decode every pixel inside the bounds.
pub fn rasterize(header: &ImageHeader, data: &[u8]) -> Vec<u8> {
    let width = header.bounds.width().max(0) as usize;
    let height = header.bounds.height().max(0) as usize;
    let mut rgb = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            rgb.extend_from_slice(&pixel(header, data, x, y));
        }
    }
    return rgb;
}

pub fn image(rec: &mut RecordDecoder, seg: &Segment) -> Result<(), DirectiveError> {
    let index = rec.state.image_index;
    rec.state.image_index += 1;

    let (data, header) = parsed(seg, image_header(seg.body))?;
    let bounds = header.bounds;
    if bounds.is_empty() {
        return Err(DirectiveError::InvalidImage("empty bounds"));
    }
    let (width, height) = (bounds.width() as u32, bounds.height() as u32);
    if width as u64 * height as u64 > MAX_PIXELS {
        return Err(DirectiveError::InvalidImage("too many pixels"));
    }
    if header.planes == 0 {
        return Err(DirectiveError::InvalidImage("no planes"));
    }
    let plane_bytes = header.rowbytes as u64 * height as u64;
    for p in 0..header.planes as usize {
        let end = match header.base_off.get(p) {
            Some(&off) => off as u64 + plane_bytes,
            None => return Err(DirectiveError::InvalidImage("missing plane offset")),
        };
        if end > data.len() as u64 {
            return Err(DirectiveError::InvalidImage("pixel data shorter than its rows"));
        }
    }

    let name = format!("{}_{}_{}.png", rec.ctx.identifier, rec.ctx.record, index);
    trace!(
        "image {}: {}x{}, depth {}, {} planes",
        name,
        width,
        height,
        header.depth(),
        header.planes
    );
    if rec.ctx.images {
        rec.images.push(RasterImage {
            name: name.clone(),
            width,
            height,
            rgb: rasterize(&header, data),
        });
    }
    rec.out.empty(
        Tag::new("image")
            .attr("href", name)
            .attr("left", header.view.left)
            .attr("top", header.view.top)
            .attr("right", header.view.right)
            .attr("bottom", header.view.bottom)
            .attr("width", width)
            .attr("height", height),
    );
    return Ok(());
}
