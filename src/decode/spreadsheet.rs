//! The spreadsheet cell-format fusen.
//!
//! After its application ID the body is a run of 6-word directives:
//! `col, row, size code, decoration bits, border bits, colour code`.

use super::writer::Tag;
use super::{parsed, DirectiveError, RecordDecoder};
use crate::parser::parsers::{app_id, rest_words};
use crate::parser::types::{Segment, ARCHIVE_APP_ID, SPREADSHEET_APP_ID};

use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, trace};

/// Point sizes by size code.
pub const FONT_SIZES: [u16; 8] = [9, 10, 11, 12, 14, 16, 20, 24];
pub const DECORATIONS: [(u16, &str); 4] = [
    (1 << 0, "bold"),
    (1 << 1, "italic"),
    (1 << 2, "underline"),
    (1 << 3, "strikethrough"),
];
pub const BORDERS: [(u16, &str); 4] = [
    (1 << 0, "top"),
    (1 << 1, "bottom"),
    (1 << 2, "left"),
    (1 << 3, "right"),
];
/// Colours by colour code. Bit 0 is blue, bit 1 red, bit 2 green.
pub const COLORS: [&str; 8] = [
    "black", "blue", "red", "magenta", "green", "cyan", "yellow", "white",
];

const DIRECTIVE_WORDS: usize = 6;

fn bit_names(bits: u16, table: &[(u16, &'static str)]) -> Option<String> {
    let names: Vec<&str> = table
        .iter()
        .filter(|(mask, _)| bits & mask != 0)
        .map(|(_, name)| *name)
        .collect();
    if names.is_empty() {
        return None;
    }
    return Some(names.join(" "));
}

pub fn specify(rec: &mut RecordDecoder, seg: &Segment) -> Result<(), DirectiveError> {
    let (rest, app) = parsed(seg, app_id(seg.body))?;
    if app == ARCHIVE_APP_ID {
        trace!("archive header inside a record, ignoring");
        return Ok(());
    }
    if app != SPREADSHEET_APP_ID {
        debug!("specify fusen for application {:04x?} skipped", app);
        return Ok(());
    }
    rec.state.spreadsheet = true;

    let (_, words) = parsed(seg, rest_words(rest))?;
    for d in words.chunks_exact(DIRECTIVE_WORDS) {
        let (col, row, size, deco, border, colour) = (d[0], d[1], d[2], d[3], d[4], d[5]);
        rec.out.empty(
            Tag::new("cell")
                .attr("col", col)
                .attr("row", row)
                .attr_opt("size", FONT_SIZES.get(size as usize))
                .attr_opt("decoration", bit_names(deco, &DECORATIONS))
                .attr_opt("border", bit_names(border, &BORDERS))
                .attr_opt("color", COLORS.get(colour as usize)),
        );
    }
    if words.len() % DIRECTIVE_WORDS != 0 {
        debug!(
            "{} trailing words after the last cell directive",
            words.len() % DIRECTIVE_WORDS
        );
    }
    return Ok(());
}
