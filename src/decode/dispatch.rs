//! Segment dispatch.
//!
//! Handlers are looked up by `(segment ID, sub-ID)`. The sub-ID is the upper byte of the
//! first body word for fusens and 0 for every other segment.

use super::{figure, image, link, spreadsheet, text};
use super::{DirectiveError, RecordDecoder};
use crate::parser::types::Segment;

pub type Handler = fn(&mut RecordDecoder, &Segment) -> Result<(), DirectiveError>;

/// Sorted by key.
static HANDLERS: &[((u16, u8), Handler)] = &[
    ((0xFFA0, 0), text::paper),
    ((0xFFA0, 1), text::margin),
    ((0xFFA0, 2), text::columns),
    ((0xFFA0, 3), text::overlay_define),
    ((0xFFA0, 4), text::overlay_apply),
    ((0xFFA1, 0), text::line_spacing),
    ((0xFFA1, 1), text::alignment),
    ((0xFFA1, 2), text::tabs),
    ((0xFFA1, 4), text::direction),
    ((0xFFA1, 5), text::indent),
    ((0xFFA2, 0), text::font_name),
    ((0xFFA2, 1), text::font_attributes),
    ((0xFFA2, 2), text::font_size),
    ((0xFFA2, 3), text::font_spacing),
    ((0xFFA2, 5), text::font_color),
    ((0xFFA3, 0), text::fixed_space),
    ((0xFFA4, 0), text::script_start),
    ((0xFFA4, 1), text::script_end),
    ((0xFFA4, 2), text::ruby_start),
    ((0xFFA4, 3), text::ruby_end),
    ((0xFFA5, 0), text::decoration),
    ((0xFFA5, 1), text::decoration),
    ((0xFFA5, 2), text::decoration),
    ((0xFFA5, 3), text::decoration),
    ((0xFFA5, 4), text::decoration),
    ((0xFFA5, 5), text::decoration),
    ((0xFFA5, 6), text::decoration),
    ((0xFFA5, 7), text::decoration),
    ((0xFFA5, 8), text::decoration),
    ((0xFFA5, 9), text::decoration),
    ((0xFFA5, 10), text::decoration),
    ((0xFFA5, 11), text::decoration),
    ((0xFFA5, 12), text::decoration),
    ((0xFFA5, 13), text::decoration),
    ((0xFFA5, 14), text::decoration),
    ((0xFFA5, 15), text::decoration),
    ((0xFFAD, 0), text::variable),
    ((0xFFAE, 0), text::memo),
    ((0xFFB0, 0), figure::rectangle),
    ((0xFFB0, 1), figure::rounded_rectangle),
    ((0xFFB0, 2), figure::ellipse),
    ((0xFFB0, 3), figure::sector),
    ((0xFFB0, 4), figure::sector),
    ((0xFFB0, 5), figure::polygon),
    ((0xFFB0, 6), figure::line),
    ((0xFFB0, 7), figure::elliptical_arc),
    ((0xFFB0, 8), figure::polyline),
    ((0xFFB0, 9), figure::curve),
    ((0xFFB1, 0), figure::palette),
    ((0xFFB1, 1), figure::mask),
    ((0xFFB1, 2), figure::pattern),
    ((0xFFB2, 0), figure::group_start),
    ((0xFFB2, 1), figure::group_end),
    ((0xFFB3, 0), figure::macro_define),
    ((0xFFB3, 1), figure::macro_end),
    ((0xFFB3, 2), figure::macro_reference),
    ((0xFFB4, 0), figure::arrows),
    ((0xFFB4, 1), figure::transform),
    ((0xFFB5, 0), text::paper),
    ((0xFFB5, 1), text::margin),
    ((0xFFB5, 2), text::columns),
    ((0xFFB5, 3), text::overlay_define),
    ((0xFFB5, 4), text::overlay_apply),
    ((0xFFBE, 0), text::memo),
    ((0xFFE0, 0), text::info),
    ((0xFFE1, 0), text::text_start),
    ((0xFFE2, 0), text::text_end),
    ((0xFFE3, 0), figure::figure_start),
    ((0xFFE4, 0), figure::figure_end),
    ((0xFFE5, 0), image::image),
    ((0xFFE6, 0), link::virtual_object),
    ((0xFFE7, 0), spreadsheet::specify),
    ((0xFFE8, 0), text::skip),
];

pub fn lookup(id: u16, minor: u8) -> Option<Handler> {
    return match HANDLERS.binary_search_by_key(&(id, minor), |(key, _)| *key) {
        Ok(i) => Some(HANDLERS[i].1),
        Err(_) => None,
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        for pair in HANDLERS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{:x?} before {:x?}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn lookups() {
        assert!(lookup(0xFFE1, 0).is_some());
        assert!(lookup(0xFFA5, 15).is_some());
        assert!(lookup(0xFFA5, 16).is_none());
        assert!(lookup(0xFFA6, 0).is_none());
        assert!(lookup(0xFFAF, 0).is_none());
    }
}
