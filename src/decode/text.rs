//! Handlers for text brackets, characters and the text fusens.

use super::charset::{decode_char, decode_str};
use super::decoration::{Decoration, DecorationSet};
use super::state::{Alignment, Frame, Layout, LineSpacing};
use super::writer::Tag;
use super::{parsed, DirectiveError, RecordDecoder};
use crate::parser::parsers::{color, rect, rest_words, TadResult};
use crate::parser::types::{Segment, SegmentId};

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, trace};
use nom::multi::count;
use nom::number::complete::{le_i16, le_u16};
use nom::sequence::tuple;

type Handled = Result<(), DirectiveError>;

const CR: u16 = 0x000D;
const NL: u16 = 0x000A;
const FF: u16 = 0x000C;
const TAB: u16 = 0x0009;

pub fn char(rec: &mut RecordDecoder, code: u16) {
    let after_cr = core::mem::replace(&mut rec.state.pending_cr, false);
    match code {
        CR => {
            paragraph_break(rec, false);
            rec.state.pending_cr = true;
        }
        NL => {
            if !after_cr {
                paragraph_break(rec, false);
            }
        }
        FF => paragraph_break(rec, true),
        TAB => rec.out.empty(Tag::new("tab")),
        c if c < 0x20 => trace!("dropping control code {:#x}", c),
        c => {
            let ch = decode_char(rec.state.plane, c);
            rec.out.push_char(ch);
        }
    }
}

/// `</p><p>`, with decorations closed around it and ruby or subscript spans ended.
fn paragraph_break(rec: &mut RecordDecoder, page: bool) {
    if !rec.state.in_text() {
        return;
    }
    let saved = rec.state.decorations.suspend(&mut rec.out);
    close_layouts(rec);
    rec.out.end("p");
    if page {
        rec.out.empty(Tag::new("pagebreak"));
    }
    rec.out.start(Tag::new("p"));
    rec.state.decorations.resume(saved, &mut rec.out);
}

pub fn text_start(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let saved = rec.state.decorations.suspend(&mut rec.out);
    close_layouts(rec);
    rec.state.frames.push(Frame::Text { saved });
    rec.out.start(Tag::new("document"));

    // The geometry is optional. Without it the bracket only opens the document.
    if let Ok((rest, (view, draw, h_unit, v_unit))) =
        tuple((rect, rect, le_i16, le_i16))(seg.body)
    {
        let extra: TadResult<(u16, u16)> = tuple((le_u16, le_u16))(rest);
        let (lang, bgpat) = match extra {
            Ok((_, (lang, bgpat))) => (Some(lang), Some(bgpat)),
            Err(_) => (None, None),
        };
        rec.out.empty(
            Tag::new("text")
                .attr("left", view.left)
                .attr("top", view.top)
                .attr("right", view.right)
                .attr("bottom", view.bottom)
                .attr("drawleft", draw.left)
                .attr("drawtop", draw.top)
                .attr("drawright", draw.right)
                .attr("drawbottom", draw.bottom)
                .attr("hunit", h_unit)
                .attr("vunit", v_unit)
                .attr_opt("lang", lang)
                .attr_opt("bgpat", bgpat),
        );
    }
    rec.out.start(Tag::new("p"));
    return Ok(());
}

pub fn text_end(rec: &mut RecordDecoder, _seg: &Segment) -> Handled {
    if !rec.state.has_text() {
        debug!("text end without an open text bracket at {}", rec.offset);
        return Ok(());
    }
    rec.close_frames_until(|f| matches!(f, Frame::Text { .. }));
    return Ok(());
}

/// Close a text bracket. Open decorations are closed in the fixed order first.
pub fn close_text(rec: &mut RecordDecoder, saved: DecorationSet) {
    rec.state.decorations.suspend(&mut rec.out);
    close_layouts(rec);
    rec.out.end("p");
    rec.out.end("document");
    rec.state.decorations.resume(saved, &mut rec.out);
}

pub fn info(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, version) = parsed(seg, le_u16(seg.args()))?;
    rec.out.empty(Tag::new("info").attr("version", version));
    return Ok(());
}

/// Page fusens only apply inside their own kind of bracket.
fn page_applies(rec: &RecordDecoder, seg: &Segment) -> bool {
    let applies = match seg.kind() {
        Some(SegmentId::TextPage) => rec.state.in_text(),
        Some(SegmentId::FigPage) => rec.state.in_figure(),
        _ => false,
    };
    if !applies {
        trace!("page fusen {:#06x} outside its context", seg.id);
    }
    return applies;
}

pub fn paper(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    if !page_applies(rec, seg) {
        return Ok(());
    }
    let (_, (length, width, height)) = parsed(seg, tuple((le_i16, le_i16, le_i16))(seg.args()))?;
    let landscape = seg.attr() & 1 != 0;
    let paper = rec.state.paper_mut();
    paper.length = length;
    paper.width = width;
    paper.height = height;
    paper.landscape = landscape;
    rec.out.empty(
        Tag::new("paper")
            .attr("length", length)
            .attr("width", width)
            .attr("height", height)
            .attr(
                "orientation",
                if landscape { "landscape" } else { "portrait" },
            ),
    );
    return Ok(());
}

pub fn margin(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    if !page_applies(rec, seg) {
        return Ok(());
    }
    let (_, (top, bottom, left, right)) =
        parsed(seg, tuple((le_i16, le_i16, le_i16, le_i16))(seg.args()))?;
    rec.state.paper_mut().margin = [top, bottom, left, right];
    rec.out.empty(
        Tag::new("margin")
            .attr("top", top)
            .attr("bottom", bottom)
            .attr("left", left)
            .attr("right", right),
    );
    return Ok(());
}

pub fn columns(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    if !page_applies(rec, seg) {
        return Ok(());
    }
    let (_, (count, gap)) = parsed(seg, tuple((le_u16, le_i16))(seg.args()))?;
    let paper = rec.state.paper_mut();
    paper.columns = count;
    paper.column_gap = gap;
    rec.out
        .empty(Tag::new("columns").attr("count", count).attr("gap", gap));
    return Ok(());
}

pub fn overlay_define(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    if !page_applies(rec, seg) {
        return Ok(());
    }
    let (_, id) = parsed(seg, le_u16(seg.args()))?;
    rec.out.empty(Tag::new("paperoverlay").attr("define", id));
    return Ok(());
}

pub fn overlay_apply(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    if !page_applies(rec, seg) {
        return Ok(());
    }
    let (_, id) = parsed(seg, le_u16(seg.args()))?;
    rec.state.paper_mut().overlay = Some(id);
    rec.out.empty(Tag::new("paperoverlay").attr("id", id));
    return Ok(());
}

pub fn line_spacing(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, pitch) = parsed(seg, le_u16(seg.args()))?;
    if pitch & 0x8000 != 0 {
        let num = ((pitch >> 8) & 0x7F) as u8;
        let den = (pitch & 0xFF) as u8;
        rec.state.ruler.line_spacing = LineSpacing::Ratio { num, den };
        let ratio = num as f32 / core::cmp::max(den, 1) as f32;
        rec.out.empty(Tag::new("ruler").attr("linespacing", ratio));
    } else {
        rec.state.ruler.line_spacing = LineSpacing::Pitch(pitch);
        rec.out.empty(Tag::new("ruler").attr("linepitch", pitch));
    }
    return Ok(());
}

pub fn alignment(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, code) = parsed(seg, le_u16(seg.args()))?;
    let align = match Alignment::from_code(code) {
        Some(a) => a,
        None => {
            debug!("unknown alignment {}", code);
            return Ok(());
        }
    };
    rec.state.ruler.align = align;
    rec.out.empty(Tag::new("ruler").attr("align", align.name()));
    return Ok(());
}

pub fn tabs(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (rest, n) = parsed(seg, le_u16(seg.args()))?;
    let (_, stops) = parsed(seg, count(le_i16, n as usize)(rest))?;
    let list: Vec<String> = stops.iter().map(|s| format!("{}", s)).collect();
    rec.state.ruler.tabs = stops;
    rec.out
        .empty(Tag::new("ruler").attr("tabs", list.join(",")));
    return Ok(());
}

pub fn direction(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, dir) = parsed(seg, le_u16(seg.args()))?;
    rec.state.ruler.vertical = dir != 0;
    rec.out.empty(Tag::new("ruler").attr(
        "direction",
        if dir != 0 { "vertical" } else { "horizontal" },
    ));
    return Ok(());
}

pub fn indent(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, indent) = parsed(seg, le_i16(seg.args()))?;
    rec.state.ruler.indent = indent;
    rec.out.empty(Tag::new("ruler").attr("indent", indent));
    return Ok(());
}

pub fn font_name(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (rest, class) = parsed(seg, le_u16(seg.args()))?;
    let (_, chars) = parsed(seg, rest_words(rest))?;
    let name = decode_str(&chars);
    rec.out.empty(
        Tag::new("font")
            .attr("name", &name)
            .attr("class", class),
    );
    rec.state.font.name = name;
    rec.state.font.class = class;
    return Ok(());
}

/// Weight class in bits 0-3, stretch class in bits 4-6, italic bit 8, outline (bagchar) bit 9.
pub fn font_attributes(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, attr) = parsed(seg, le_u16(seg.args()))?;
    let weight_class = attr & 0x0F;
    let weight = if weight_class == 0 {
        400
    } else {
        core::cmp::min(weight_class * 100, 900)
    };
    let stretch = ((attr >> 4) & 0x07) as u8;
    let italic = attr & 0x0100 != 0;
    let bagchar = attr & 0x0200 != 0;

    rec.state.font.weight = weight;
    rec.state.font.stretch = stretch;
    rec.state.font.italic = italic;
    rec.out.empty(
        Tag::new("font")
            .attr("weight", weight)
            .attr("stretch", stretch),
    );
    let decorations = &mut rec.state.decorations;
    decorations.set(Decoration::Bold, weight >= 700, &mut rec.out);
    decorations.set(Decoration::Italic, italic, &mut rec.out);
    decorations.set(Decoration::Bagchar, bagchar, &mut rec.out);
    return Ok(());
}

pub fn font_size(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, size) = parsed(seg, le_u16(seg.args()))?;
    rec.state.font.size = size;
    rec.out.empty(Tag::new("font").attr("size", size));
    return Ok(());
}

pub fn font_spacing(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, pitch) = parsed(seg, le_u16(seg.args()))?;
    rec.state.font.spacing = pitch;
    rec.out.empty(Tag::new("font").attr("spacing", pitch));
    return Ok(());
}

pub fn font_color(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, c) = parsed(seg, color(seg.args()))?;
    rec.state.font.color = c;
    rec.out.empty(Tag::new("font").attr("color", c));
    return Ok(());
}

pub fn fixed_space(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, width) = parsed(seg, le_i16(seg.args()))?;
    rec.out.empty(Tag::new("space").attr("width", width));
    return Ok(());
}

/// attr bit 0: superscript, bit 1: placed before the base character.
pub fn script_start(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let layout = Layout::Script {
        superscript: seg.attr() & 1 != 0,
    };
    let before = seg.attr() & 2 != 0;
    let tag = Tag::new(layout.tag()).attr_opt("position", before.then(|| "before"));
    open_layout(rec, layout, tag);
    return Ok(());
}

pub fn script_end(rec: &mut RecordDecoder, _seg: &Segment) -> Handled {
    close_layout(rec, Layout::Script { superscript: false });
    return Ok(());
}

/// attr bit 0: ruby below the base text. The body carries the ruby text.
pub fn ruby_start(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, chars) = parsed(seg, rest_words(seg.args()))?;
    let below = seg.attr() & 1 != 0;
    let tag = Tag::new("ruby")
        .attr("text", decode_str(&chars))
        .attr("position", if below { "below" } else { "above" });
    open_layout(rec, Layout::Ruby, tag);
    return Ok(());
}

pub fn ruby_end(rec: &mut RecordDecoder, _seg: &Segment) -> Handled {
    close_layout(rec, Layout::Ruby);
    return Ok(());
}

fn open_layout(rec: &mut RecordDecoder, layout: Layout, tag: Tag) {
    // One ruby or script span at a time.
    if let Some(open) = rec.state.layouts.last() {
        debug!("{} open, ignoring {} start", open.tag(), layout.tag());
        return;
    }
    let saved = rec.state.decorations.suspend(&mut rec.out);
    rec.out.start(tag);
    rec.state.layouts.push(layout);
    rec.state.decorations.resume(saved, &mut rec.out);
}

fn close_layout(rec: &mut RecordDecoder, kind: Layout) {
    let pos = match rec.state.layouts.iter().rposition(|l| l.same_kind(kind)) {
        Some(p) => p,
        None => {
            debug!("{} end without a start", kind.tag());
            return;
        }
    };
    let saved = rec.state.decorations.suspend(&mut rec.out);
    while rec.state.layouts.len() > pos {
        if let Some(l) = rec.state.layouts.pop() {
            rec.out.end(l.tag());
        }
    }
    rec.state.decorations.resume(saved, &mut rec.out);
}

/// End every open ruby and subscript span. Decorations must already be closed.
pub fn close_layouts(rec: &mut RecordDecoder) {
    while let Some(l) = rec.state.layouts.pop() {
        rec.out.end(l.tag());
    }
}

/// Sub-ID `2k` opens decoration `k`, `2k + 1` closes it.
pub fn decoration(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let sub = seg.sub_id();
    let d = match Decoration::from_fusen_index(sub / 2) {
        Some(d) => d,
        None => return Ok(()),
    };
    rec.state
        .decorations
        .set(d, sub % 2 == 0, &mut rec.out);
    return Ok(());
}

pub fn variable(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, id) = parsed(seg, le_u16(seg.args()))?;
    rec.out.empty(Tag::new("variable").attr("id", id));
    return Ok(());
}

pub fn memo(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, chars) = parsed(seg, rest_words(seg.args()))?;
    rec.out.start(Tag::new("memo"));
    rec.out.text(&decode_str(&chars));
    rec.out.end("memo");
    return Ok(());
}

/// Segments that carry nothing this decoder renders.
pub fn skip(_rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    trace!("ignoring segment {:#06x}", seg.id);
    return Ok(());
}
