//! Handlers for figure brackets, primitives and figure fusens.

use super::decoration::DecorationSet;
use super::state::{Frame, Mask, Modifier, Pattern, Transform};
use super::writer::Tag;
use super::{parsed, DirectiveError, RecordDecoder};
use crate::parser::parsers::{color, point, point_list, rect, take_bitrows, TadResult};
use crate::parser::types::{Color, Point, Rect, Segment};

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, trace};
use nom::multi::count;
use nom::number::complete::{le_i16, le_u16};
use nom::sequence::tuple;

type Handled = Result<(), DirectiveError>;

pub fn figure_start(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let saved = rec.state.decorations.suspend(&mut rec.out);
    super::text::close_layouts(rec);
    if !rec.state.has_figure() {
        rec.state.z_index = 0;
    }
    rec.state.frames.push(Frame::Figure { saved, groups: 0 });

    let geometry: TadResult<(Rect, Rect, i16, i16)> =
        tuple((rect, rect, le_i16, le_i16))(seg.body);
    let tag = match geometry {
        Ok((_, (view, draw, h_unit, v_unit))) => Tag::new("figure")
            .attr("left", view.left)
            .attr("top", view.top)
            .attr("right", view.right)
            .attr("bottom", view.bottom)
            .attr("drawleft", draw.left)
            .attr("drawtop", draw.top)
            .attr("drawright", draw.right)
            .attr("drawbottom", draw.bottom)
            .attr("hunit", h_unit)
            .attr("vunit", v_unit),
        Err(_) => Tag::new("figure"),
    };
    rec.out.start(tag);
    return Ok(());
}

pub fn figure_end(rec: &mut RecordDecoder, _seg: &Segment) -> Handled {
    if !rec.state.has_figure() {
        debug!("figure end without an open figure at {}", rec.offset);
        return Ok(());
    }
    rec.close_frames_until(|f| matches!(f, Frame::Figure { .. }));
    return Ok(());
}

pub fn close_figure(rec: &mut RecordDecoder, saved: DecorationSet, groups: u16) {
    rec.state.decorations.suspend(&mut rec.out);
    super::text::close_layouts(rec);
    for _ in 0..groups {
        rec.out.end("group");
    }
    rec.out.end("figure");
    rec.state.macro_depth = 0;
    rec.state.decorations.resume(saved, &mut rec.out);
}

fn points_attr(points: &[Point]) -> String {
    let parts: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
    return parts.join(" ");
}

/// Line attribute word: low byte width, high byte line type.
fn stroke(rec: &RecordDecoder, tag: Tag, l_atr: u16, l_pat: u16) -> Tag {
    let paint = rec.state.paint(l_pat).unwrap_or(Color::BLACK);
    return tag
        .attr("stroke", paint)
        .attr("strokewidth", l_atr & 0xFF)
        .attr("linetype", l_atr >> 8);
}

fn fill(rec: &RecordDecoder, tag: Tag, f_pat: u16) -> Tag {
    return match rec.state.paint(f_pat) {
        Some(c) => tag.attr("fill", c),
        None => tag.attr("fill", "none"),
    };
}

fn transform_attr(t: &Transform) -> String {
    return format!(
        "translate({} {}) rotate({}) skewX({}) skewY({})",
        t.dx, t.dy, t.angle, t.shear_x, t.shear_y
    );
}

/// Emit a primitive with the modifier taken for it, unless a macro is being defined.
fn draw(rec: &mut RecordDecoder, modifier: Modifier, tag: Tag) {
    if rec.state.macro_depth > 0 {
        trace!("{} inside a macro definition", tag.name());
        return;
    }
    let mut tag = tag
        .attr("z", rec.state.z_index)
        .flag("arrowstart", modifier.arrow_start)
        .flag("arrowend", modifier.arrow_end);
    if !modifier.transform.is_identity() {
        tag = tag.attr("transform", transform_attr(&modifier.transform));
    }
    rec.out.empty(tag);
    rec.state.z_index += 1;
}

fn rotated(tag: Tag, angle: i16) -> Tag {
    if angle == 0 {
        return tag;
    }
    return tag.attr("angle", angle);
}

fn ellipse_attrs(tag: Tag, r: &Rect) -> Tag {
    let (cx, cy) = r.center();
    let (rx, ry) = r.radii();
    return tag
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("rx", rx)
        .attr("ry", ry);
}

fn arc_ends(tag: Tag, start: Point, end: Point) -> Tag {
    return tag
        .attr("startx", start.x)
        .attr("starty", start.y)
        .attr("endx", end.x)
        .attr("endy", end.y);
}

pub fn rectangle(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let modifier = core::mem::take(&mut rec.state.modifier);
    let (_, (l_atr, l_pat, f_pat, angle, r)) =
        parsed(seg, tuple((le_u16, le_u16, le_u16, le_i16, rect))(seg.args()))?;
    let tag = Tag::new("rect")
        .attr("x", r.left)
        .attr("y", r.top)
        .attr("width", r.width())
        .attr("height", r.height());
    let tag = fill(rec, stroke(rec, rotated(tag, angle), l_atr, l_pat), f_pat);
    draw(rec, modifier, tag);
    return Ok(());
}

pub fn rounded_rectangle(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let modifier = core::mem::take(&mut rec.state.modifier);
    let (_, (l_atr, l_pat, f_pat, angle, rh, rv, r)) = parsed(
        seg,
        tuple((le_u16, le_u16, le_u16, le_i16, le_i16, le_i16, rect))(seg.args()),
    )?;
    let tag = Tag::new("roundrect")
        .attr("x", r.left)
        .attr("y", r.top)
        .attr("width", r.width())
        .attr("height", r.height())
        .attr("rx", rh)
        .attr("ry", rv);
    let tag = fill(rec, stroke(rec, rotated(tag, angle), l_atr, l_pat), f_pat);
    draw(rec, modifier, tag);
    return Ok(());
}

pub fn ellipse(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let modifier = core::mem::take(&mut rec.state.modifier);
    let (_, (l_atr, l_pat, f_pat, angle, r)) =
        parsed(seg, tuple((le_u16, le_u16, le_u16, le_i16, rect))(seg.args()))?;
    let tag = ellipse_attrs(Tag::new("ellipse"), &r);
    let tag = fill(rec, stroke(rec, rotated(tag, angle), l_atr, l_pat), f_pat);
    draw(rec, modifier, tag);
    return Ok(());
}

/// Arcs (sub-ID 3) and chords (sub-ID 4) share a layout.
pub fn sector(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let modifier = core::mem::take(&mut rec.state.modifier);
    let (_, (l_atr, l_pat, f_pat, angle, r, start, end)) = parsed(
        seg,
        tuple((le_u16, le_u16, le_u16, le_i16, rect, point, point))(seg.args()),
    )?;
    let name = if seg.sub_id() == 3 { "arc" } else { "chord" };
    let tag = arc_ends(ellipse_attrs(Tag::new(name), &r), start, end);
    let tag = fill(rec, stroke(rec, rotated(tag, angle), l_atr, l_pat), f_pat);
    draw(rec, modifier, tag);
    return Ok(());
}

pub fn polygon(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let modifier = core::mem::take(&mut rec.state.modifier);
    let (_, (l_atr, l_pat, f_pat, round, points)) = parsed(
        seg,
        tuple((le_u16, le_u16, le_u16, le_u16, point_list))(seg.args()),
    )?;
    let tag = Tag::new("polygon")
        .attr("points", points_attr(&points))
        .flag("round", round != 0);
    let tag = fill(rec, stroke(rec, tag, l_atr, l_pat), f_pat);
    draw(rec, modifier, tag);
    return Ok(());
}

pub fn line(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let modifier = core::mem::take(&mut rec.state.modifier);
    let (_, (l_atr, l_pat, points)) =
        parsed(seg, tuple((le_u16, le_u16, point_list))(seg.args()))?;
    let tag = Tag::new("line").attr("points", points_attr(&points));
    let tag = stroke(rec, tag, l_atr, l_pat);
    draw(rec, modifier, tag);
    return Ok(());
}

pub fn elliptical_arc(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let modifier = core::mem::take(&mut rec.state.modifier);
    let (_, (l_atr, l_pat, angle, r, start, end)) = parsed(
        seg,
        tuple((le_u16, le_u16, le_i16, rect, point, point))(seg.args()),
    )?;
    let tag = arc_ends(ellipse_attrs(Tag::new("ellipticalarc"), &r), start, end);
    let tag = stroke(rec, rotated(tag, angle), l_atr, l_pat);
    draw(rec, modifier, tag);
    return Ok(());
}

pub fn polyline(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let modifier = core::mem::take(&mut rec.state.modifier);
    let (_, (l_atr, l_pat, round, points)) =
        parsed(seg, tuple((le_u16, le_u16, le_u16, point_list))(seg.args()))?;
    let tag = Tag::new("polyline")
        .attr("points", points_attr(&points))
        .flag("round", round != 0);
    let tag = stroke(rec, tag, l_atr, l_pat);
    draw(rec, modifier, tag);
    return Ok(());
}

pub fn curve(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let modifier = core::mem::take(&mut rec.state.modifier);
    let (_, (l_atr, l_pat, f_pat, kind, points)) = parsed(
        seg,
        tuple((le_u16, le_u16, le_u16, le_u16, point_list))(seg.args()),
    )?;
    let tag = Tag::new("curve")
        .attr("type", kind)
        .attr("points", points_attr(&points));
    let tag = fill(rec, stroke(rec, tag, l_atr, l_pat), f_pat);
    draw(rec, modifier, tag);
    return Ok(());
}

pub fn palette(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (rest, n) = parsed(seg, le_u16(seg.args()))?;
    let (_, colors) = parsed(seg, count(color, n as usize)(rest))?;
    trace!("palette with {} entries", colors.len());
    rec.state.palette = colors;
    return Ok(());
}

/// Rows are `ceil(width / 8)` bytes, MSB first.
pub fn mask(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (rest, (id, _kind, width, height)) =
        parsed(seg, tuple((le_u16, le_u16, le_i16, le_i16))(seg.args()))?;
    let invalid = DirectiveError::InvalidMaskSize { id, width, height };
    if width <= 0 || height <= 0 {
        return Err(invalid);
    }
    let (w, h) = (width as usize, height as usize);
    let bits = match take_bitrows(rest, w, h) {
        Ok((_, bits)) => bits,
        Err(_) => return Err(invalid),
    };
    rec.state.masks.insert(
        id,
        Mask {
            width: w,
            height: h,
            bits,
        },
    );
    return Ok(());
}

pub fn pattern(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (rest, (id, hsize, vsize, ncol)) =
        parsed(seg, tuple((le_u16, le_u16, le_u16, le_u16))(seg.args()))?;
    let (rest, fg) = parsed(seg, count(color, ncol as usize)(rest))?;
    let (rest, (bg, nmask)) = parsed(seg, tuple((color, le_u16))(rest))?;
    let (_, masks) = parsed(seg, count(le_u16, nmask as usize)(rest))?;
    for m in masks.iter() {
        if !rec.state.masks.contains_key(m) {
            debug!("pattern {} refers to undefined mask {}", id, m);
        }
    }
    let fg_list: Vec<String> = fg.iter().map(|c| format!("{}", c)).collect();
    let mask_list: Vec<String> = masks.iter().map(|m| format!("{}", m)).collect();
    rec.out.empty(
        Tag::new("pattern")
            .attr("id", id)
            .attr("width", hsize)
            .attr("height", vsize)
            .attr("fg", fg_list.join(" "))
            .attr("bg", bg)
            .attr("masks", mask_list.join(" ")),
    );
    rec.state.patterns.insert(
        id,
        Pattern {
            hsize,
            vsize,
            fg,
            bg,
            masks,
        },
    );
    return Ok(());
}

pub fn group_start(rec: &mut RecordDecoder, _seg: &Segment) -> Handled {
    if rec.state.macro_depth > 0 {
        return Ok(());
    }
    if let Some(Frame::Figure { groups, .. }) = rec.state.frames.last_mut() {
        *groups += 1;
        rec.out.start(Tag::new("group"));
    }
    return Ok(());
}

pub fn group_end(rec: &mut RecordDecoder, _seg: &Segment) -> Handled {
    if rec.state.macro_depth > 0 {
        return Ok(());
    }
    if let Some(Frame::Figure { groups, .. }) = rec.state.frames.last_mut() {
        if *groups > 0 {
            *groups -= 1;
            rec.out.end("group");
        }
    }
    return Ok(());
}

pub fn macro_define(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, id) = parsed(seg, le_u16(seg.args()))?;
    trace!("defining macro {}", id);
    rec.state.macro_depth += 1;
    return Ok(());
}

pub fn macro_end(rec: &mut RecordDecoder, _seg: &Segment) -> Handled {
    rec.state.macro_depth = rec.state.macro_depth.saturating_sub(1);
    return Ok(());
}

pub fn macro_reference(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, (id, x, y)) = parsed(seg, tuple((le_u16, le_i16, le_i16))(seg.args()))?;
    if rec.state.macro_depth > 0 {
        return Ok(());
    }
    rec.out.empty(
        Tag::new("macro")
            .attr("id", id)
            .attr("x", x)
            .attr("y", y)
            .attr("z", rec.state.z_index),
    );
    rec.state.z_index += 1;
    return Ok(());
}

/// attr bit 0: arrow at the start, bit 1: arrow at the end.
pub fn arrows(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let attr = seg.attr();
    rec.state.modifier.arrow_start = attr & 1 != 0;
    rec.state.modifier.arrow_end = attr & 2 != 0;
    return Ok(());
}

pub fn transform(rec: &mut RecordDecoder, seg: &Segment) -> Handled {
    let (_, (dx, dy, angle, shear_x, shear_y)) = parsed(
        seg,
        tuple((le_i16, le_i16, le_i16, le_i16, le_i16))(seg.args()),
    )?;
    if angle.unsigned_abs() > 360 || shear_x.unsigned_abs() >= 90 || shear_y.unsigned_abs() >= 90 {
        return Err(DirectiveError::MalformedTransform {
            angle,
            shear_x,
            shear_y,
        });
    }
    rec.state.modifier.transform = Transform {
        dx,
        dy,
        angle,
        shear_x,
        shear_y,
    };
    return Ok(());
}
