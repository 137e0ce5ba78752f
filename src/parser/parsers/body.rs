use super::*;

use nom::number::complete::le_i16;

pub fn rect(input: &[u8]) -> TadResult<Rect> {
    let (input, left) = context("rect left", le_i16)(input)?;
    let (input, top) = context("rect top", le_i16)(input)?;
    let (input, right) = context("rect right", le_i16)(input)?;
    let (input, bottom) = context("rect bottom", le_i16)(input)?;
    return Ok((
        input,
        Rect {
            left,
            top,
            right,
            bottom,
        },
    ));
}

pub fn point(input: &[u8]) -> TadResult<Point> {
    let (input, x) = context("point x", le_i16)(input)?;
    let (input, y) = context("point y", le_i16)(input)?;
    return Ok((input, Point { x, y }));
}

/// A point count followed by that many points.
pub fn point_list(input: &[u8]) -> TadResult<Vec<Point>> {
    let (input, np) = context("point count", le_u16)(input)?;
    return context("points", count(point, np as usize))(input);
}

/// A packed `COLOR`, low word first.
pub fn color(input: &[u8]) -> TadResult<Color> {
    let (input, lo) = context("color low", le_u16)(input)?;
    let (input, hi) = context("color high", le_u16)(input)?;
    return Ok((input, Color::from_packed(long(lo, hi))));
}

/// A `UW` stored as two words, low word first.
pub fn long_word(input: &[u8]) -> TadResult<u32> {
    let (input, lo) = context("long low", le_u16)(input)?;
    let (input, hi) = context("long high", le_u16)(input)?;
    return Ok((input, long(lo, hi)));
}

/// Every whole word left in the input. A trailing odd byte is dropped.
pub fn rest_words(input: &[u8]) -> TadResult<Vec<u16>> {
    return context("trailing words", count(le_u16, input.len() / 2))(input);
}

pub fn image_header(input: &[u8]) -> TadResult<ImageHeader> {
    let (input, view) = context("image view", rect)(input)?;
    let (input, draw) = context("image draw", rect)(input)?;
    let (input, h_unit) = context("image h_unit", le_u16)(input)?;
    let (input, v_unit) = context("image v_unit", le_u16)(input)?;
    let (input, slope) = context("image slope", le_i16)(input)?;
    let (input, color) = context("image color", color)(input)?;
    let (input, cinfo) = context("image cinfo", count(le_u16, 4))(input)?;
    let (input, extlen) = context("image extlen", le_u16)(input)?;
    let (input, extend) = context("image extend", long_word)(input)?;
    let (input, mask) = context("image mask", long_word)(input)?;
    let (input, compac) = context("image compac", le_u16)(input)?;
    let (input, planes) = context("image planes", le_u16)(input)?;
    let (input, pixbits) = context("image pixbits", le_u16)(input)?;
    let (input, rowbytes) = context("image rowbytes", le_u16)(input)?;
    let (input, bounds) = context("image bounds", rect)(input)?;
    let (input, base_off) = context("image base_off", count(long_word, planes as usize))(input)?;
    return Ok((
        input,
        ImageHeader {
            view,
            draw,
            h_unit,
            v_unit,
            slope,
            color,
            cinfo: [cinfo[0], cinfo[1], cinfo[2], cinfo[3]],
            extlen,
            extend,
            mask,
            compac,
            planes,
            pixbits,
            rowbytes,
            bounds,
            base_off,
        },
    ));
}
