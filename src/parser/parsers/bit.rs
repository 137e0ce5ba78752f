use super::TadResult;

use bitvec::prelude::*;
use nom::bytes::complete::take;
use nom::error::context;

/// Bytes per row of a 1-bit bitmap `width` pixels wide.
pub fn row_bytes(width: usize) -> usize {
    return (width + 7) / 8;
}

/// Extracts a `width` x `height` bitmap stored row by row, MSB first,
/// each row padded to a whole byte. Padding bits are dropped.
pub fn take_bitrows(input: &[u8], width: usize, height: usize) -> TadResult<BitVec<u8, Msb0>> {
    let stride = row_bytes(width);
    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(width * height);
    let mut input_mut = input;
    for _ in 0..height {
        let (input, row) = context("take_bitrows row", take(stride))(input_mut)?;
        bits.extend_from_bitslice(&row.view_bits::<Msb0>()[..width]);
        input_mut = input;
    }
    return Ok((input_mut, bits));
}
