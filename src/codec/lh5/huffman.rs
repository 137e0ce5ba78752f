use super::super::CodecError;
use super::bits::BitReader;

use alloc::vec;
use alloc::vec::Vec;

pub const MAX_CODE_LEN: usize = 16;

/// A canonical Huffman code as LHA builds it: codes are handed out in order of
/// increasing length, and in symbol order within one length.
#[derive(Debug, Clone, PartialEq)]
pub enum Huffman {
    /// The block uses a single symbol, which costs no bits at all.
    Single(u16),
    Canonical {
        counts: [u16; MAX_CODE_LEN + 1],
        symbols: Vec<u16>,
    },
}

impl Huffman {
    pub fn from_lengths(lengths: &[u8]) -> Result<Huffman, CodecError> {
        let mut counts = [0u16; MAX_CODE_LEN + 1];
        for &len in lengths {
            if len as usize > MAX_CODE_LEN {
                return Err(CodecError::CorruptStream("code length above 16"));
            }
            if len > 0 {
                counts[len as usize] += 1;
            }
        }

        let mut left: i32 = 1;
        for len in 1..=MAX_CODE_LEN {
            left <<= 1;
            left -= counts[len] as i32;
            if left < 0 {
                return Err(CodecError::CorruptStream("over-subscribed code lengths"));
            }
        }
        if left == 1 << MAX_CODE_LEN {
            return Err(CodecError::CorruptStream("code table without symbols"));
        }

        let mut offsets = [0usize; MAX_CODE_LEN + 2];
        for len in 1..=MAX_CODE_LEN {
            offsets[len + 1] = offsets[len] + counts[len] as usize;
        }
        let mut symbols = vec![0u16; offsets[MAX_CODE_LEN + 1]];
        for (sym, &len) in lengths.iter().enumerate() {
            if len > 0 {
                symbols[offsets[len as usize]] = sym as u16;
                offsets[len as usize] += 1;
            }
        }
        return Ok(Huffman::Canonical { counts, symbols });
    }

    pub fn decode(&self, bits: &mut BitReader) -> Result<u16, CodecError> {
        let (counts, symbols) = match self {
            Huffman::Single(sym) => return Ok(*sym),
            Huffman::Canonical { counts, symbols } => (counts, symbols),
        };
        let mut code: i32 = 0;
        let mut first: i32 = 0;
        let mut index: i32 = 0;
        for len in 1..=MAX_CODE_LEN {
            code |= bits.getbit()? as i32;
            let count = counts[len] as i32;
            if code - first < count {
                return Ok(symbols[(index + code - first) as usize]);
            }
            index += count;
            first += count;
            first <<= 1;
            code <<= 1;
        }
        return Err(CodecError::CorruptStream("unassigned huffman code"));
    }
}
