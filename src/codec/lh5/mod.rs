//! LHA `-lh5-` decompression.
//!
//! The stream is a sequence of blocks. Each block starts with a 16-bit symbol count
//! and three code length tables (the "pt" table that codes the literal/length
//! lengths, the literal/length table itself, and the position table). The
//! dictionary is the output produced so far and carries across block boundaries.

mod bits;
mod huffman;
#[cfg(test)]
mod test;

use bits::BitReader;
use huffman::Huffman;

use super::{Codec, CodecError};

use alloc::vec;
use alloc::vec::Vec;
use either::Either;
use log::trace;

const DICBIT: u8 = 13;
const MAXMATCH: usize = 256;
const THRESHOLD: usize = 3;
/// Literal bytes plus match lengths.
const NC: usize = u8::MAX as usize + MAXMATCH + 2 - THRESHOLD;
const NP: usize = DICBIT as usize + 1;
const NT: usize = 16 + 3;
const CBIT: u8 = 9;
const PBIT: u8 = 4;
const TBIT: u8 = 5;
/// Longest code length the unary length extension may produce.
const MAX_PT_LEN: u16 = 16;

/// The `-lh5-` codec.
pub struct Lh5 {
    compressed_size: usize,
    original_size: usize,
}

impl Lh5 {
    pub fn new(compressed_size: usize, original_size: usize) -> Lh5 {
        return Lh5 {
            compressed_size,
            original_size,
        };
    }
}

impl Codec for Lh5 {
    fn decode<'a>(&self, data: &'a [u8]) -> Result<Either<&'a [u8], Vec<u8>>, CodecError> {
        let plain = decode(data, self.compressed_size, self.original_size)?;
        return Ok(Either::Right(plain));
    }
}

/// Decompress exactly `original_size` bytes from the first `compressed_size` bytes of `compressed`.
pub fn decode(
    compressed: &[u8],
    compressed_size: usize,
    original_size: usize,
) -> Result<Vec<u8>, CodecError> {
    let input = match compressed.get(..compressed_size) {
        Some(i) => i,
        None => {
            return Err(CodecError::DecompressionUnderrun {
                requested: compressed_size,
                available: compressed.len(),
            })
        }
    };
    let mut decoder = Decoder::new(input);
    // The declared size is untrusted; the buffer grows past this hint as needed.
    let hint = original_size.min(compressed_size.saturating_mul(8));
    let mut out: Vec<u8> = Vec::with_capacity(hint);

    while out.len() < original_size {
        let c = decoder.decode_c()? as usize;
        if c <= u8::MAX as usize {
            out.push(c as u8);
            continue;
        }
        let len = c - (u8::MAX as usize + 1) + THRESHOLD;
        let dist = decoder.decode_p()? as usize + 1;
        if dist > out.len() {
            return Err(CodecError::CorruptStream(
                "back-reference before the start of the output",
            ));
        }
        let start = out.len() - dist;
        for k in 0..len {
            if out.len() == original_size {
                break;
            }
            let b = out[start + k];
            out.push(b);
        }
    }

    trace!(
        "lh5: {} compressed bytes -> {} bytes in {} blocks",
        decoder.bits.consumed(),
        out.len(),
        decoder.blocks
    );
    return Ok(out);
}

struct Decoder<'a> {
    bits: BitReader<'a>,
    /// Symbols left in the current block.
    blocksize: u16,
    blocks: usize,
    c_tree: Huffman,
    p_tree: Huffman,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a [u8]) -> Decoder<'a> {
        return Decoder {
            bits: BitReader::new(input),
            blocksize: 0,
            blocks: 0,
            c_tree: Huffman::Single(0),
            p_tree: Huffman::Single(0),
        };
    }

    fn start_block(&mut self) -> Result<(), CodecError> {
        self.blocksize = self.bits.getbits(16)?;
        if self.blocksize == 0 {
            return Err(CodecError::CorruptStream("empty block"));
        }
        let pt = self.read_pt_len(NT, TBIT, Some(3))?;
        self.c_tree = self.read_c_len(&pt)?;
        self.p_tree = self.read_pt_len(NP, PBIT, None)?;
        self.blocks += 1;
        return Ok(());
    }

    /// Read a "pt" code length table: 3-bit lengths, with 7 extended by a unary run of ones.
    /// After `special` entries a 2-bit count of zero lengths follows.
    fn read_pt_len(
        &mut self,
        nn: usize,
        nbit: u8,
        special: Option<usize>,
    ) -> Result<Huffman, CodecError> {
        let n = self.bits.getbits(nbit)? as usize;
        if n == 0 {
            let c = self.bits.getbits(nbit)?;
            if c as usize >= nn {
                return Err(CodecError::CorruptStream("single pt symbol out of range"));
            }
            return Ok(Huffman::Single(c));
        }
        if n > nn {
            return Err(CodecError::CorruptStream("too many pt lengths"));
        }

        let mut lengths = vec![0u8; nn];
        let mut i = 0;
        while i < n {
            let mut c = self.bits.getbits(3)?;
            if c == 7 {
                while self.bits.getbit()? {
                    c += 1;
                    if c > MAX_PT_LEN {
                        return Err(CodecError::CorruptStream("pt length above 16"));
                    }
                }
            }
            lengths[i] = c as u8;
            i += 1;
            if Some(i) == special {
                let zeros = self.bits.getbits(2)?;
                for _ in 0..zeros {
                    if i >= nn {
                        return Err(CodecError::CorruptStream("pt zero run past the table"));
                    }
                    lengths[i] = 0;
                    i += 1;
                }
            }
        }
        return Huffman::from_lengths(&lengths);
    }

    /// Read the literal/length code lengths, themselves coded with `pt`.
    /// Symbols 0-2 are runs of zero lengths, symbol `k > 2` is length `k - 2`.
    fn read_c_len(&mut self, pt: &Huffman) -> Result<Huffman, CodecError> {
        let n = self.bits.getbits(CBIT)? as usize;
        if n == 0 {
            let c = self.bits.getbits(CBIT)?;
            if c as usize >= NC {
                return Err(CodecError::CorruptStream("single c symbol out of range"));
            }
            return Ok(Huffman::Single(c));
        }
        if n > NC {
            return Err(CodecError::CorruptStream("too many c lengths"));
        }

        let mut lengths = vec![0u8; NC];
        let mut i = 0;
        while i < n {
            let c = pt.decode(&mut self.bits)?;
            if c <= 2 {
                let run = match c {
                    0 => 1,
                    1 => self.bits.getbits(4)? as usize + 3,
                    _ => self.bits.getbits(CBIT)? as usize + 20,
                };
                if i + run > NC {
                    return Err(CodecError::CorruptStream("c zero run past the table"));
                }
                i += run;
            } else {
                lengths[i] = (c - 2) as u8;
                i += 1;
            }
        }
        return Huffman::from_lengths(&lengths);
    }

    fn decode_c(&mut self) -> Result<u16, CodecError> {
        if self.blocksize == 0 {
            self.start_block()?;
        }
        self.blocksize -= 1;
        return self.c_tree.decode(&mut self.bits);
    }

    fn decode_p(&mut self) -> Result<u16, CodecError> {
        let j = self.p_tree.decode(&mut self.bits)?;
        if j == 0 {
            return Ok(0);
        }
        let extra = self.bits.getbits((j - 1) as u8)?;
        return Ok((1u16 << (j - 1)) + extra);
    }
}
