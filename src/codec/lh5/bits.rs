use super::super::CodecError;

/// Reads the compressed stream MSB first, the way LHA packs it.
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    bitbuf: u32,
    bitcount: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> BitReader<'a> {
        return BitReader {
            data,
            pos: 0,
            bitbuf: 0,
            bitcount: 0,
        };
    }

    /// Take the next `n` bits (at most 16) as an unsigned value.
    pub fn getbits(&mut self, n: u8) -> Result<u16, CodecError> {
        debug_assert!(n <= 16);
        while self.bitcount < n {
            let byte = match self.data.get(self.pos) {
                Some(b) => *b,
                None => {
                    return Err(CodecError::DecompressionUnderrun {
                        requested: self.pos + 1,
                        available: self.data.len(),
                    })
                }
            };
            self.pos += 1;
            self.bitbuf = (self.bitbuf << 8) | byte as u32;
            self.bitcount += 8;
        }
        self.bitcount -= n;
        let value = (self.bitbuf >> self.bitcount) & ((1u32 << n) - 1);
        self.bitbuf &= (1u32 << self.bitcount) - 1;
        return Ok(value as u16);
    }

    pub fn getbit(&mut self) -> Result<bool, CodecError> {
        return Ok(self.getbits(1)? == 1);
    }

    /// Compressed bytes pulled in so far.
    pub fn consumed(&self) -> usize {
        return self.pos;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn msb_first() {
        let data = [0b1011_0010, 0b0111_1111];
        let mut bits = BitReader::new(&data);
        assert_eq!(bits.getbits(3).unwrap(), 0b101);
        assert!(bits.getbit().unwrap());
        assert_eq!(bits.getbits(8).unwrap(), 0b0010_0111);
        assert_eq!(bits.getbits(4).unwrap(), 0b1111);
        assert_eq!(
            bits.getbits(1),
            Err(CodecError::DecompressionUnderrun {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn sixteen_bits_across_three_bytes() {
        let data = [0xAB, 0xCD, 0xEF];
        let mut bits = BitReader::new(&data);
        assert_eq!(bits.getbits(4).unwrap(), 0xA);
        assert_eq!(bits.getbits(16).unwrap(), 0xBCDE);
        assert_eq!(bits.getbits(4).unwrap(), 0xF);
        assert_eq!(bits.consumed(), 3);
    }
}
