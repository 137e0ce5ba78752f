use super::{Codec, CodecError};

use alloc::vec::Vec;
use either::Either;

/// The trivial codec.
/// Hands back the first `size` bytes it gets.
pub struct Stored {
    size: usize,
}

impl Stored {
    /// Creates a new `Stored` codec for a payload of `size` bytes.
    pub fn new(size: usize) -> Stored {
        return Stored { size };
    }
}

impl Codec for Stored {
    fn decode<'a>(&self, data: &'a [u8]) -> Result<Either<&'a [u8], Vec<u8>>, CodecError> {
        match data.get(..self.size) {
            Some(payload) => return Ok(Either::Left(payload)),
            None => {
                return Err(CodecError::DecompressionUnderrun {
                    requested: self.size,
                    available: data.len(),
                })
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn borrows_the_prefix() {
        let data = [1u8, 2, 3, 4];
        let out = Stored::new(3).decode(&data).unwrap();
        assert_eq!(out, Either::Left(&data[..3]));
    }

    #[test]
    fn short_input() {
        let data = [1u8, 2];
        assert_eq!(
            Stored::new(3).decode(&data),
            Err(CodecError::DecompressionUnderrun {
                requested: 3,
                available: 2
            })
        );
    }
}
