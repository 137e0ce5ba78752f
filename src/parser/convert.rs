//! Typed conversions for the format's integer kinds.
//!
//! The format only ever stores `UH` words. Everything wider is
//! assembled from them with the functions below.

/// Convert a u64 to usize or error on failure.
macro_rules! to_usize_or_err {
( $( $x:expr ),+ ) => {
        {
            $(
                use core::convert::TryFrom;
                match usize::try_from($x) {
                       Ok(res) => res,
                       Err(e) => return Err(nom::Err::Error(crate::parser::TadParserError::new(crate::parser::TadParserErrorKind::ToUsizeConversionFailure(e)))),
               }
            )+
        }
    };
}

/// Assemble a `UW` from its two words, low word first.
pub fn long(lo: u16, hi: u16) -> u32 {
    return (lo as u32) | ((hi as u32) << 16);
}

/// Split a word into its upper and lower byte.
pub fn split_word(word: u16) -> (u8, u8) {
    return ((word >> 8) as u8, (word & 0xFF) as u8);
}

#[cfg(test)]
mod test {
    #[test]
    fn long_is_low_word_first() {
        assert_eq!(super::long(0x5678, 0x1234), 0x1234_5678);
    }

    #[test]
    fn split() {
        assert_eq!(super::split_word(0x0A01), (0x0A, 0x01));
    }
}
