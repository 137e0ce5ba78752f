//! TRON character codes to Unicode.
//!
//! Only the JIS plane is mapped. Its single-byte half covers ASCII and
//! half-width katakana, its double-byte half is JIS X 0208, which is
//! decoded through `encoding_rs`'s EUC-JP tables.

use crate::parser::split_word;

use alloc::string::String;
use encoding_rs::EUC_JP;

/// The plane a stream starts in.
pub const JIS_PLANE: u32 = 0x21;
/// Stand-in for anything without a mapping.
pub const GETA: char = '\u{3013}';

pub fn decode_char(plane: u32, code: u16) -> char {
    if plane != JIS_PLANE {
        return GETA;
    }
    let (hi, lo) = split_word(code);
    if hi == 0 {
        if (0x20..=0x7E).contains(&lo) {
            return lo as char;
        }
        if (0xA1..=0xDF).contains(&lo) {
            return euc_jp(&[0x8E, lo]);
        }
        return GETA;
    }
    if (0x21..=0x7E).contains(&hi) && (0x21..=0x7E).contains(&lo) {
        return euc_jp(&[hi | 0x80, lo | 0x80]);
    }
    return GETA;
}

fn euc_jp(bytes: &[u8]) -> char {
    let (text, had_errors) = EUC_JP.decode_without_bom_handling(bytes);
    if had_errors {
        return GETA;
    }
    return text.chars().next().unwrap_or(GETA);
}

/// Decode a TRON string, following plane switches inside it. Stops at the first null.
pub fn decode_str(words: &[u16]) -> String {
    let mut out = String::new();
    let mut plane = JIS_PLANE;
    let mut i = 0;
    while i < words.len() {
        let w = words[i];
        i += 1;
        if w == 0 {
            break;
        }
        if w >> 8 == 0xFE {
            let mut steps = 1;
            let mut last = w;
            while last == 0xFEFE && steps < 4 && i < words.len() && words[i] >> 8 == 0xFE {
                last = words[i];
                i += 1;
                steps += 1;
            }
            plane = ((steps - 1) << 8) | (last & 0xFF) as u32;
            continue;
        }
        if w < 0x20 {
            continue;
        }
        out.push(decode_char(plane, w));
    }
    return out;
}
