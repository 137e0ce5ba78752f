//! This module exposes the CRC algorithms used by the book-pack format.

use crc::*;

/// CRC-16 as computed by LHA over decompressed data (reflected polynomial 0xA001, init 0).
pub const CRC_16_LHA: Algorithm<u16> = Algorithm {
    width: 16,
    poly: 0x8005,
    init: 0x0000,
    refin: true,
    refout: true,
    xorout: 0x0000,
    check: 0xbb3d,
    residue: 0x0000,
};

/// CRC-32 used to derive session identifiers from the raw input.
pub const CRC_32_SESSION: Algorithm<u32> = Algorithm {
    width: 32,
    poly: 0x04c11db7,
    init: 0xffffffff,
    refin: true,
    refout: true,
    xorout: 0xffffffff,
    check: 0xcbf43926,
    residue: 0xdebb20e3,
};

pub fn lha_crc16(input: &[u8]) -> u16 {
    let algo = Crc::<u16>::new(&CRC_16_LHA);
    let mut digest = algo.digest();
    digest.update(input);
    return digest.finalize();
}

pub fn session_crc32(input: &[u8]) -> u32 {
    let algo = Crc::<u32>::new(&CRC_32_SESSION);
    let mut digest = algo.digest();
    digest.update(input);
    return digest.finalize();
}

#[cfg(test)]
mod test {
    #[test]
    fn lha_crc16_check_value() {
        assert_eq!(super::lha_crc16(b"123456789"), 0xbb3d);
        assert_eq!(super::lha_crc16(b""), 0);
    }

    #[test]
    fn session_crc32_check_value() {
        assert_eq!(super::session_crc32(b"123456789"), 0xcbf43926);
    }
}
