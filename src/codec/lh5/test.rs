use super::*;
use crate::parser::crc::lha_crc16;

extern crate std;
use alloc::vec;

const PROSE_PACKED: &[u8] = include_bytes!("../../../testdata/lh5_prose.bin");
const PROSE_PLAIN: &[u8] = include_bytes!("../../../testdata/lh5_prose.txt");
const SINGLE_PACKED: &[u8] = include_bytes!("../../../testdata/lh5_single.bin");

/// Fixture layout: original size u32, compressed size u32, CRC-16 u16, stream.
fn split_fixture(raw: &[u8]) -> (usize, usize, u16, &[u8]) {
    let orig = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize;
    let comp = u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]) as usize;
    let crc = u16::from_le_bytes([raw[8], raw[9]]);
    return (orig, comp, crc, &raw[10..]);
}

#[test]
fn multi_block_stream() {
    let (orig, comp, crc, stream) = split_fixture(PROSE_PACKED);
    assert_eq!(orig, PROSE_PLAIN.len());
    let out = decode(stream, comp, orig).unwrap();
    assert_eq!(out.len(), orig);
    assert_eq!(&out[..], PROSE_PLAIN);
    assert_eq!(lha_crc16(&out), crc);
}

#[test]
fn single_symbol_trees() {
    let (orig, comp, crc, stream) = split_fixture(SINGLE_PACKED);
    let out = decode(stream, comp, orig).unwrap();
    assert_eq!(out, vec![b'a']);
    assert_eq!(lha_crc16(&out), crc);
}

#[test]
fn output_stops_at_original_size() {
    let (_, comp, _, stream) = split_fixture(PROSE_PACKED);
    let out = decode(stream, comp, 100).unwrap();
    assert_eq!(&out[..], &PROSE_PLAIN[..100]);
}

#[test]
fn codec_trait_hands_back_owned_data() {
    let (orig, comp, _, stream) = split_fixture(SINGLE_PACKED);
    let out = Lh5::new(comp, orig).decode(stream).unwrap();
    assert_eq!(out, Either::Right(vec![b'a']));
}

#[test]
fn short_compressed_input() {
    let (orig, comp, _, stream) = split_fixture(PROSE_PACKED);
    assert_eq!(
        decode(&stream[..comp / 2], comp, orig),
        Err(CodecError::DecompressionUnderrun {
            requested: comp,
            available: comp / 2
        })
    );
}

#[test]
fn bit_reader_runs_dry() {
    let (orig, comp, _, stream) = split_fixture(PROSE_PACKED);
    let cut = comp / 2;
    match decode(&stream[..cut], cut, orig) {
        Err(CodecError::DecompressionUnderrun { .. }) => {}
        other => panic!("expected an underrun, got {:?}", other.map(|v| v.len())),
    }
}

#[test]
fn huge_declared_size_is_not_trusted() {
    let (_, comp, _, stream) = split_fixture(SINGLE_PACKED);
    match decode(stream, comp, usize::MAX) {
        Err(CodecError::DecompressionUnderrun { .. }) | Err(CodecError::CorruptStream(_)) => {}
        other => panic!("expected the stream to run dry, got {:?}", other.map(|v| v.len())),
    }
}

#[test]
fn empty_block_is_corrupt() {
    assert_eq!(
        decode(&[0, 0, 0, 0], 4, 1),
        Err(CodecError::CorruptStream("empty block"))
    );
}

#[test]
fn reference_before_start_is_corrupt() {
    // One block of one symbol. Single-symbol trees throughout:
    // t-tree (n=0, sym 0), c-tree (n=0, sym 256 = match of 3), p-tree (n=0, sym 0).
    // blocksize=1 | TBIT 0 | TBIT 0 | CBIT 0 | CBIT 256 | PBIT 0 | PBIT 0
    let mut bits: u64 = 0;
    let mut n = 0;
    for (width, value) in [(16u32, 1u64), (5, 0), (5, 0), (9, 0), (9, 256), (4, 0), (4, 0)] {
        bits = (bits << width) | value;
        n += width;
    }
    let pad = (8 - n % 8) % 8;
    bits <<= pad;
    let total = ((n + pad) / 8) as usize;
    let bytes: std::vec::Vec<u8> = (0..total)
        .map(|i| (bits >> (8 * (total - 1 - i))) as u8)
        .collect();
    assert_eq!(
        decode(&bytes, bytes.len(), 3),
        Err(CodecError::CorruptStream(
            "back-reference before the start of the output"
        ))
    );
}
