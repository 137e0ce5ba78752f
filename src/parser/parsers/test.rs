extern crate std;
use super::super::err::*;
use super::super::parsers;
use super::super::types;

use alloc::vec;
use alloc::vec::Vec;
use bitvec::prelude::*;

fn words(ws: &[u16]) -> Vec<u8> {
    return ws.iter().flat_map(|w| w.to_le_bytes()).collect();
}

#[test]
fn segment_length() {
    let test_cases: &[(&[u8], u32, usize)] = &[
        (&[0x04, 0x00, 0xAA], 4, 1),
        (&[0xFE, 0xFF], 0xFFFE, 0),
        (&[0xFF, 0xFF, 0x00, 0x00, 0x01, 0x00], 0x0001_0000, 0),
    ];

    for (input, expected, expected_len_remaining) in test_cases {
        let (remainder, res) = parsers::segment_length(input).unwrap();

        assert_eq!(res, *expected);
        assert_eq!(remainder.len(), *expected_len_remaining);
    }
}

#[test]
fn segment_length_long_form_truncated() {
    let input = [0xFF, 0xFF, 0x00];
    match parsers::segment_length(&input) {
        Err(nom::Err::Failure(TadParserError {
            kind: TadParserErrorKind::TruncatedSegment { declared, available, .. },
            ..
        })) => {
            assert_eq!(declared, 6);
            assert_eq!(available, 3);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn escape_one_step() {
    let input = words(&[0xFE21, 0x2422]);
    let (rest, esc) = parsers::escape(&input).unwrap();
    assert_eq!(esc, types::Escape { steps: 1, code: 0x21 });
    assert_eq!(esc.plane(), 0x21);
    assert_eq!(rest.len(), 2);
}

#[test]
fn escape_two_steps() {
    let input = words(&[0xFEFE, 0xFE21]);
    let (rest, esc) = parsers::escape(&input).unwrap();
    assert_eq!(esc, types::Escape { steps: 2, code: 0x21 });
    assert_eq!(esc.plane(), 0x121);
    assert!(rest.is_empty());
}

#[test]
fn escape_three_steps() {
    let input = words(&[0xFEFE, 0xFEFE, 0xFE30, 0x0041]);
    let (rest, esc) = parsers::escape(&input).unwrap();
    assert_eq!(esc, types::Escape { steps: 3, code: 0x30 });
    assert_eq!(esc.plane(), 0x230);
    assert_eq!(rest.len(), 2);
}

#[test]
fn escape_four_steps_stops_at_the_cap() {
    let input = words(&[0xFEFE, 0xFEFE, 0xFEFE, 0xFEFE, 0xFEFE]);
    let (rest, esc) = parsers::escape(&input).unwrap();
    assert_eq!(esc, types::Escape { steps: 4, code: 0xFE });
    assert_eq!(esc.plane(), 0x3FE);
    assert_eq!(rest.len(), 2);
}

#[test]
fn escape_ladder_ends_at_a_non_escape_word() {
    let input = words(&[0xFEFE, 0x2422]);
    let (rest, esc) = parsers::escape(&input).unwrap();
    assert_eq!(esc, types::Escape { steps: 1, code: 0xFE });
    assert_eq!(rest.len(), 2);
}

#[test]
fn escape_cut_short() {
    let input = words(&[0xFEFE]);
    assert!(matches!(
        parsers::escape(&input),
        Err(nom::Err::Failure(TadParserError {
            kind: TadParserErrorKind::TruncatedSegment { .. },
            ..
        }))
    ));
}

#[test]
fn token_kinds() {
    let input = words(&[0x2422, 0xFFE1, 0x0002, 0x0001, 0x0000]);
    let (rest, t) = parsers::token(&input).unwrap();
    assert_eq!(t, types::Token::Char(0x2422));
    let (rest, t) = parsers::token(rest).unwrap();
    match t {
        types::Token::Segment(seg) => {
            assert_eq!(seg.id, 0xFFE1);
            assert_eq!(seg.length, 2);
            assert_eq!(seg.word(0), Some(0x0001));
            assert_eq!(seg.kind(), Some(types::SegmentId::TextStart));
        }
        other => panic!("unexpected {:?}", other),
    }
    let (_, t) = parsers::token(rest).unwrap();
    assert_eq!(t, types::Token::End);
}

#[test]
fn low_ff_words_are_characters() {
    let input = words(&[0xFF21]);
    let (_, t) = parsers::token(&input).unwrap();
    assert_eq!(t, types::Token::Char(0xFF21));
}

#[test]
fn truncated_segment_is_an_error_not_an_overread() {
    let input = words(&[0xFFE5, 0x0010, 0x0001]);
    let mut tokens = parsers::Tokens::new(&input);
    match tokens.next() {
        Some(Err(TadParserError {
            kind:
                TadParserErrorKind::TruncatedSegment {
                    declared,
                    available,
                    ..
                },
            ..
        })) => {
            assert_eq!(declared, 0x10);
            assert_eq!(available, 2);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(tokens.next().is_none());
}

#[test]
fn tokens_report_offsets_and_stop_at_end() {
    let input = words(&[0x0041, 0xFFE2, 0x0000, 0x0042, 0x0000, 0x0043]);
    let collected: Vec<(usize, types::Token)> =
        parsers::Tokens::new(&input).map(|t| t.unwrap()).collect();
    assert_eq!(
        collected,
        vec![
            (0, types::Token::Char(0x41)),
            (
                2,
                types::Token::Segment(types::Segment {
                    id: 0xFFE2,
                    length: 0,
                    body: &[],
                })
            ),
            (6, types::Token::Char(0x42)),
            (8, types::Token::End),
        ]
    );
}

#[test]
fn odd_trailing_byte_ends_the_stream() {
    let input = [0x41, 0x00, 0x42];
    let collected: Vec<(usize, types::Token)> =
        parsers::Tokens::new(&input).map(|t| t.unwrap()).collect();
    assert_eq!(
        collected,
        vec![(0, types::Token::Char(0x41)), (2, types::Token::End)]
    );
}

#[test]
fn global_head() {
    let mut input = vec![1u8, 2];
    input.extend_from_slice(&words(&[0x0100, 0xBEEF, 3, 5]));
    for v in [7u32, 8, 9, 10, 11] {
        input.extend_from_slice(&v.to_le_bytes());
    }
    let (rest, head) = parsers::global_head(&input).unwrap();
    assert!(rest.is_empty());
    assert_eq!(input.len(), types::GLOBAL_HEAD_SIZE_BYTES);
    assert_eq!(
        head,
        types::GlobalHead {
            headtype: 1,
            checksum: 2,
            version: 0x0100,
            crc: 0xBEEF,
            nfiles: 3,
            compmethod: types::CompressionMethod::Lh5,
            time: 7,
            filesize: 8,
            orgsize: 9,
            compsize: 10,
            extsize: 11,
        }
    );
}

#[test]
fn global_head_unsupported_compression() {
    let mut input = vec![0u8, 0];
    input.extend_from_slice(&words(&[0, 0, 1, 6]));
    input.extend_from_slice(&[0u8; 20]);
    match parsers::global_head(&input) {
        Err(nom::Err::Failure(e)) => {
            assert_eq!(e.kind, TadParserErrorKind::UnsupportedCompression(6))
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn local_head_size() {
    let mut input = vec![0u8; types::LOCAL_HEAD_SIZE_BYTES];
    // name "AB"
    input[4] = 0x41;
    input[6] = 0x42;
    let (rest, head) = parsers::local_head(&input).unwrap();
    assert!(rest.is_empty());
    assert_eq!(head.name.as_slice(), &[0x41, 0x42]);
}

#[test]
fn record_truncated() {
    let mut input = words(&[1, 0]);
    input.extend_from_slice(&100u32.to_le_bytes());
    input.extend_from_slice(&[0u8; 10]);
    assert!(matches!(
        parsers::record(&input),
        Err(nom::Err::Failure(TadParserError {
            kind: TadParserErrorKind::TruncatedSegment {
                declared: 100,
                available: 10,
                ..
            },
            ..
        }))
    ));
}

#[test]
fn take_bitrows() {
    // 10 pixels wide: two bytes per row, six padding bits each.
    let input = [0b1010_0000, 0b1100_0000, 0b0000_0001, 0b0100_0000, 0xEE];
    let (rest, bits) = parsers::take_bitrows(&input, 10, 2).unwrap();
    assert_eq!(rest, &[0xEE]);
    assert_eq!(
        bits,
        bitvec![u8, Msb0; 1, 0, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1]
    );
}
