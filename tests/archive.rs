use tad::{
    Archive, CancelToken, CrcPolicy, DecodeOptions, DecodedFile, DecodedRecord, DocumentKind,
    Error, RecordOutput, RecordType,
};

const ARCHIVE: &[u8] = include_bytes!("../testdata/archive.tad");

fn records(file: &DecodedFile) -> &[RecordOutput] {
    return file.records.as_ref().unwrap();
}

fn document(out: &RecordOutput) -> &DecodedRecord {
    match out {
        RecordOutput::Document(Ok(rec)) => return rec,
        other => panic!("expected a decoded document, got {:?}", other),
    }
}

#[test]
fn files_get_distinct_identifiers_from_one_session() {
    let set = tad::decode(ARCHIVE).unwrap();
    assert_eq!(set.kind, DocumentKind::Archive);
    let ids: Vec<&str> = set.files.iter().map(|f| f.identifier.as_str()).collect();
    assert_eq!(ids, ["6854d5ad-0000", "6854d5ad-0001", "6854d5ad-0002"]);
    let names: Vec<&str> = set.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Main", "Figure", "Notes"]);
    for (i, f) in set.files.iter().enumerate() {
        assert_eq!(f.index, i);
    }
}

#[test]
fn main_document() {
    let set = tad::decode(ARCHIVE).unwrap();
    let main = records(&set.files[0]);
    assert_eq!(main.len(), 3);
    let rec = document(&main[2]);
    assert_eq!(
        rec.tags,
        concat!(
            "<tad><document>",
            "<text left=\"0\" top=\"0\" right=\"500\" bottom=\"700\" drawleft=\"0\" drawtop=\"0\" ",
            "drawright=\"500\" drawbottom=\"700\" hunit=\"72\" vunit=\"72\"/>",
            "<p><font size=\"24\"/>Hello <underline>World</underline></p>",
            "<p><underline>next</underline>",
            "<link id=\"6854d5ad-0001\" name=\"Figure\" vobjleft=\"10\" vobjtop=\"10\" ",
            "vobjright=\"110\" vobjbottom=\"40\" height=\"16\" chsz=\"0\" frcol=\"#000000\" ",
            "chcol=\"#000000\" tbcol=\"#000000\" bgcol=\"#000000\"/>",
            "\u{3042}\u{3044}",
            "<image href=\"6854d5ad-0000_2_0.png\" left=\"0\" top=\"0\" right=\"2\" bottom=\"2\" ",
            "width=\"2\" height=\"2\"/>",
            "<link id=\"6854d5ad-0002\" name=\"Notes\" vobjleft=\"10\" vobjtop=\"50\" ",
            "vobjright=\"110\" vobjbottom=\"80\" height=\"16\" chsz=\"0\" frcol=\"#000000\" ",
            "chcol=\"#000000\" tbcol=\"#000000\" bgcol=\"#000000\"/>",
            "</p></document></tad>"
        )
    );
    assert!(rec.diagnostics.is_empty());
    assert!(!rec.repaired);

    assert_eq!(rec.images.len(), 1);
    let image = &rec.images[0];
    assert_eq!(image.name, "6854d5ad-0000_2_0.png");
    assert_eq!((image.width, image.height), (2, 2));
    assert_eq!(image.rgb, [0xFF, 0xFF, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn links_resolve_to_member_files() {
    let set = tad::decode(ARCHIVE).unwrap();
    let links: Vec<_> = records(&set.files[0])
        .iter()
        .filter_map(|r| match r {
            RecordOutput::Link(link) => Some(link),
            _ => None,
        })
        .collect();
    assert_eq!(links.len(), 2);

    assert_eq!(links[0].name, "Figure");
    assert_eq!(links[0].file_ref, 2);
    let target = links[0].target.as_deref().unwrap();
    assert_eq!(set.file(target).unwrap().name, "Figure");
    let geometry = links[0].geometry.unwrap();
    assert_eq!(
        (geometry.left, geometry.top, geometry.right, geometry.bottom),
        (10, 10, 110, 40)
    );

    assert_eq!(links[1].name, "Notes");
    assert_eq!(links[1].target.as_deref(), Some("6854d5ad-0002"));
    assert_eq!(links[1].geometry.unwrap().top, 50);
}

#[test]
fn figure_document() {
    let set = tad::decode(ARCHIVE).unwrap();
    let rec = document(&records(&set.files[1])[0]);
    assert_eq!(
        rec.tags,
        concat!(
            "<tad><figure left=\"0\" top=\"0\" right=\"200\" bottom=\"200\" drawleft=\"0\" ",
            "drawtop=\"0\" drawright=\"200\" drawbottom=\"200\" hunit=\"72\" vunit=\"72\">",
            "<rect x=\"10\" y=\"10\" width=\"50\" height=\"30\" stroke=\"#000000\" ",
            "strokewidth=\"1\" linetype=\"1\" fill=\"none\" z=\"0\"/>",
            "<line points=\"0,0 50,50\" stroke=\"#000000\" strokewidth=\"2\" linetype=\"1\" ",
            "z=\"1\" arrowstart=\"1\" arrowend=\"1\"/>",
            "<ellipse cx=\"80\" cy=\"75\" rx=\"10\" ry=\"5\" stroke=\"#000000\" ",
            "strokewidth=\"1\" linetype=\"1\" fill=\"none\" z=\"2\"/>",
            "</figure></tad>"
        )
    );
}

#[test]
fn notes_records() {
    let set = tad::decode(ARCHIVE).unwrap();
    let notes = records(&set.files[2]);
    assert_eq!(notes.len(), 3);
    assert_eq!(
        document(&notes[0]).tags,
        "<tad><document><p>notes &amp; &lt;tags&gt;</p></document></tad>"
    );
    assert_eq!(
        notes[1],
        RecordOutput::ExecFunction {
            subtype: 3,
            tags: String::from("<execfunc subtype=\"3\" data=\"1234 5678\"/>"),
        }
    );
    assert_eq!(
        notes[2],
        RecordOutput::Opaque {
            record_type: 5,
            subtype: 1,
            size: 4
        }
    );
}

#[test]
fn decoding_twice_gives_the_same_result() {
    assert_eq!(tad::decode(ARCHIVE).unwrap(), tad::decode(ARCHIVE).unwrap());
}

#[test]
fn images_can_be_left_undecoded() {
    let opts = DecodeOptions::new().images(false);
    let set = tad::decode_with(ARCHIVE, &opts).unwrap();
    let rec = document(&records(&set.files[0])[2]);
    assert!(rec.images.is_empty());
    assert!(rec.tags.contains("<image href=\"6854d5ad-0000_2_0.png\""));
}

#[test]
fn extract_by_name() {
    let notes = tad::extract_file("Notes", ARCHIVE).unwrap();
    assert_eq!(notes.identifier, "6854d5ad-0002");
    assert_eq!(notes.index, 2);
    assert_eq!(records(&notes).len(), 3);

    assert_eq!(
        tad::extract_file("Missing", ARCHIVE),
        Err(Error::NoSuchFileName(String::from("Missing")))
    );
}

#[test]
fn archive_iterator() {
    let ar = Archive::parse(ARCHIVE).unwrap();
    assert_eq!(ar.len(), 3);
    assert_eq!(ar.session(), 0x6854d5ad);
    assert_eq!(ar.crc(), ar.global_head().crc);
    assert_eq!(ar.files().len(), 3);

    let names: Vec<String> = ar.files().map(|f| f.name()).collect();
    assert_eq!(names, ["Main", "Figure", "Notes"]);

    let notes = ar.files().nth(2).unwrap();
    assert_eq!(notes.identifier(), "6854d5ad-0002");
    let contents = notes.extract_contents_vec().unwrap();
    assert_eq!(contents.len(), notes.size() as usize);
    let kinds: Vec<RecordType> = notes
        .records()
        .unwrap()
        .into_iter()
        .map(|r| r.record_type)
        .collect();
    assert_eq!(
        kinds,
        [RecordType::Tad, RecordType::ExecFunction, RecordType::Opaque(5)]
    );
}

#[test]
fn cancellation() {
    let token = CancelToken::new();
    token.cancel();
    let opts = DecodeOptions::new().cancel_token(token);
    assert_eq!(tad::decode_with(ARCHIVE, &opts), Err(Error::Cancelled));
}

#[test]
fn crc_policy() {
    let mut broken = ARCHIVE.to_vec();
    // low byte of the global head's crc field
    broken[14] ^= 0xFF;

    assert!(tad::decode(&broken).is_ok());
    let enforce = DecodeOptions::new().crc(CrcPolicy::Enforce);
    assert!(matches!(
        tad::decode_with(&broken, &enforce),
        Err(Error::CrcMismatch { .. })
    ));
    assert!(tad::decode_with(ARCHIVE, &enforce).is_ok());
}

#[test]
fn truncated_archive_stream() {
    assert!(matches!(
        tad::decode(&ARCHIVE[..200]),
        Err(Error::DecompressionUnderrun { .. })
    ));
}

#[test]
fn plain_documents() {
    let mut plain = Vec::new();
    for w in [0xFFE1u16, 0, 'o' as u16, 'k' as u16, 0xFFE2, 0, 0] {
        plain.extend_from_slice(&w.to_le_bytes());
    }
    let set = tad::decode(&plain).unwrap();
    assert_eq!(set.kind, DocumentKind::Plain);
    assert_eq!(set.files.len(), 1);
    let file = &set.files[0];
    assert!(file.identifier.ends_with("-0000"));
    assert_eq!(file.name, "");
    assert_eq!(
        document(&records(file)[0]).tags,
        "<tad><document><p>ok</p></document></tad>"
    );
}

#[test]
fn truncated_plain_buffer() {
    let mut plain = Vec::new();
    for w in [0xFFE1u16, 0, 'a' as u16, 0xFFE2, 40] {
        plain.extend_from_slice(&w.to_le_bytes());
    }
    let set = tad::decode(&plain).unwrap();
    assert_eq!(
        records(&set.files[0]),
        [RecordOutput::Document(Err(Error::TruncatedSegment {
            offset: 6,
            declared: 40,
            available: 0
        }))]
    );
}

#[test]
fn spreadsheet_documents() {
    let mut buf = Vec::new();
    for w in [0xFFE7u16, 18, 0x8000, 0xC002, 0x8000, 0, 0, 7, 0, 0, 6] {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    let set = tad::decode(&buf).unwrap();
    assert_eq!(set.kind, DocumentKind::Spreadsheet);
    assert_eq!(
        document(&records(&set.files[0])[0]).tags,
        "<tad><cell col=\"0\" row=\"0\" size=\"24\" color=\"yellow\"/></tad>"
    );
}

#[test]
fn a_session_decoder_can_be_reused() {
    let ar = Archive::parse(ARCHIVE).unwrap();
    let mut decoder = tad::decode::Decoder::new();
    let opts = DecodeOptions::default();
    let first: Vec<DecodedFile> = ar
        .files()
        .map(|f| f.decode_with(&mut decoder, &opts).unwrap())
        .collect();
    assert_eq!(first, tad::decode(ARCHIVE).unwrap().files);
}
