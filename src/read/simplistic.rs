//! This module provides a "simplistic" API for decoding buffers.
//!
//! It trades off precise control for ease of use.

use super::archive::{detect, file_identifier, Detected};
use super::{Archive, DecodeOptions, DecodedFile, DocumentKind, DocumentSet, Error, RecordOutput};
use crate::decode::{Decoder, LinkTable, RecordContext};
use crate::parser::crc::session_crc32;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use log::info;

/// Decode a plain TAD buffer or a whole book-pack archive with default options.
pub fn decode(buffer: &[u8]) -> Result<DocumentSet, Error> {
    return decode_with(buffer, &DecodeOptions::default());
}

/// Decode a plain TAD buffer or a whole book-pack archive.
///
/// Errors confined to one file or record are reported inside the returned set.
/// Archive-level errors and cancellation fail the whole call.
pub fn decode_with(buffer: &[u8], opts: &DecodeOptions) -> Result<DocumentSet, Error> {
    match detect(buffer) {
        Detected::Archive { .. } => return decode_archive(buffer, opts),
        Detected::Spreadsheet => return decode_plain(buffer, DocumentKind::Spreadsheet, opts),
        Detected::Plain => return decode_plain(buffer, DocumentKind::Plain, opts),
    }
}

fn decode_archive(buffer: &[u8], opts: &DecodeOptions) -> Result<DocumentSet, Error> {
    let ar = Archive::parse_with(buffer, opts)?;
    let mut decoder = Decoder::new();
    let mut files = Vec::with_capacity(ar.len());
    for file in ar.files() {
        files.push(file.decode_with(&mut decoder, opts)?);
    }
    return Ok(DocumentSet {
        kind: DocumentKind::Archive,
        files,
    });
}

/// A plain buffer is one file holding one record, with no name and no links.
fn decode_plain(
    buffer: &[u8],
    kind: DocumentKind,
    opts: &DecodeOptions,
) -> Result<DocumentSet, Error> {
    opts.check_cancel()?;
    let identifier = file_identifier(session_crc32(buffer), 0);
    info!("plain {:?} document {}", kind, identifier);
    let mut links = LinkTable::new();
    let ctx = RecordContext {
        identifier: &identifier,
        record: 0,
        links: &mut links,
        images: opts.images,
    };
    let record = Decoder::new().decode_record(ctx, buffer);
    return Ok(DocumentSet {
        kind,
        files: vec![DecodedFile {
            index: 0,
            identifier,
            name: String::new(),
            records: Ok(vec![RecordOutput::Document(record)]),
        }],
    });
}

/// Decode the archive member named `name`.
///
/// This involves parsing the entire archive and
/// iterating over all file descriptors for each file extracted, so it's not very efficient.
pub fn extract_file(name: &str, archive_data: &[u8]) -> Result<DecodedFile, Error> {
    let ar = Archive::parse(archive_data)?;
    let mut files = ar.files();
    let file = match files.find(|x| x.name() == name) {
        Some(f) => f,
        None => return Err(Error::NoSuchFileName(String::from(name))),
    };
    return file.decode();
}
