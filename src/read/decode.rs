//! This module implements dispatching file contents to decoders.

use super::{CrcPolicy, DecodeOptions, Error, RecordOutput};
use crate::codec::*;
use crate::decode::{exec_function, Decoder, LinkTable, RecordContext, ResolvedLink};
use crate::parser::crc::lha_crc16;
use crate::parser::parsers::{link_record, record};
use crate::parser::types::{RecordHead, RecordType};
use crate::parser::finish;

use alloc::string::String;
use alloc::vec::Vec;
use core::convert::TryFrom;
use either::Either;
use log::{debug, warn};

/// Handle dispatching data to the appropriate codec.
///
/// Stored data is handed back as a subslice of `data`.
pub fn decompress(
    data: &[u8],
    method: u16,
    compressed_size: usize,
    original_size: usize,
) -> Result<Either<&[u8], Vec<u8>>, CodecError> {
    let codec_kind = Codecs::try_from(method)?;
    match codec_kind {
        Codecs::Stored => return Stored::new(original_size).decode(data),
        Codecs::Lh5 => return Lh5::new(compressed_size, original_size).decode(data),
    }
}

/// Compute the CRC-16 of decompressed bytes and hold it against the header's.
pub fn check_crc(plain: &[u8], expected: u16, policy: CrcPolicy) -> Result<u16, Error> {
    let actual = lha_crc16(plain);
    if policy == CrcPolicy::Ignore || actual == expected {
        return Ok(actual);
    }
    if policy == CrcPolicy::Enforce {
        return Err(Error::CrcMismatch { expected, actual });
    }
    warn!(
        "crc mismatch: header says {:#06x}, data gives {:#06x}",
        expected, actual
    );
    return Ok(actual);
}

/// Split a file's bytes into its `nrec` records.
pub fn split_records(plain: &[u8], nrec: usize) -> Result<Vec<(RecordHead, &[u8])>, Error> {
    let mut records = Vec::with_capacity(nrec);
    let mut rest = plain;
    for _ in 0..nrec {
        let (next, rec) = finish(rest, record(rest)).map_err(|e| Error::from_parser(plain, e))?;
        records.push(rec);
        rest = next;
    }
    if !rest.is_empty() {
        debug!("{} bytes after the last record", rest.len());
    }
    return Ok(records);
}

/// Decode every record of one file.
///
/// Link records are resolved against `identifiers` first, so each virtual object finds its
/// target whatever order the records come in.
pub fn decode_records(
    decoder: &mut Decoder,
    identifier: &str,
    records: &[(RecordHead, &[u8])],
    identifiers: &[String],
    opts: &DecodeOptions,
) -> Result<Vec<RecordOutput>, Error> {
    let mut links = LinkTable::new();
    for (_, body) in records.iter().filter(|(h, _)| h.record_type == RecordType::Link) {
        let (_, raw) = finish(body, link_record(body)).map_err(|e| Error::from_parser(body, e))?;
        let target = match raw.file_ref {
            0 => None,
            n => identifiers.get(n as usize - 1).cloned(),
        };
        if target.is_none() {
            debug!("link to file {} of {} resolves to nothing", raw.file_ref, identifier);
        }
        links.push(ResolvedLink {
            file_ref: raw.file_ref,
            name: crate::decode::decode_str(raw.name.as_slice()),
            target,
            geometry: None,
        });
    }

    // Link records are filled in last, once the virtual objects have given them geometry.
    let mut outputs: Vec<Option<RecordOutput>> = Vec::with_capacity(records.len());
    let mut link_slots = Vec::new();
    for (index, (head, body)) in records.iter().enumerate() {
        opts.check_cancel()?;
        let out = match head.record_type {
            RecordType::Link => {
                link_slots.push(index);
                None
            }
            RecordType::Tad => {
                let ctx = RecordContext {
                    identifier,
                    record: index,
                    links: &mut links,
                    images: opts.images,
                };
                Some(RecordOutput::Document(decoder.decode_record(ctx, body)))
            }
            RecordType::ExecFunction => Some(RecordOutput::ExecFunction {
                subtype: head.subtype,
                tags: exec_function(head.subtype, body),
            }),
            RecordType::Opaque(record_type) => Some(RecordOutput::Opaque {
                record_type,
                subtype: head.subtype,
                size: head.size,
            }),
        };
        outputs.push(out);
    }
    for (slot, link) in link_slots.into_iter().zip(links.into_entries()) {
        outputs[slot] = Some(RecordOutput::Link(link));
    }
    return Ok(outputs.into_iter().flatten().collect());
}
