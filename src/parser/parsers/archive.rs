use super::*;

use core::convert::TryFrom;

pub fn app_id(input: &[u8]) -> TadResult<[u16; 3]> {
    let (input, a) = context("app_id word 0", le_u16)(input)?;
    let (input, b) = context("app_id word 1", le_u16)(input)?;
    let (input, c) = context("app_id word 2", le_u16)(input)?;
    return Ok((input, [a, b, c]));
}

pub fn compression_method(input: &[u8]) -> TadResult<CompressionMethod> {
    let (input, raw) = context("compression_method", le_u16)(input)?;
    match CompressionMethod::try_from(raw) {
        Ok(m) => return Ok((input, m)),
        Err(_) => {
            return Err(nom::Err::Failure(TadParserError::new(
                TadParserErrorKind::UnsupportedCompression(raw),
            )))
        }
    }
}

pub fn global_head(input: &[u8]) -> TadResult<GlobalHead> {
    let (input, headtype) = context("global_head headtype", u8)(input)?;
    let (input, checksum) = context("global_head checksum", u8)(input)?;
    let (input, version) = context("global_head version", le_u16)(input)?;
    let (input, crc) = context("global_head crc", le_u16)(input)?;
    let (input, nfiles) = context("global_head nfiles", le_u16)(input)?;
    let (input, compmethod) = context("global_head compmethod", compression_method)(input)?;
    let (input, time) = context("global_head time", le_u32)(input)?;
    let (input, filesize) = context("global_head filesize", le_u32)(input)?;
    let (input, orgsize) = context("global_head orgsize", le_u32)(input)?;
    let (input, compsize) = context("global_head compsize", le_u32)(input)?;
    let (input, extsize) = context("global_head extsize", le_u32)(input)?;
    return Ok((
        input,
        GlobalHead {
            headtype,
            checksum,
            version,
            crc,
            nfiles,
            compmethod,
            time,
            filesize,
            orgsize,
            compsize,
            extsize,
        },
    ));
}

pub fn local_head(input: &[u8]) -> TadResult<LocalHead> {
    let (input, f_type) = context("local_head f_type", le_u16)(input)?;
    let (input, f_atype) = context("local_head f_atype", le_u16)(input)?;
    let (input, name) = context("local_head name", |i| tc_string(i, NAME_LEN))(input)?;
    let (input, compmethod) = context("local_head compmethod", le_u16)(input)?;
    let (input, origsize) = context("local_head origsize", le_u32)(input)?;
    let (input, compsize) = context("local_head compsize", le_u32)(input)?;
    let (input, nrec) = context("local_head nrec", le_u16)(input)?;
    let (input, offset) = context("local_head offset", le_u32)(input)?;
    let (input, ltime) = context("local_head ltime", le_u32)(input)?;
    let (input, atime) = context("local_head atime", le_u32)(input)?;
    let (input, mtime) = context("local_head mtime", le_u32)(input)?;
    let (input, ctime) = context("local_head ctime", le_u32)(input)?;
    let (input, nlink) = context("local_head nlink", le_u16)(input)?;
    let (input, _reserved) = context("local_head reserved", le_u16)(input)?;
    return Ok((
        input,
        LocalHead {
            f_type,
            f_atype,
            name,
            compmethod,
            origsize,
            compsize,
            nrec,
            offset,
            ltime,
            atime,
            mtime,
            ctime,
            nlink,
        },
    ));
}

pub fn local_heads(input: &[u8], nfiles: usize) -> TadResult<Vec<LocalHead>> {
    return context("local_heads", count(local_head, nfiles))(input);
}

pub fn record_head(input: &[u8]) -> TadResult<RecordHead> {
    let (input, record_type) = context("record_head type", le_u16)(input)?;
    let (input, subtype) = context("record_head subtype", le_u16)(input)?;
    let (input, size) = context("record_head size", le_u32)(input)?;
    return Ok((
        input,
        RecordHead {
            record_type: RecordType::from(record_type),
            subtype,
            size,
        },
    ));
}

/// A record head followed by its body. A body shorter than declared is a truncation.
pub fn record(input: &[u8]) -> TadResult<(RecordHead, &[u8])> {
    let (rest, head) = record_head(input)?;
    let size = to_usize_or_err!(head.size as u64);
    if rest.len() < size {
        return Err(truncated(input, head.size as u64, rest.len()));
    }
    let (rest, body) = context("record body", take(size))(rest)?;
    return Ok((rest, (head, body)));
}

pub fn link_record(input: &[u8]) -> TadResult<LinkRecord> {
    let (input, name) = context("link_record name", |i| tc_string(i, NAME_LEN))(input)?;
    let (input, file_ref) = context("link_record file_ref", le_u16)(input)?;
    let attr_words = core::cmp::min(input.len() / 2, 5);
    let (input, attrs) = context("link_record attrs", count(le_u16, attr_words))(input)?;
    return Ok((
        input,
        LinkRecord {
            name,
            file_ref,
            attrs,
        },
    ));
}
