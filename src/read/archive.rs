//! Book-pack archives: detection, the archive stream and the identity pass.

use super::decode::{check_crc, decompress};
use super::{ArchiveIterator, DecodeOptions, Error};
use crate::parser::crc::session_crc32;
use crate::parser::finish;
use crate::parser::parsers::{app_id, global_head, local_heads, Tokens};
use crate::parser::types::{
    GlobalHead, LocalHead, SegmentId, Token, ARCHIVE_APP_ID, SPREADSHEET_APP_ID,
};

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use either::Either;
use log::{debug, info};

/// What a buffer turned out to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Detected<'a> {
    Plain,
    Spreadsheet,
    Archive {
        /// The specify body after the application ID.
        head: &'a [u8],
        /// Everything after the specify segment.
        stream: &'a [u8],
    },
}

/// Look at the top-level segments in front of the first text or figure bracket.
///
/// A framing error ends the scan. The record decoder reports it later.
pub(crate) fn detect(buffer: &[u8]) -> Detected<'_> {
    let mut spreadsheet = false;
    let mut tokens = Tokens::new(buffer);
    while let Some(Ok((_, token))) = tokens.next() {
        let seg = match token {
            Token::Segment(seg) => seg,
            Token::End => break,
            _ => continue,
        };
        match seg.kind() {
            Some(SegmentId::TextStart) | Some(SegmentId::FigStart) => break,
            Some(SegmentId::Specify) => {}
            _ => continue,
        }
        let (head, app) = match app_id(seg.body) {
            Ok(v) => v,
            Err(_) => continue,
        };
        if app == ARCHIVE_APP_ID {
            return Detected::Archive {
                head,
                stream: tokens.remaining(),
            };
        }
        if app == SPREADSHEET_APP_ID {
            spreadsheet = true;
        }
    }
    if spreadsheet {
        return Detected::Spreadsheet;
    }
    return Detected::Plain;
}

/// Identifier of file `index` in a session.
pub fn file_identifier(session: u32, index: usize) -> String {
    return format!("{:08x}-{:04x}", session, index);
}

/// A parsed book-pack archive.
///
/// The archive stream is decompressed up front. Member files are only decompressed when asked for.
#[derive(Debug, Clone)]
pub struct Archive<'a> {
    session: u32,
    global: GlobalHead,
    stream: Either<&'a [u8], Vec<u8>>,
    crc: u16,
    heads: Vec<LocalHead>,
    /// Start of the data area in the archive stream.
    data_start: usize,
    identifiers: Vec<String>,
}

impl<'a> Archive<'a> {
    pub fn parse(raw: &'a [u8]) -> Result<Archive<'a>, Error> {
        return Archive::parse_with(raw, &DecodeOptions::default());
    }

    pub fn parse_with(raw: &'a [u8], opts: &DecodeOptions) -> Result<Archive<'a>, Error> {
        let (head, packed) = match detect(raw) {
            Detected::Archive { head, stream } => (head, stream),
            _ => {
                return Err(Error::Malformed {
                    context: "book-pack application id",
                    offset: 0,
                })
            }
        };
        let (_, global) =
            finish(head, global_head(head)).map_err(|e| Error::from_parser(raw, e))?;
        let session = session_crc32(raw);
        info!(
            "book pack {:08x}: {} files, method {:?}, {} -> {} bytes",
            session, global.nfiles, global.compmethod, global.compsize, global.orgsize
        );

        let stream = decompress(
            packed,
            global.compmethod as u16,
            global.compsize as usize,
            global.orgsize as usize,
        )?;
        let (crc, heads, data_start) = {
            let plain: &[u8] = match &stream {
                Either::Left(s) => s,
                Either::Right(v) => v,
            };
            let crc = check_crc(plain, global.crc, opts.crc)?;
            let (data, heads) = finish(plain, local_heads(plain, global.nfiles as usize))
                .map_err(|e| Error::from_parser(plain, e))?;
            (crc, heads, plain.len() - data.len())
        };

        // Identity pass: every file gets its identifier before anything is decoded.
        let identifiers = (0..heads.len())
            .map(|i| file_identifier(session, i))
            .collect();
        return Ok(Archive {
            session,
            global,
            stream,
            crc,
            heads,
            data_start,
            identifiers,
        });
    }

    /// CRC-32 of the whole input buffer.
    pub fn session(&self) -> u32 {
        return self.session;
    }

    /// CRC-16 of the decompressed archive stream.
    pub fn crc(&self) -> u16 {
        return self.crc;
    }

    pub fn global_head(&self) -> &GlobalHead {
        return &self.global;
    }

    pub fn len(&self) -> usize {
        return self.heads.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.heads.is_empty();
    }

    /// Identifiers of all member files, by index.
    pub fn identifiers(&self) -> &[String] {
        return &self.identifiers;
    }

    pub fn files(&self) -> ArchiveIterator<'_> {
        return ArchiveIterator::new(self);
    }

    pub(crate) fn head(&self, index: usize) -> Option<&LocalHead> {
        return self.heads.get(index);
    }

    fn stream(&self) -> &[u8] {
        return match &self.stream {
            Either::Left(s) => s,
            Either::Right(v) => v,
        };
    }

    /// Decompress member `index`.
    pub(crate) fn file_bytes(&self, index: usize) -> Result<Either<&[u8], Vec<u8>>, Error> {
        let head = match self.heads.get(index) {
            Some(h) => h,
            None => {
                return Err(Error::Malformed {
                    context: "local head index",
                    offset: index,
                })
            }
        };
        let stream = self.stream();
        let start = self.data_start.saturating_add(head.offset as usize);
        let compsize = head.compsize as usize;
        let available = stream.len().saturating_sub(start);
        if available < compsize {
            return Err(Error::TruncatedSegment {
                offset: start,
                declared: compsize as u64,
                available,
            });
        }
        debug!(
            "file {}: method {}, {} -> {} bytes",
            index, head.compmethod, compsize, head.origsize
        );
        let packed = &stream[start..start + compsize];
        let plain = decompress(packed, head.compmethod, compsize, head.origsize as usize)?;
        return Ok(plain);
    }
}
