//! This module implements an interface for reading TAD documents and book-pack archives.

mod archive;
mod decode;
mod err;
mod iter;
mod options;
mod simplistic;

pub use archive::*;
pub use err::*;
pub use iter::*;
pub use options::*;
pub use simplistic::*;

pub use crate::parser::types::{CompressionMethod, GlobalHead, Rect, RecordType};

use crate::decode::{decode_str, DecodedRecord, Decoder, ResolvedLink};
use crate::parser::types::LocalHead;

use alloc::string::String;
use alloc::vec::Vec;
use either::Either;
use log::info;

/// What kind of buffer a document set was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A single TAD stream.
    Plain,
    /// A book pack with any number of member files.
    Archive,
    /// A single TAD stream carrying spreadsheet cell formats.
    Spreadsheet,
}

/// Everything decoded from one input buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSet {
    pub kind: DocumentKind,
    /// By file index. A plain buffer is a single file.
    pub files: Vec<DecodedFile>,
}

impl DocumentSet {
    /// Look a file up by the identifier links refer to it by.
    pub fn file(&self, identifier: &str) -> Option<&DecodedFile> {
        return self.files.iter().find(|f| f.identifier == identifier);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFile {
    pub index: usize,
    pub identifier: String,
    /// Display name from the archive. Empty for plain documents.
    pub name: String,
    /// Fails as a whole when the file can't be decompressed or split into records.
    pub records: Result<Vec<RecordOutput>, Error>,
}

/// One record of a file.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutput {
    Document(Result<DecodedRecord, Error>),
    Link(ResolvedLink),
    ExecFunction { subtype: u16, tags: String },
    Opaque {
        record_type: u16,
        subtype: u16,
        size: u32,
    },
}

/// A record as stored, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub record_type: RecordType,
    pub subtype: u16,
    pub body: Vec<u8>,
}

/// The handle for a file contained within an archive.
///
/// Because this struct does not contain the actual file data but only the metadata
/// required to retrieve it from the archive,
/// it can't live independently of it's underlying archive.
#[derive(Debug, Clone)]
pub struct FileHandle<'a> {
    ar: &'a Archive<'a>,
    index: usize,
    head: &'a LocalHead,
}

impl<'a> FileHandle<'a> {
    /// Create a new handle based on the given archive and file index.
    fn new(ar: &'a Archive<'a>, index: usize) -> Option<FileHandle<'a>> {
        let head = ar.head(index)?;
        return Some(FileHandle { ar, index, head });
    }

    pub fn index(&self) -> usize {
        return self.index;
    }

    /// Get the name of this file.
    pub fn name(&self) -> String {
        return decode_str(self.head.name.as_slice());
    }

    /// The identifier links from other files refer to this one by.
    pub fn identifier(&self) -> &'a str {
        return &self.ar.identifiers()[self.index];
    }

    /// Size of the file once decompressed.
    pub fn size(&self) -> u32 {
        return self.head.origsize;
    }

    pub fn record_count(&self) -> usize {
        return self.head.nrec as usize;
    }

    /// Extract the file's contents into a vector.
    ///
    /// # Warning
    ///
    /// Note that this means the entire file will be loaded into RAM!
    ///
    /// It's recommended that you only use this method if you have checked that the file will fit using `FileHandle::size()`.
    pub fn extract_contents_vec(&self) -> Result<Vec<u8>, Error> {
        return match self.ar.file_bytes(self.index)? {
            Either::Left(s) => Ok(s.to_vec()),
            Either::Right(v) => Ok(v),
        };
    }

    /// The file's records, undecoded.
    pub fn records(&self) -> Result<Vec<RawRecord>, Error> {
        let plain = self.ar.file_bytes(self.index)?;
        let plain: &[u8] = match &plain {
            Either::Left(s) => s,
            Either::Right(v) => v,
        };
        let records = decode::split_records(plain, self.record_count())?;
        return Ok(records
            .into_iter()
            .map(|(head, body)| RawRecord {
                record_type: head.record_type,
                subtype: head.subtype,
                body: body.to_vec(),
            })
            .collect());
    }

    /// Decode this file on its own.
    pub fn decode(&self) -> Result<DecodedFile, Error> {
        return self.decode_with(&mut Decoder::new(), &DecodeOptions::default());
    }

    /// Decode this file as part of a session.
    ///
    /// Only cancellation is returned as an error. Anything else that goes wrong with the file
    /// ends up in [`DecodedFile::records`].
    pub fn decode_with(
        &self,
        decoder: &mut Decoder,
        opts: &DecodeOptions,
    ) -> Result<DecodedFile, Error> {
        opts.check_cancel()?;
        let records = match self.decode_records(decoder, opts) {
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            other => other,
        };
        let name = self.name();
        match &records {
            Ok(r) => info!("{} ({}): {} records", self.identifier(), name, r.len()),
            Err(e) => info!("{} ({}): {}", self.identifier(), name, e),
        }
        return Ok(DecodedFile {
            index: self.index,
            identifier: String::from(self.identifier()),
            name,
            records,
        });
    }

    fn decode_records(
        &self,
        decoder: &mut Decoder,
        opts: &DecodeOptions,
    ) -> Result<Vec<RecordOutput>, Error> {
        let plain = self.ar.file_bytes(self.index)?;
        let plain: &[u8] = match &plain {
            Either::Left(s) => s,
            Either::Right(v) => v,
        };
        let records = decode::split_records(plain, self.record_count())?;
        return decode::decode_records(
            decoder,
            self.identifier(),
            &records,
            self.ar.identifiers(),
            opts,
        );
    }
}
