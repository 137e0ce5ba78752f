use super::*;

use core::convert::TryFrom;

/// Application ID a "specify" segment carries when the rest of the buffer is a book pack.
pub const ARCHIVE_APP_ID: [u16; 3] = [0x8000, 0xC003, 0x8000];
/// Application ID of the spreadsheet cell-format fusen.
pub const SPREADSHEET_APP_ID: [u16; 3] = [0x8000, 0xC002, 0x8000];

pub const GLOBAL_HEAD_SIZE_BYTES: usize = 1 + 1 + 2 + 2 + 2 + 2 + 4 * 5;
pub const LOCAL_HEAD_SIZE_BYTES: usize = 2 + 2 + 2 * NAME_LEN + 2 + 4 + 4 + 2 + 4 + 4 * 4 + 2 + 2;

/// Length in characters of the fixed name fields.
pub const NAME_LEN: usize = 20;

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored = 0,
    Lh5 = 5,
}

impl TryFrom<u16> for CompressionMethod {
    type Error = ();
    fn try_from(v: u16) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(CompressionMethod::Stored),
            5 => Ok(CompressionMethod::Lh5),
            _ => Err(()),
        }
    }
}

/// Archive-wide metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalHead {
    pub headtype: u8,
    pub checksum: u8,
    pub version: u16,
    pub crc: u16,
    pub nfiles: u16,
    pub compmethod: CompressionMethod,
    pub time: u32,
    pub filesize: u32,
    pub orgsize: u32,
    pub compsize: u32,
    pub extsize: u32,
}

/// Per-file metadata, stored at the start of the decoded archive stream.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalHead {
    pub f_type: u16,
    pub f_atype: u16,
    /// Raw TRON code name, trimmed at the first null.
    pub name: U16String,
    /// Kept raw: an unknown method only fails the file it belongs to.
    pub compmethod: u16,
    pub origsize: u32,
    pub compsize: u32,
    pub nrec: u16,
    /// Offset of this file's bytes from the start of the data area.
    pub offset: u32,
    pub ltime: u32,
    pub atime: u32,
    pub mtime: u32,
    pub ctime: u32,
    pub nlink: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Link,
    Tad,
    ExecFunction,
    Opaque(u16),
}

impl From<u16> for RecordType {
    fn from(v: u16) -> Self {
        match v {
            0 => RecordType::Link,
            1 => RecordType::Tad,
            8 => RecordType::ExecFunction,
            other => RecordType::Opaque(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordHead {
    pub record_type: RecordType,
    pub subtype: u16,
    pub size: u32,
}

/// A link record: the target of the n-th virtual object in the same file.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    pub name: U16String,
    /// 1-indexed file number inside the archive.
    pub file_ref: u16,
    pub attrs: Vec<u16>,
}
