use super::*;

/// The null word that terminates a segment stream.
pub const TNULL: u16 = 0x0000;
/// Words below this value are literal characters or control codes.
pub const TAG_THRESHOLD: u16 = 0xFE00;
/// A ladder word that escalates an escape sequence by one step.
pub const ESCAPE_STEP: u16 = 0xFEFE;
pub const MAX_ESCAPE_STEPS: u8 = 4;
/// First word value that introduces a segment.
pub const SEGMENT_BASE: u16 = 0xFF80;
/// Length word value announcing a trailing 32-bit length.
pub const LONG_LENGTH: u16 = 0xFFFF;

/// A decoded escape ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escape {
    /// Number of words consumed, 1 to 4.
    pub steps: u8,
    /// Low byte of the final word.
    pub code: u8,
}

impl Escape {
    /// The charset plane selected by this escape.
    pub fn plane(&self) -> u32 {
        return (((self.steps - 1) as u32) << 8) | self.code as u32;
    }
}

/// One `(id, length, body)` unit of the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub id: u16,
    pub length: u32,
    pub body: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn word(&self, index: usize) -> Option<u16> {
        let at = index * 2;
        return match self.body.get(at..at + 2) {
            Some(c) => Some(u16::from_le_bytes([c[0], c[1]])),
            None => None,
        };
    }

    /// Upper byte of the first body word, or 0 for segments without one.
    pub fn sub_id(&self) -> u8 {
        return match self.word(0) {
            Some(w) => (w >> 8) as u8,
            None => 0,
        };
    }

    /// Lower byte of the first body word.
    pub fn attr(&self) -> u8 {
        return match self.word(0) {
            Some(w) => (w & 0xFF) as u8,
            None => 0,
        };
    }

    /// The body after the `sub-ID | attr` word of a fusen.
    pub fn args(&self) -> &'a [u8] {
        return self.body.get(2..).unwrap_or(&[]);
    }

    /// The segment's ID as a known kind, if it is one.
    pub fn kind(&self) -> Option<SegmentId> {
        return SegmentId::try_from(self.id).ok();
    }
}

/// What the framer found at the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// A character or control code, to be accumulated as text.
    Char(u16),
    /// A charset plane switch.
    Escape(Escape),
    Segment(Segment<'a>),
    /// The null terminator, or the end of the buffer.
    End,
}
