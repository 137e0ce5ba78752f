//! The segment state machine.
//!
//! A [`Decoder`] is one decode session. It walks the token stream of a record,
//! dispatches every segment to its handler and collects what the handlers
//! write into a tag stream. Figure patterns, masks and the palette outlive a
//! single record; everything else is reset at the start of each one.

mod charset;
mod decoration;
mod dispatch;
mod figure;
mod image;
mod link;
mod spreadsheet;
mod state;
mod text;
mod writer;

pub use charset::{decode_char, decode_str};
pub use decoration::Decoration;
pub use image::RasterImage;
pub use link::{LinkTable, ResolvedLink};
pub use state::DecoderState;

use crate::parser::parsers::{Tokens, TadResult};
use crate::parser::types::{Segment, Token};
use crate::read::Error;
use state::Frame;
use writer::{Tag, TagWriter};

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, trace, warn};
use thiserror::Error;

/// A directive that could not be applied. The directive is skipped and decoding goes on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("transform out of range: angle {angle}, shear {shear_x}/{shear_y}")]
    MalformedTransform {
        angle: i16,
        shear_x: i16,
        shear_y: i16,
    },
    #[error("mask {id} has invalid size {width}x{height}")]
    InvalidMaskSize { id: u16, width: i16, height: i16 },
    #[error("segment {segment:#06x} body too short")]
    ShortBody { segment: u16 },
    #[error("invalid image: {0}")]
    InvalidImage(&'static str),
}

/// Something a record recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A segment handler rejected its directive.
    Directive {
        offset: usize,
        segment: u16,
        error: DirectiveError,
    },
    /// The stream ended with brackets or spans still open; they were closed.
    Repaired {
        open_frames: usize,
        /// Decorations and layouts left open outside every bracket.
        open_spans: usize,
    },
}

/// What one TAD record decodes to.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    pub tags: String,
    pub images: Vec<RasterImage>,
    pub diagnostics: Vec<Diagnostic>,
    pub repaired: bool,
}

/// Where a record sits, and what it may refer to.
#[derive(Debug)]
pub struct RecordContext<'a> {
    /// Identifier of the file the record belongs to.
    pub identifier: &'a str,
    /// Index of the record within its file.
    pub record: usize,
    pub links: &'a mut LinkTable,
    /// Whether image segments are rasterized.
    pub images: bool,
}

/// One decode session.
#[derive(Debug, Default)]
pub struct Decoder {
    state: DecoderState,
}

impl Decoder {
    pub fn new() -> Decoder {
        return Decoder::default();
    }

    pub fn state(&self) -> &DecoderState {
        return &self.state;
    }

    /// Decode one record body into a tag stream.
    ///
    /// Only framing errors are fatal. Handler errors become diagnostics.
    pub fn decode_record(
        &mut self,
        ctx: RecordContext<'_>,
        body: &[u8],
    ) -> Result<DecodedRecord, Error> {
        self.state.reset_for_record();
        let mut rec = RecordDecoder {
            state: &mut self.state,
            ctx,
            out: TagWriter::new(),
            images: Vec::new(),
            diagnostics: Vec::new(),
            offset: 0,
        };
        rec.out.start(Tag::new("tad"));
        for item in Tokens::new(body) {
            let (offset, token) = item.map_err(|e| Error::from_parser(body, e))?;
            rec.offset = offset;
            match token {
                Token::End => break,
                Token::Char(code) => text::char(&mut rec, code),
                Token::Escape(esc) => {
                    trace!("plane switch to {:#x}", esc.plane());
                    rec.state.plane = esc.plane();
                    rec.state.pending_cr = false;
                }
                Token::Segment(seg) => rec.segment(&seg),
            }
        }
        let repaired = rec.repair();
        rec.out.end("tad");

        debug!(
            "record {} of {}: {} fragments, {} images, {} diagnostics",
            rec.ctx.record,
            rec.ctx.identifier,
            rec.out.fragment_count(),
            rec.images.len(),
            rec.diagnostics.len()
        );
        return Ok(DecodedRecord {
            tags: rec.out.flush(),
            images: rec.images,
            diagnostics: rec.diagnostics,
            repaired,
        });
    }
}

/// The tag an exec-function record stands for. Its payload is kept as hex words.
pub fn exec_function(subtype: u16, body: &[u8]) -> String {
    let words: Vec<String> = body
        .chunks_exact(2)
        .map(|c| format!("{:04x}", u16::from_le_bytes([c[0], c[1]])))
        .collect();
    let mut out = TagWriter::new();
    out.empty(
        Tag::new("execfunc")
            .attr("subtype", subtype)
            .attr("data", words.join(" ")),
    );
    return out.flush();
}

/// The decoder while it is inside one record. Handlers get this.
pub struct RecordDecoder<'s> {
    pub state: &'s mut DecoderState,
    pub ctx: RecordContext<'s>,
    pub out: TagWriter,
    pub images: Vec<RasterImage>,
    pub diagnostics: Vec<Diagnostic>,
    /// Offset of the segment being handled.
    pub offset: usize,
}

impl<'s> RecordDecoder<'s> {
    fn segment(&mut self, seg: &Segment) {
        self.state.pending_cr = false;
        let minor = match seg.kind() {
            Some(kind) if kind.has_sub_id() => seg.sub_id(),
            _ => 0,
        };
        let handler = match dispatch::lookup(seg.id, minor) {
            Some(h) => h,
            None => {
                debug!(
                    "skipping segment {:#06x}/{} at {}",
                    seg.id, minor, self.offset
                );
                return;
            }
        };
        trace!("segment {:#06x}/{} at {}", seg.id, minor, self.offset);
        if let Err(error) = handler(self, seg) {
            warn!(
                "segment {:#06x} at {} skipped: {}",
                seg.id, self.offset, error
            );
            self.diagnostics.push(Diagnostic::Directive {
                offset: self.offset,
                segment: seg.id,
                error,
            });
        }
    }

    /// Close a bracket, whichever kind it is.
    fn close_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Text { saved } => text::close_text(self, saved),
            Frame::Figure { saved, groups } => figure::close_figure(self, saved, groups),
        }
    }

    /// Close frames from the top of the stack until one matching `is_target` is closed.
    fn close_frames_until(&mut self, is_target: fn(&Frame) -> bool) {
        while let Some(frame) = self.state.frames.pop() {
            let done = is_target(&frame);
            self.close_frame(frame);
            if done {
                return;
            }
        }
    }

    /// Force-close whatever is still open at the end of the stream.
    fn repair(&mut self) -> bool {
        let open_frames = self.state.frames.len();
        while let Some(frame) = self.state.frames.pop() {
            self.close_frame(frame);
        }
        let open_spans = self.state.decorations.len() + self.state.layouts.len();
        if open_frames == 0 && open_spans == 0 {
            return false;
        }
        warn!(
            "record {} of {} ended with {} open brackets and {} open spans, closing them",
            self.ctx.record, self.ctx.identifier, open_frames, open_spans
        );
        self.state.decorations.suspend(&mut self.out);
        text::close_layouts(self);
        self.diagnostics.push(Diagnostic::Repaired {
            open_frames,
            open_spans,
        });
        return true;
    }
}

/// Map a body parser's failure to the directive error it stands for.
fn parsed<'a, T>(seg: &Segment, res: TadResult<'a, T>) -> Result<(&'a [u8], T), DirectiveError> {
    return res.map_err(|_| DirectiveError::ShortBody { segment: seg.id });
}
