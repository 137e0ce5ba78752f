//! Everything the segment handlers read and mutate.

use super::charset::JIS_PLANE;
use super::decoration::DecorationSet;
use crate::parser::types::Color;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use bitvec::prelude::*;

/// An open text or figure bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// `saved` holds the decorations that were open around the bracket.
    Text { saved: DecorationSet },
    Figure { saved: DecorationSet, groups: u16 },
}

/// An open ruby or subscript span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Ruby,
    Script { superscript: bool },
}

impl Layout {
    pub fn tag(self) -> &'static str {
        return match self {
            Layout::Ruby => "ruby",
            Layout::Script { superscript: true } => "sup",
            Layout::Script { superscript: false } => "sub",
        };
    }

    pub fn same_kind(self, other: Layout) -> bool {
        return core::mem::discriminant(&self) == core::mem::discriminant(&other);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub name: String,
    pub class: u16,
    pub size: u16,
    pub weight: u16,
    pub stretch: u8,
    pub italic: bool,
    pub spacing: u16,
    pub color: Color,
}

impl Default for Font {
    fn default() -> Self {
        return Font {
            name: String::new(),
            class: 0,
            size: 0,
            weight: 400,
            stretch: 0,
            italic: false,
            spacing: 0,
            color: Color::BLACK,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSpacing {
    /// Multiple of the character height.
    Ratio { num: u8, den: u8 },
    /// Absolute pitch in coordinate units.
    Pitch(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Even,
}

impl Alignment {
    pub fn from_code(code: u16) -> Option<Alignment> {
        return match code {
            0 => Some(Alignment::Left),
            1 => Some(Alignment::Center),
            2 => Some(Alignment::Right),
            3 => Some(Alignment::Justify),
            4 => Some(Alignment::Even),
            _ => None,
        };
    }

    pub fn name(self) -> &'static str {
        return match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
            Alignment::Even => "even",
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruler {
    pub line_spacing: LineSpacing,
    pub align: Alignment,
    pub vertical: bool,
    pub indent: i16,
    pub tabs: Vec<i16>,
}

impl Default for Ruler {
    fn default() -> Self {
        return Ruler {
            line_spacing: LineSpacing::Ratio { num: 1, den: 1 },
            align: Alignment::Left,
            vertical: false,
            indent: 0,
            tabs: Vec::new(),
        };
    }
}

/// Paper geometry. Text and figure brackets each keep their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paper {
    pub length: i16,
    pub width: i16,
    pub height: i16,
    pub landscape: bool,
    /// Top, bottom, left, right.
    pub margin: [i16; 4],
    pub columns: u16,
    pub column_gap: i16,
    pub overlay: Option<u16>,
}

/// A 1-bit pattern mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub bits: BitVec<u8, Msb0>,
}

impl Mask {
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        return self.bits[y * self.width + x];
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub hsize: u16,
    pub vsize: u16,
    pub fg: Vec<Color>,
    pub bg: Color,
    pub masks: Vec<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transform {
    pub dx: i16,
    pub dy: i16,
    pub angle: i16,
    pub shear_x: i16,
    pub shear_y: i16,
}

impl Transform {
    pub fn is_identity(&self) -> bool {
        return *self == Transform::default();
    }
}

/// Applies to the next figure primitive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifier {
    pub arrow_start: bool,
    pub arrow_end: bool,
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderState {
    pub frames: Vec<Frame>,
    pub decorations: DecorationSet,
    pub layouts: Vec<Layout>,
    pub font: Font,
    pub ruler: Ruler,
    pub modifier: Modifier,
    pub text_paper: Paper,
    pub figure_paper: Paper,
    pub patterns: BTreeMap<u16, Pattern>,
    pub masks: BTreeMap<u16, Mask>,
    pub palette: Vec<Color>,
    pub z_index: u32,
    pub plane: u32,
    /// The previous character was a CR, so an NL right after it adds no paragraph.
    pub pending_cr: bool,
    pub macro_depth: u16,
    pub image_index: usize,
    pub spreadsheet: bool,
}

impl Default for DecoderState {
    fn default() -> Self {
        return DecoderState {
            frames: Vec::new(),
            decorations: DecorationSet::default(),
            layouts: Vec::new(),
            font: Font::default(),
            ruler: Ruler::default(),
            modifier: Modifier::default(),
            text_paper: Paper::default(),
            figure_paper: Paper::default(),
            patterns: BTreeMap::new(),
            masks: BTreeMap::new(),
            palette: Vec::new(),
            z_index: 0,
            plane: JIS_PLANE,
            pending_cr: false,
            macro_depth: 0,
            image_index: 0,
            spreadsheet: false,
        };
    }
}

impl DecoderState {
    /// Start a new record. Patterns, masks and the palette live for the whole session.
    pub fn reset_for_record(&mut self) {
        let patterns = core::mem::take(&mut self.patterns);
        let masks = core::mem::take(&mut self.masks);
        let palette = core::mem::take(&mut self.palette);
        *self = DecoderState {
            patterns,
            masks,
            palette,
            ..DecoderState::default()
        };
    }

    pub fn in_text(&self) -> bool {
        return matches!(self.frames.last(), Some(Frame::Text { .. }));
    }

    pub fn in_figure(&self) -> bool {
        return matches!(self.frames.last(), Some(Frame::Figure { .. }));
    }

    pub fn has_figure(&self) -> bool {
        return self
            .frames
            .iter()
            .any(|f| matches!(f, Frame::Figure { .. }));
    }

    pub fn has_text(&self) -> bool {
        return self.frames.iter().any(|f| matches!(f, Frame::Text { .. }));
    }

    /// The paper a page fusen in the current context writes to.
    pub fn paper_mut(&mut self) -> &mut Paper {
        if self.in_figure() {
            return &mut self.figure_paper;
        }
        return &mut self.text_paper;
    }

    /// Colour a pattern ID paints with: a defined pattern's first foreground, else a palette entry.
    pub fn paint(&self, id: u16) -> Option<Color> {
        if let Some(p) = self.patterns.get(&id) {
            return Some(p.fg.first().copied().unwrap_or(p.bg));
        }
        return self.palette.get(id as usize).copied();
    }
}
