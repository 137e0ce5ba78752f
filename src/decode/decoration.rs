//! Character decorations and the order they nest in.
//!
//! Every decoration is a single on/off flag. Open decorations are always
//! written nested in [`Decoration::ALL`] order, outermost first, so closing
//! all of them innermost first gives the fixed order noprint, mesh, invert,
//! box, strikethrough, overline, underline, bold, italic, bagchar, background.

use super::writer::{Tag, TagWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Decoration {
    Background,
    Bagchar,
    Italic,
    Bold,
    Underline,
    Overline,
    Strikethrough,
    Box,
    Invert,
    Mesh,
    Noprint,
}

impl Decoration {
    /// Outermost first.
    pub const ALL: [Decoration; 11] = [
        Decoration::Background,
        Decoration::Bagchar,
        Decoration::Italic,
        Decoration::Bold,
        Decoration::Underline,
        Decoration::Overline,
        Decoration::Strikethrough,
        Decoration::Box,
        Decoration::Invert,
        Decoration::Mesh,
        Decoration::Noprint,
    ];

    pub fn tag(self) -> &'static str {
        return match self {
            Decoration::Background => "background",
            Decoration::Bagchar => "bagchar",
            Decoration::Italic => "italic",
            Decoration::Bold => "bold",
            Decoration::Underline => "underline",
            Decoration::Overline => "overline",
            Decoration::Strikethrough => "strikethrough",
            Decoration::Box => "box",
            Decoration::Invert => "invert",
            Decoration::Mesh => "mesh",
            Decoration::Noprint => "noprint",
        };
    }

    /// The decoration a decoration fusen toggles: sub-ID `2k` opens and `2k + 1` closes number `k`.
    pub fn from_fusen_index(k: u8) -> Option<Decoration> {
        return match k {
            0 => Some(Decoration::Underline),
            1 => Some(Decoration::Overline),
            2 => Some(Decoration::Strikethrough),
            3 => Some(Decoration::Box),
            4 => Some(Decoration::Invert),
            5 => Some(Decoration::Mesh),
            6 => Some(Decoration::Background),
            7 => Some(Decoration::Noprint),
            _ => None,
        };
    }

    fn bit(self) -> u16 {
        return 1 << (self as u16);
    }
}

/// The set of open decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecorationSet {
    bits: u16,
}

impl DecorationSet {
    pub fn contains(&self, d: Decoration) -> bool {
        return self.bits & d.bit() != 0;
    }

    pub fn is_empty(&self) -> bool {
        return self.bits == 0;
    }

    pub fn len(&self) -> usize {
        return self.bits.count_ones() as usize;
    }

    /// Open `d`. Re-opening an open decoration does nothing.
    pub fn open(&mut self, d: Decoration, out: &mut TagWriter) {
        if self.contains(d) {
            return;
        }
        let inner = self.inner_than(d);
        inner.write_close(out);
        out.start(Tag::new(d.tag()));
        self.bits |= d.bit();
        inner.write_open(out);
    }

    /// Close `d`. Closing a closed decoration does nothing.
    pub fn close(&mut self, d: Decoration, out: &mut TagWriter) {
        if !self.contains(d) {
            return;
        }
        let inner = self.inner_than(d);
        inner.write_close(out);
        out.end(d.tag());
        self.bits &= !d.bit();
        inner.write_open(out);
    }

    pub fn set(&mut self, d: Decoration, on: bool, out: &mut TagWriter) {
        if on {
            self.open(d, out);
        } else {
            self.close(d, out);
        }
    }

    /// Close everything, innermost first, and hand back what was open.
    pub fn suspend(&mut self, out: &mut TagWriter) -> DecorationSet {
        let saved = *self;
        saved.write_close(out);
        self.bits = 0;
        return saved;
    }

    /// Reopen a set handed out by `suspend`.
    pub fn resume(&mut self, saved: DecorationSet, out: &mut TagWriter) {
        for d in Decoration::ALL {
            if saved.contains(d) {
                self.open(d, out);
            }
        }
    }

    fn inner_than(&self, d: Decoration) -> DecorationSet {
        let outer_and_self = (d.bit() << 1) - 1;
        return DecorationSet {
            bits: self.bits & !outer_and_self,
        };
    }

    fn write_close(&self, out: &mut TagWriter) {
        for d in Decoration::ALL.iter().rev() {
            if self.contains(*d) {
                out.end(d.tag());
            }
        }
    }

    fn write_open(&self, out: &mut TagWriter) {
        for d in Decoration::ALL {
            if self.contains(d) {
                out.start(Tag::new(d.tag()));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reopen_is_a_no_op() {
        let mut out = TagWriter::new();
        let mut set = DecorationSet::default();
        set.open(Decoration::Underline, &mut out);
        set.open(Decoration::Underline, &mut out);
        set.close(Decoration::Underline, &mut out);
        set.close(Decoration::Underline, &mut out);
        assert_eq!(out.flush(), "<underline></underline>");
    }

    #[test]
    fn inner_decorations_are_reopened() {
        let mut out = TagWriter::new();
        let mut set = DecorationSet::default();
        set.open(Decoration::Mesh, &mut out);
        set.open(Decoration::Underline, &mut out);
        set.close(Decoration::Underline, &mut out);
        assert_eq!(
            out.flush(),
            "<mesh></mesh><underline><mesh></mesh></underline><mesh>"
        );
        assert!(set.contains(Decoration::Mesh));
        assert!(!set.contains(Decoration::Underline));
    }

    #[test]
    fn suspend_closes_in_fixed_order() {
        let mut out = TagWriter::new();
        let mut set = DecorationSet::default();
        for d in Decoration::ALL.iter().rev() {
            set.open(*d, &mut out);
        }
        let mut closing = TagWriter::new();
        let saved = set.suspend(&mut closing);
        assert!(set.is_empty());
        assert_eq!(
            closing.flush(),
            "</noprint></mesh></invert></box></strikethrough></overline>\
             </underline></bold></italic></bagchar></background>"
        );
        let mut reopening = TagWriter::new();
        set.resume(saved, &mut reopening);
        assert_eq!(set, saved);
        assert!(reopening.flush().starts_with("<background><bagchar><italic>"));
    }

    #[test]
    fn fusen_indices() {
        assert_eq!(Decoration::from_fusen_index(0), Some(Decoration::Underline));
        assert_eq!(Decoration::from_fusen_index(6), Some(Decoration::Background));
        assert_eq!(Decoration::from_fusen_index(7), Some(Decoration::Noprint));
        assert_eq!(Decoration::from_fusen_index(8), None);
    }
}
