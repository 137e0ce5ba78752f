use core::convert::TryFrom;

/// Every segment ID this crate knows about.
///
/// Fusen segments (`0xFFA0..=0xFFBF` and `Info`) carry a sub-ID in the upper byte
/// of their first body word.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SegmentId {
    TextPage = 0xFFA0,
    Ruler = 0xFFA1,
    Font = 0xFFA2,
    SpecialChar = 0xFFA3,
    CharLayout = 0xFFA4,
    Decoration = 0xFFA5,
    Variable = 0xFFAD,
    TextMemo = 0xFFAE,
    TextAppl = 0xFFAF,
    FigPrimitive = 0xFFB0,
    FigDefine = 0xFFB1,
    FigGroup = 0xFFB2,
    FigMacro = 0xFFB3,
    FigModifier = 0xFFB4,
    FigPage = 0xFFB5,
    FigMemo = 0xFFBE,
    FigAppl = 0xFFBF,
    Info = 0xFFE0,
    TextStart = 0xFFE1,
    TextEnd = 0xFFE2,
    FigStart = 0xFFE3,
    FigEnd = 0xFFE4,
    Image = 0xFFE5,
    VirtualObject = 0xFFE6,
    Specify = 0xFFE7,
    Function = 0xFFE8,
}

impl SegmentId {
    /// Whether the first body word of this segment holds a sub-ID.
    pub fn has_sub_id(self) -> bool {
        let raw = self as u16;
        return (0xFFA0..=0xFFBF).contains(&raw) || self == SegmentId::Info;
    }
}

impl TryFrom<u16> for SegmentId {
    type Error = ();
    fn try_from(w: u16) -> Result<Self, Self::Error> {
        use SegmentId::*;
        match w {
            0xFFA0 => Ok(TextPage),
            0xFFA1 => Ok(Ruler),
            0xFFA2 => Ok(Font),
            0xFFA3 => Ok(SpecialChar),
            0xFFA4 => Ok(CharLayout),
            0xFFA5 => Ok(Decoration),
            0xFFAD => Ok(Variable),
            0xFFAE => Ok(TextMemo),
            0xFFAF => Ok(TextAppl),
            0xFFB0 => Ok(FigPrimitive),
            0xFFB1 => Ok(FigDefine),
            0xFFB2 => Ok(FigGroup),
            0xFFB3 => Ok(FigMacro),
            0xFFB4 => Ok(FigModifier),
            0xFFB5 => Ok(FigPage),
            0xFFBE => Ok(FigMemo),
            0xFFBF => Ok(FigAppl),
            0xFFE0 => Ok(Info),
            0xFFE1 => Ok(TextStart),
            0xFFE2 => Ok(TextEnd),
            0xFFE3 => Ok(FigStart),
            0xFFE4 => Ok(FigEnd),
            0xFFE5 => Ok(Image),
            0xFFE6 => Ok(VirtualObject),
            0xFFE7 => Ok(Specify),
            0xFFE8 => Ok(Function),
            _ => Err(()),
        }
    }
}
