use super::*;

/// Fixed part of an image segment, up to and including the plane offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHeader {
    pub view: Rect,
    pub draw: Rect,
    pub h_unit: u16,
    pub v_unit: u16,
    pub slope: i16,
    pub color: Color,
    pub cinfo: [u16; 4],
    pub extlen: u16,
    pub extend: u32,
    pub mask: u32,
    pub compac: u16,
    pub planes: u16,
    /// Low byte: colour depth. High byte: bits each pixel occupies in storage, 0 meaning the depth.
    pub pixbits: u16,
    pub rowbytes: u16,
    pub bounds: Rect,
    /// Offset of each plane from the start of the pixel data.
    pub base_off: Vec<u32>,
}

impl ImageHeader {
    pub fn depth(&self) -> u8 {
        return (self.pixbits & 0xFF) as u8;
    }

    pub fn storage_bits(&self) -> u8 {
        let stored = (self.pixbits >> 8) as u8;
        if stored == 0 {
            return self.depth();
        }
        return stored;
    }
}
