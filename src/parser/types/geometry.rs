/// A rectangle in the format's signed 16-bit coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
}

impl Rect {
    pub fn width(&self) -> i32 {
        return self.right as i32 - self.left as i32;
    }

    pub fn height(&self) -> i32 {
        return self.bottom as i32 - self.top as i32;
    }

    pub fn is_empty(&self) -> bool {
        return self.width() <= 0 || self.height() <= 0;
    }

    /// Centre of the rectangle. Halves are kept, hence the float.
    pub fn center(&self) -> (f32, f32) {
        return (
            (self.left as f32 + self.right as f32) / 2.0,
            (self.top as f32 + self.bottom as f32) / 2.0,
        );
    }

    /// Half extents of the rectangle, as used for ellipse radii.
    pub fn radii(&self) -> (f32, f32) {
        return (self.width() as f32 / 2.0, self.height() as f32 / 2.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}
