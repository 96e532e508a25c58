//! Axis-aligned boxes and the overlap test used for every collision.

/// A box in world units, `y` growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Positive, finite extent on both axes.
    pub fn is_proper(&self) -> bool {
        [self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite())
            && self.w > 0.0
            && self.h > 0.0
    }
}

/// Anything with a collision box.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

/// Overlap test with a grazing tolerance.
///
/// Every edge comparison is pulled inward by `buffer`, so two boxes must
/// interpenetrate by more than `buffer` on both axes to count.  Degenerate
/// boxes (zero, negative or non-finite size) never intersect.
pub fn intersects(a: &Rect, b: &Rect, buffer: f32) -> bool {
    if !a.is_proper() || !b.is_proper() {
        return false;
    }
    let buffer = if buffer.is_finite() { buffer.max(0.0) } else { 0.0 };

    a.x + buffer < b.right()
        && a.right() - buffer > b.x
        && a.y + buffer < b.bottom()
        && a.bottom() - buffer > b.y
}
