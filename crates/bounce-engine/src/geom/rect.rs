use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
///
/// Invariant: `w >= 0` and `h >= 0`. Simulation code mutates the fields
/// directly; there is no setter indirection.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: size.x,
            h: size.y,
        }
    }

    #[inline]
    pub const fn origin(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.w && p.y < self.y + self.h
    }

    /// Intersection with strictly positive area.
    ///
    /// Rectangles that merely touch along an edge or corner do not intersect.
    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.w).min(other.x + other.w);
        let y1 = (self.y + self.h).min(other.y + other.h);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }
}
