use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle: top-left position plus size, Y-down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub position: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(position: DVec2, size: DVec2) -> Self {
        Self { position, size }
    }

    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(DVec2::new(x, y), DVec2::new(w, h))
    }

    /// Build from two corners. The corners may be given in any order.
    pub fn from_min_max(a: DVec2, b: DVec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min, max - min)
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.size.x
    }

    pub fn top(&self) -> f64 {
        self.position.y
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.y
    }

    pub fn min(&self) -> DVec2 {
        self.position
    }

    pub fn max(&self) -> DVec2 {
        self.position + self.size
    }

    pub fn center(&self) -> DVec2 {
        self.position + self.size * 0.5
    }

    /// A rect with no area never overlaps anything.
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Strict AABB overlap. Rects that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Point containment, edges inclusive.
    pub fn contains_point(&self, point: DVec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    pub fn translated(&self, delta: DVec2) -> Self {
        Self::new(self.position + delta, self.size)
    }

    /// Grow by `amount` on every side (negative shrinks).
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.position - DVec2::splat(amount),
            self.size + DVec2::splat(amount * 2.0),
        )
    }
}
