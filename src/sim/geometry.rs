//! Field geometry: sizes and axis-aligned areas
//!
//! Positions are plain `glam::Vec2` values in millimetres, origin at the
//! bottom-left corner of the playable field.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A point on (or off) the field
pub type Position = Vec2;

/// Width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Midpoint of a rectangle of this size anchored at the origin
    #[inline]
    pub fn center(&self) -> Position {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Both dimensions finite and strictly positive
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Axis-aligned rectangle: origin corner + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Bottom-left corner
    pub origin: Position,
    pub size: Size,
}

impl Area {
    pub const fn new(origin: Position, size: Size) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(&self) -> Position {
        self.origin + self.size.as_vec2()
    }

    #[inline]
    pub fn center(&self) -> Position {
        self.origin + self.size.center()
    }

    /// Containment test, inclusive on every edge
    pub fn contains(&self, p: Position) -> bool {
        let max = self.max();
        self.origin.x <= p.x && p.x <= max.x && self.origin.y <= p.y && p.y <= max.y
    }

    /// True if the two rectangles share any point (touching edges count)
    pub fn intersects(&self, other: &Area) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.origin.x <= b_max.x
            && other.origin.x <= a_max.x
            && self.origin.y <= b_max.y
            && other.origin.y <= a_max.y
    }
}

/// Euclidean distance between two positions
#[inline]
pub fn distance(a: Position, b: Position) -> f32 {
    a.distance(b)
}
