//! Axis-aligned rectangle geometry
//!
//! Every edge is inclusive: two rectangles that share an edge overlap, and a
//! point on a rectangle's border is inside it. Collision and button hit-tests
//! both rely on this convention.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge x coordinate
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge y coordinate
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Copy moved by (dx, dy)
    #[inline]
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Closed-interval overlap on both axes
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Check if a point lies inside or on the border
    #[inline]
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Free-function form of [`Rect::intersects`]
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}
