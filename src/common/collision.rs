//! Axis-aligned box overlap.
//!
//! Hitboxes are never stored on actors. They are derived on demand from an
//! actor's position, scale and state, and compared with [`check_collision`].
//! Coordinates are room space: x grows right, y grows down, the box origin is
//! its top-left corner.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Box of `size` at `origin`.
    #[inline]
    pub fn at(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    #[inline]
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        check_collision(self, other)
    }
}

/// Strict overlap test: boxes that only share an edge do not collide.
#[inline]
pub fn check_collision(a: &Hitbox, b: &Hitbox) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
