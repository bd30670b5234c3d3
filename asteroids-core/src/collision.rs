use serde::{Deserialize, Serialize};

/// Axis-aligned box, the only collision shape in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn centered(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x - width / 2.0,
            top: y - height / 2.0,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not touch, and empty
    /// boxes touch nothing.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Half-open containment, `[left, right) x [top, bottom)`.
    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// Anything that takes part in collision tests.
pub trait Collider {
    fn bounds(&self) -> Aabb;
}

#[inline]
pub fn collides(a: &impl Collider, b: &impl Collider) -> bool {
    a.bounds().overlaps(&b.bounds())
}
