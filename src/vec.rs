//! 2D vector type for physics calculations.

use crate::float::Float;
use core::ops::{Add, Neg, Sub};

/// 2D vector used throughout the engine for positions, velocities,
/// forces, and impulses.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self {
        Vec2 { x, y }
    }

    /// Zero vector.
    pub fn zero() -> Self {
        Vec2 { x: F::zero(), y: F::zero() }
    }

    /// Vector with both components set to the same value.
    pub fn splat(value: F) -> Self {
        Vec2 { x: value, y: value }
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (returns scalar): self.x * other.y - self.y * other.x
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Perpendicular vector (rotated 90 degrees counter-clockwise).
    pub fn perp(self) -> Self {
        Vec2 { x: -self.y, y: self.x }
    }

    /// Scale both components by a scalar.
    pub fn scale(self, s: F) -> Self {
        Vec2 { x: self.x * s, y: self.y * s }
    }

    /// Squared length (avoids sqrt).
    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    /// Length (magnitude).
    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Normalize to unit length. Returns zero vector if length is near zero.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(F::from_f32(1e-10)) {
            Self::zero()
        } else {
            self.scale(F::one() / len)
        }
    }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    /// Squared distance between two points.
    pub fn distance_sq(self, other: Self) -> F {
        (self - other).length_sq()
    }

    /// Rotate by an angle in radians.
    pub fn rotate(self, angle: F) -> Self {
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        Vec2 {
            x: self.x * cos_a - self.y * sin_a,
            y: self.x * sin_a + self.y * cos_a,
        }
    }

    /// Project this vector onto another. Returns zero if `onto` is degenerate.
    pub fn project(self, onto: Self) -> Self {
        let denom = onto.length_sq();
        if denom.is_near_zero(F::from_f32(1e-10)) {
            return Self::zero();
        }
        onto.scale(self.dot(onto) / denom)
    }

    /// Reflect this vector across a unit normal.
    pub fn reflect(self, normal: Self) -> Self {
        self - normal.scale(F::two() * self.dot(normal))
    }

    /// Linear interpolation between self and other.
    pub fn lerp(self, other: Self, t: F) -> Self {
        self + (other - self).scale(t)
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec2 { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self {
        Vec2 { x: -self.x, y: -self.y }
    }
}
