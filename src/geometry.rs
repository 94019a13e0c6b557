// SPDX-License-Identifier: MPL-2.0
//! Core geometry types and the best-fit dimension calculator.
//!
//! [`fit`] is the single place render dimensions come from: it is pure,
//! called on every container resize and every item switch, and always
//! produces whole-pixel output so responsive-source selection never
//! compares against fractional widths.

use crate::config::defaults::{DEFAULT_NATURAL_HEIGHT, DEFAULT_NATURAL_WIDTH};

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns whether either axis is zero, negative, or non-finite.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// A 2D offset or position in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between two points.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Computes the best-fit render size for content of `natural` size inside
/// `container`, leaving `gap` pixels on every side and applying an optional
/// `scale` factor.
///
/// Unknown natural dimensions fall back to a 1920×1080 reference so a render
/// size always exists before the media has been probed. Degenerate inputs
/// (zero-size container, negative gap leaving no room) collapse the ratio to
/// zero rather than producing NaN or negative output.
#[must_use]
pub fn fit(natural: Option<Size>, container: Size, scale: f32, gap: f32) -> Size {
    let natural = natural.filter(|s| !s.is_degenerate()).unwrap_or(Size::new(
        DEFAULT_NATURAL_WIDTH,
        DEFAULT_NATURAL_HEIGHT,
    ));

    let avail_width = container.width - 2.0 * gap;
    let avail_height = container.height - 2.0 * gap;

    let mut ratio = (avail_width / natural.width * scale).min(avail_height / natural.height * scale);

    if !ratio.is_finite() || ratio < 0.0 {
        ratio = 0.0;
    }

    // Round so the sizes attribute never carries a fractional width.
    Size::new(
        (natural.width * ratio).round(),
        (natural.height * ratio).round(),
    )
}
