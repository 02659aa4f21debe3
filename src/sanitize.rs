//! Coordinate sanitization.
//!
//! Every coordinate that enters the chain, whether from the host or from the
//! integrator, passes through [`PointSanitizer::sanitize`] first. Non-finite
//! values are replaced by a fallback point and finite values are clamped into
//! the working bounds: the viewport expanded by a generous margin, so normal
//! motion is never visibly clamped and only numerical blow-ups are.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Top-left corner (minimum x and y).
    pub min: Vec2,
    /// Bottom-right corner (maximum x and y).
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from two corners, in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Rectangle anchored at the origin with the given size.
    ///
    /// The corners are not reordered, so a negative size yields a rectangle
    /// that fails [`is_valid`](Self::is_valid).
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Clamp a point component-wise into the rectangle.
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Finite and with a positive area.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.width() > 0.0 && self.height() > 0.0
    }
}

/// Guards coordinates against NaN/∞ and runaway magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSanitizer {
    viewport: Rect,
    bounds: Rect,
}

impl PointSanitizer {
    /// Build a sanitizer for `viewport` padded by `margin`.
    pub fn new(viewport: Rect, margin: f32) -> Self {
        Self {
            viewport,
            bounds: viewport.expand(margin),
        }
    }

    /// The viewport the bounds were derived from.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// The padded rectangle every coordinate is clamped into.
    pub fn working_bounds(&self) -> Rect {
        self.bounds
    }

    /// Viewport centre, the conventional fallback for broken coordinates.
    pub fn fallback(&self) -> Vec2 {
        self.viewport.center()
    }

    /// Return `fallback` if `p` is non-finite, otherwise `p` clamped into the
    /// working bounds.
    #[inline]
    pub fn sanitize(&self, p: Vec2, fallback: Vec2) -> Vec2 {
        if p.is_finite() {
            self.bounds.clamp(p)
        } else {
            fallback
        }
    }

    /// [`sanitize`](Self::sanitize) with the viewport centre as fallback.
    #[inline]
    pub fn sanitize_or_center(&self, p: Vec2) -> Vec2 {
        self.sanitize(p, self.fallback())
    }
}
