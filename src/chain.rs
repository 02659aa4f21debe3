//! Verlet point chain.
//!
//! The rope is a fixed-length sequence of [`ChainPoint`]s. Velocity is never
//! stored: it is implied by `position - previous`, so integration only needs
//! the current and the last position of each point.

use crate::config::SimulationConfig;
use crate::sanitize::PointSanitizer;
use glam::Vec2;
use tracing::trace;

/// One mass node of the rope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainPoint {
    /// Current position.
    pub position: Vec2,
    /// Position at the previous tick.
    pub previous: Vec2,
}

impl ChainPoint {
    /// A point at rest at `position`.
    #[inline]
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            previous: position,
        }
    }

    /// Implicit per-tick velocity.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.previous.is_finite()
    }
}

/// Ordered chain of Verlet points; index 0 is the anchor-pinned head.
#[derive(Debug, Clone, PartialEq)]
pub struct VerletChain {
    points: Vec<ChainPoint>,
    gravity: Vec2,
    damping: f32,
    segment_length: f32,
    rest_direction: Vec2,
}

impl VerletChain {
    /// Allocate a chain for `config`. All points start at the origin; call
    /// [`reset`](Self::reset) before the first tick.
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            points: vec![ChainPoint::at_rest(Vec2::ZERO); config.chain_length],
            gravity: config.gravity,
            damping: config.damping,
            segment_length: config.segment_length,
            rest_direction: config.rest_direction(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    pub fn points(&self) -> &[ChainPoint] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [ChainPoint] {
        &mut self.points
    }

    /// Snapshot of the current positions, head first.
    pub fn positions(&self) -> Vec<Vec2> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Every point has finite position and previous.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(ChainPoint::is_finite)
    }

    /// Rebuild the chain hanging from `anchor` with zero velocity.
    pub fn reset(&mut self, anchor: Vec2, sanitizer: &PointSanitizer) {
        let head = sanitizer.sanitize_or_center(anchor);
        let step = self.rest_direction * self.segment_length;
        for (i, point) in self.points.iter_mut().enumerate() {
            let p = sanitizer.sanitize(head + step * i as f32, head);
            *point = ChainPoint::at_rest(p);
        }
    }

    /// Force the head onto `anchor`, discarding any head velocity.
    ///
    /// `anchor` must already be sanitized.
    #[inline]
    pub fn pin_head(&mut self, anchor: Vec2) {
        if let Some(head) = self.points.first_mut() {
            *head = ChainPoint::at_rest(anchor);
        }
    }

    /// Advance every non-head point by one damped Verlet step.
    ///
    /// `dt` must already be clamped to the simulation's stable range. A point
    /// that went non-finite is snapped onto its (already updated) predecessor
    /// so it stays attached to the rope.
    pub fn integrate(&mut self, dt: f32, sanitizer: &PointSanitizer) {
        let accel = self.gravity * dt * dt;
        let fallback = sanitizer.fallback();

        for i in 1..self.points.len() {
            let anchor = self.points[i - 1].position;
            let point = &mut self.points[i];

            if !point.is_finite() {
                let healed = sanitizer.sanitize(anchor, fallback);
                trace!(index = i, "healing non-finite chain point from neighbour");
                *point = ChainPoint::at_rest(healed);
            }

            let velocity = point.velocity() * self.damping;
            let next = point.position + velocity + accel;
            point.previous = point.position;
            point.position = sanitizer.sanitize(next, point.previous);
        }
    }
}
