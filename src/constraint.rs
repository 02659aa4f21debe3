//! Distance-constraint relaxation.
//!
//! Adjacent chain points are pulled toward the rest segment length with a
//! Gauss-Seidel sweep: each pair's correction is visible to the next pair in
//! the same pass. A single pass does not make the rope inextensible; repeated
//! passes converge toward it.

use crate::chain::VerletChain;
use crate::sanitize::PointSanitizer;
use glam::Vec2;

/// Floor for distances used as divisors.
pub const DISTANCE_EPSILON: f32 = 1.0e-4;

/// Result of a relaxation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxOutcome {
    /// All passes completed; the chain is finite.
    Settled,
    /// A non-finite point was found; the chain must be reset.
    Diverged {
        /// Index of the first point of the offending pair.
        segment: usize,
    },
}

impl RelaxOutcome {
    #[inline]
    pub fn is_diverged(&self) -> bool {
        matches!(self, RelaxOutcome::Diverged { .. })
    }
}

/// Iterative solver for the chain's fixed-distance constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintSolver {
    segment_length: f32,
}

impl ConstraintSolver {
    pub fn new(segment_length: f32) -> Self {
        Self { segment_length }
    }

    /// Run `iterations` relaxation passes with the head pinned to `anchor`.
    ///
    /// `anchor` must already be sanitized. Stops at the first non-finite pair
    /// and reports [`RelaxOutcome::Diverged`].
    pub fn relax(
        &self,
        chain: &mut VerletChain,
        anchor: Vec2,
        iterations: u32,
        sanitizer: &PointSanitizer,
    ) -> RelaxOutcome {
        let fallback = sanitizer.fallback();

        for _ in 0..iterations {
            chain.pin_head(anchor);
            let points = chain.points_mut();

            for i in 0..points.len().saturating_sub(1) {
                let p1 = points[i].position;
                let p2 = points[i + 1].position;
                if !p1.is_finite() || !p2.is_finite() {
                    return RelaxOutcome::Diverged { segment: i };
                }

                let delta = p2 - p1;
                let distance = delta.length().max(DISTANCE_EPSILON);
                let error = self.segment_length - distance;
                let offset = delta * (0.5 * error / distance);

                if i == 0 {
                    // Head is immovable; the second point takes the whole correction.
                    points[1].position = sanitizer.sanitize(p2 + offset * 2.0, fallback);
                } else {
                    points[i].position = sanitizer.sanitize(p1 - offset, fallback);
                    points[i + 1].position = sanitizer.sanitize(p2 + offset, fallback);
                }
            }
        }

        RelaxOutcome::Settled
    }
}

/// Largest absolute deviation of any adjacent distance from `segment_length`.
pub fn max_length_error(positions: &[Vec2], segment_length: f32) -> f32 {
    positions
        .windows(2)
        .map(|w| (w[0].distance(w[1]) - segment_length).abs())
        .fold(0.0, f32::max)
}
