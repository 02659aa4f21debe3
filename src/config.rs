//! Simulation and stroke configuration.
//!
//! Both configs are plain values built with `Default` plus `with_*` chaining,
//! checked once by [`validate`](SimulationConfig::validate) and never mutated
//! by the simulation afterwards.
//!
//! ```ignore
//! let config = SimulationConfig::default()
//!     .with_chain_length(40)
//!     .with_segment_length(12.0)
//!     .with_gravity(Vec2::new(0.0, 900.0));
//! config.validate()?;
//! ```

use crate::error::{ConfigError, ConfigResult};
use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical parameters of the rope.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Constant acceleration in units/s² (screen space, +Y is down).
    pub gravity: Vec2,
    /// Fraction of implicit velocity kept each tick, in (0, 1).
    pub damping: f32,
    /// Rest distance between adjacent chain points.
    pub segment_length: f32,
    /// Relaxation passes per tick.
    pub constraint_iterations: u32,
    /// Number of chain points, head included.
    pub chain_length: usize,
    /// Padding added around the viewport to form the working bounds.
    pub bounds_margin: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 1400.0),
            damping: 0.992,
            segment_length: 18.0,
            constraint_iterations: 12,
            chain_length: 28,
            bounds_margin: 240.0,
        }
    }
}

impl SimulationConfig {
    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the velocity damping factor.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set the rest length of each segment.
    pub fn with_segment_length(mut self, length: f32) -> Self {
        self.segment_length = length;
        self
    }

    /// Set the number of relaxation passes per tick.
    pub fn with_constraint_iterations(mut self, iterations: u32) -> Self {
        self.constraint_iterations = iterations;
        self
    }

    /// Set the number of chain points.
    pub fn with_chain_length(mut self, length: usize) -> Self {
        self.chain_length = length;
        self
    }

    /// Set the working-bounds margin around the viewport.
    pub fn with_bounds_margin(mut self, margin: f32) -> Self {
        self.bounds_margin = margin;
        self
    }

    /// Direction the chain is laid out in on reset.
    ///
    /// Follows gravity so a fresh rope hangs at rest; falls back to +Y when
    /// gravity is zero.
    pub fn rest_direction(&self) -> Vec2 {
        self.gravity.try_normalize().unwrap_or(Vec2::Y)
    }

    /// Reject configurations that cannot produce a valid rope.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::non_finite("gravity"));
        }
        if self.chain_length < 2 {
            return Err(ConfigError::chain_too_short(self.chain_length));
        }
        if !self.segment_length.is_finite() {
            return Err(ConfigError::non_finite("segment_length"));
        }
        if self.segment_length <= 0.0 {
            return Err(ConfigError::NonPositiveSegmentLength(self.segment_length));
        }
        if self.constraint_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::DampingOutOfRange(self.damping));
        }
        if !self.bounds_margin.is_finite() {
            return Err(ConfigError::non_finite("bounds_margin"));
        }
        if self.bounds_margin < 0.0 {
            return Err(ConfigError::NegativeMargin(self.bounds_margin));
        }
        Ok(())
    }
}

/// Parameters for turning a chain into a styled stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrokeConfig {
    /// Catmull-Rom samples emitted per chain segment.
    pub samples_per_segment: usize,
    /// Stroke width at the head.
    pub max_width: f32,
    /// Width floor reached toward the tail.
    pub min_width: f32,
    /// Alpha at the head.
    pub base_alpha: f32,
    /// Amplitude of the per-segment fray offset.
    pub jitter: f32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            samples_per_segment: 14,
            max_width: 12.0,
            min_width: 3.0,
            base_alpha: 0.95,
            jitter: 0.35,
        }
    }
}

impl StrokeConfig {
    /// Set the number of smoothing samples per segment.
    pub fn with_samples_per_segment(mut self, samples: usize) -> Self {
        self.samples_per_segment = samples;
        self
    }

    /// Set the head and tail widths.
    pub fn with_widths(mut self, max_width: f32, min_width: f32) -> Self {
        self.max_width = max_width;
        self.min_width = min_width;
        self
    }

    /// Set the head alpha.
    pub fn with_base_alpha(mut self, alpha: f32) -> Self {
        self.base_alpha = alpha;
        self
    }

    /// Set the fray amplitude (0 disables jitter).
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }

    /// Reject stroke settings that cannot be rendered.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.samples_per_segment == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if !self.max_width.is_finite() {
            return Err(ConfigError::non_finite("max_width"));
        }
        if !self.min_width.is_finite() {
            return Err(ConfigError::non_finite("min_width"));
        }
        if self.min_width < 0.0 || self.min_width > self.max_width {
            return Err(ConfigError::InvalidWidth {
                min: self.min_width,
                max: self.max_width,
            });
        }
        if !(0.0..=1.0).contains(&self.base_alpha) {
            return Err(ConfigError::AlphaOutOfRange(self.base_alpha));
        }
        if !self.jitter.is_finite() {
            return Err(ConfigError::non_finite("jitter"));
        }
        if self.jitter < 0.0 {
            return Err(ConfigError::NegativeJitter(self.jitter));
        }
        Ok(())
    }
}
