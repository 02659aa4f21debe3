//! Error types for rope-trail.
//!
//! Numerical trouble inside the simulation is never surfaced as an error: the
//! rope heals itself on the next tick. The only failure a host has to handle is
//! a configuration that cannot produce a valid rope or stroke.

use thiserror::Error;

/// Result type alias for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised when a [`SimulationConfig`](crate::SimulationConfig) or
/// [`StrokeConfig`](crate::StrokeConfig) is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The chain needs a head and at least one free point.
    #[error("chain length must be at least 2 points, got {length}")]
    ChainTooShort {
        /// The rejected chain length.
        length: usize,
    },

    /// Segment rest length must be strictly positive.
    #[error("segment length must be positive, got {0}")]
    NonPositiveSegmentLength(f32),

    /// The constraint solver needs at least one pass.
    #[error("constraint iterations must be greater than zero")]
    ZeroIterations,

    /// Damping outside the open interval (0, 1).
    #[error("damping must lie in (0, 1), got {0}")]
    DampingOutOfRange(f32),

    /// A parameter contains NaN or infinity.
    #[error("parameter `{0}` must be finite")]
    NonFinite(&'static str),

    /// The working-bounds margin cannot shrink the viewport.
    #[error("bounds margin must not be negative, got {0}")]
    NegativeMargin(f32),

    /// The smoother needs at least one sample per segment.
    #[error("samples per segment must be greater than zero")]
    ZeroSamples,

    /// Stroke widths are negative or inverted.
    #[error("invalid stroke width range: min {min}, max {max}")]
    InvalidWidth {
        /// Minimum (tail) width.
        min: f32,
        /// Maximum (head) width.
        max: f32,
    },

    /// Base alpha outside [0, 1].
    #[error("base alpha must lie in [0, 1], got {0}")]
    AlphaOutOfRange(f32),

    /// Jitter amplitude must not be negative.
    #[error("jitter amplitude must not be negative, got {0}")]
    NegativeJitter(f32),

    /// The viewport has no area.
    #[error("viewport must have a positive width and height")]
    EmptyViewport,
}

impl ConfigError {
    /// Create a non-finite parameter error.
    #[must_use]
    pub const fn non_finite(parameter: &'static str) -> Self {
        Self::NonFinite(parameter)
    }

    /// Create a chain length error.
    #[must_use]
    pub const fn chain_too_short(length: usize) -> Self {
        Self::ChainTooShort { length }
    }
}
