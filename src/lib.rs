//! # rope-trail
//!
//! A dynamic rope whose head follows a moving anchor (usually the cursor),
//! simulated with Verlet integration and iterative length constraints, then
//! turned into a smooth, tapered, frayed stroke for display.
//!
//! rope-trail is the simulation and curve pipeline only. Creating a window,
//! reading the pointer and rasterizing the stroke belong to the host; the
//! crate consumes one anchor sample per frame and emits a stroke description.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rope_trail::prelude::*;
//!
//! let viewport = Rect::from_size(1280.0, 720.0);
//! let mut rope = RopeSimulation::with_defaults(viewport, viewport.center())?;
//! let styler = StrokeStyler::default();
//! let visuals = StrokeVisuals::default();
//!
//! // Once per display refresh, never concurrently:
//! rope.tick(cursor, dt);
//! let segments = rope.stroke(&styler);
//! let instances = build_instances(&segments, &visuals);
//! renderer.upload(as_bytes(&instances));
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Type | Does |
//! |-------|------|------|
//! | Sanitize | [`PointSanitizer`] | Replaces NaN/∞, clamps to padded viewport |
//! | Integrate | [`VerletChain`] | Damped Verlet step with gravity |
//! | Relax | [`ConstraintSolver`] | Gauss-Seidel segment-length passes |
//! | Drive | [`RopeSimulation`] | dt clamp, head pin, divergence recovery |
//! | Smooth | [`smooth`] | Catmull-Rom densification |
//! | Style | [`StrokeStyler`] | Width/alpha taper, deterministic fray |
//! | Export | [`build_instances`] | Two-pass `Pod` instances for the GPU |
//!
//! ## Self-healing
//!
//! Numerical trouble is never an error. A broken point is snapped onto its
//! neighbour during integration; if relaxation still meets a non-finite
//! point, or the anchor itself is non-finite, the whole chain is rebuilt.
//! Only an invalid configuration is reported, as a [`ConfigError`].

pub mod chain;
pub mod config;
pub mod constraint;
mod error;
pub mod instance;
#[cfg(feature = "winit")]
pub mod input;
pub mod sanitize;
mod simulation;
pub mod smooth;
pub mod stroke;
pub mod time;
pub mod visuals;

pub use bytemuck;
pub use chain::{ChainPoint, VerletChain};
pub use config::{SimulationConfig, StrokeConfig};
pub use constraint::{ConstraintSolver, RelaxOutcome};
pub use error::{ConfigError, ConfigResult};
pub use glam::{Vec2, Vec3, Vec4};
#[cfg(feature = "winit")]
pub use input::CursorTracker;
pub use instance::{as_bytes, build_instances, StrokeInstance};
pub use sanitize::{PointSanitizer, Rect};
pub use simulation::{ResetReason, RopeSimulation, TickOutcome};
pub use smooth::smooth;
pub use stroke::{StrokeSegment, StrokeStyler};
pub use time::FrameClock;
pub use visuals::{Palette, StrokePass, StrokeVisuals};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use rope_trail::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{SimulationConfig, StrokeConfig};
    pub use crate::error::{ConfigError, ConfigResult};
    pub use crate::instance::{as_bytes, build_instances, StrokeInstance};
    pub use crate::sanitize::Rect;
    pub use crate::simulation::{ResetReason, RopeSimulation, TickOutcome};
    pub use crate::stroke::{StrokeSegment, StrokeStyler};
    pub use crate::time::FrameClock;
    pub use crate::visuals::{Palette, StrokePass, StrokeVisuals};
    pub use crate::{Vec2, Vec3, Vec4};
    #[cfg(feature = "winit")]
    pub use crate::input::CursorTracker;
}
