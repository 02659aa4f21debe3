//! Rope simulation driver.
//!
//! [`RopeSimulation`] owns the chain and runs one tick per display refresh:
//! clamp dt, sanitize the anchor, pin the head, integrate, relax, and recover
//! from divergence by rebuilding the chain.
//!
//! # Scheduling
//!
//! The host calls [`tick`](RopeSimulation::tick) at roughly the display
//! refresh rate, serialized, never concurrently. Nothing blocks and nothing
//! needs releasing: stopping the frame driver stops the rope.

use crate::chain::{ChainPoint, VerletChain};
use crate::config::SimulationConfig;
use crate::constraint::{ConstraintSolver, RelaxOutcome};
use crate::error::{ConfigError, ConfigResult};
use crate::sanitize::{PointSanitizer, Rect};
use crate::stroke::{StrokeSegment, StrokeStyler};
use crate::time::{clamp_dt, FrameClock};
use glam::Vec2;
use tracing::{debug, warn};

/// Why the chain was rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Explicit reset or construction.
    Requested,
    /// The viewport changed size or position.
    ViewportChanged,
    /// The anchor sample contained NaN or infinity.
    NonFiniteAnchor,
    /// Constraint relaxation found a non-finite point.
    Divergence,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The rope advanced normally; fresh output is ready.
    Advanced,
    /// The chain was rebuilt instead of advancing.
    Reset(ResetReason),
}

/// A single rope whose head follows an anchor.
#[derive(Debug, Clone)]
pub struct RopeSimulation {
    config: SimulationConfig,
    sanitizer: PointSanitizer,
    chain: VerletChain,
    solver: ConstraintSolver,
    clock: FrameClock,
    anchor: Vec2,
    frames: u64,
    ready: bool,
}

impl RopeSimulation {
    /// Validate `config` and build a rope hanging from `anchor` inside
    /// `viewport`.
    pub fn new(config: SimulationConfig, viewport: Rect, anchor: Vec2) -> ConfigResult<Self> {
        config.validate()?;
        if !viewport.is_valid() {
            return Err(ConfigError::EmptyViewport);
        }

        let sanitizer = PointSanitizer::new(viewport, config.bounds_margin);
        let mut sim = Self {
            chain: VerletChain::new(&config),
            solver: ConstraintSolver::new(config.segment_length),
            clock: FrameClock::new(),
            anchor: sanitizer.sanitize_or_center(anchor),
            frames: 0,
            ready: false,
            config,
            sanitizer,
        };
        sim.reset_with(anchor, ResetReason::Requested);
        Ok(sim)
    }

    /// Build with default configuration.
    pub fn with_defaults(viewport: Rect, anchor: Vec2) -> ConfigResult<Self> {
        Self::new(SimulationConfig::default(), viewport, anchor)
    }

    /// Advance one frame with an explicit delta in seconds.
    ///
    /// `dt` is clamped to `[1/120, 1/15]`; a non-finite `dt` counts as 1/60.
    pub fn tick(&mut self, anchor: Vec2, dt: f32) -> TickOutcome {
        self.step(anchor, clamp_dt(dt))
    }

    /// Advance one frame from a host timestamp in seconds.
    ///
    /// The first tick after construction or reset uses 1/60 s.
    pub fn tick_at(&mut self, anchor: Vec2, timestamp: f64) -> TickOutcome {
        let dt = self.clock.advance(timestamp);
        self.step(anchor, dt)
    }

    /// Advance one frame using the wall clock.
    pub fn tick_now(&mut self, anchor: Vec2) -> TickOutcome {
        let dt = self.clock.update();
        self.step(anchor, dt)
    }

    fn step(&mut self, anchor: Vec2, dt: f32) -> TickOutcome {
        if !anchor.is_finite() {
            warn!(?anchor, "non-finite anchor sample, resetting rope");
            let center = self.sanitizer.fallback();
            return self.reset_with(center, ResetReason::NonFiniteAnchor);
        }

        let anchor = self.sanitizer.sanitize_or_center(anchor);
        self.anchor = anchor;

        self.chain.pin_head(anchor);
        self.chain.integrate(dt, &self.sanitizer);
        self.settle(anchor)
    }

    /// Relax the integrated chain and publish the frame, or rebuild the chain
    /// if relaxation meets a non-finite point.
    ///
    /// `integrate` already heals non-finite points, so divergence here means
    /// something upstream produced a value the sanitizer let through.
    fn settle(&mut self, anchor: Vec2) -> TickOutcome {
        let outcome = self.solver.relax(
            &mut self.chain,
            anchor,
            self.config.constraint_iterations,
            &self.sanitizer,
        );
        if let RelaxOutcome::Diverged { segment } = outcome {
            warn!(segment, "rope diverged during relaxation, resetting");
            return self.reset_with(anchor, ResetReason::Divergence);
        }

        self.frames += 1;
        self.ready = true;
        TickOutcome::Advanced
    }

    /// Rebuild the chain hanging from `anchor`.
    pub fn reset(&mut self, anchor: Vec2) {
        self.reset_with(anchor, ResetReason::Requested);
    }

    fn reset_with(&mut self, anchor: Vec2, reason: ResetReason) -> TickOutcome {
        let anchor = self.sanitizer.sanitize_or_center(anchor);
        self.chain.reset(anchor, &self.sanitizer);
        self.anchor = anchor;
        self.clock.restart();
        self.ready = true;
        debug!(?reason, ?anchor, points = self.chain.len(), "rope reset");
        TickOutcome::Reset(reason)
    }

    /// Report the host's current viewport.
    ///
    /// Recomputes the working bounds and fallback centre and rebuilds the
    /// chain at the last anchor if the viewport changed. Returns `None` when
    /// nothing changed.
    pub fn set_viewport(&mut self, viewport: Rect) -> ConfigResult<Option<TickOutcome>> {
        if !viewport.is_valid() {
            return Err(ConfigError::EmptyViewport);
        }
        if viewport == self.sanitizer.viewport() {
            return Ok(None);
        }
        debug!(
            width = viewport.width(),
            height = viewport.height(),
            "viewport changed"
        );
        self.sanitizer = PointSanitizer::new(viewport, self.config.bounds_margin);
        let anchor = self.anchor;
        Ok(Some(self.reset_with(anchor, ResetReason::ViewportChanged)))
    }

    /// Current chain positions, head first.
    pub fn positions(&self) -> Vec<Vec2> {
        self.chain.positions()
    }

    /// Current chain points with their previous positions.
    pub fn points(&self) -> &[ChainPoint] {
        self.chain.points()
    }

    /// The underlying chain.
    pub fn chain(&self) -> &VerletChain {
        &self.chain
    }

    /// Position of the anchor-pinned head.
    pub fn head(&self) -> Vec2 {
        self.chain.points()[0].position
    }

    /// Last sanitized anchor.
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn viewport(&self) -> Rect {
        self.sanitizer.viewport()
    }

    pub fn working_bounds(&self) -> Rect {
        self.sanitizer.working_bounds()
    }

    /// Successful ticks since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether fresh output is available since the last [`take_ready`](Self::take_ready).
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Consume the ready flag; returns whether the renderer should redraw.
    pub fn take_ready(&mut self) -> bool {
        std::mem::take(&mut self.ready)
    }

    /// Smooth and style the current chain in one call.
    pub fn stroke(&self, styler: &StrokeStyler) -> Vec<StrokeSegment> {
        styler.stroke(&self.chain.positions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::max_length_error;

    const DT: f32 = 1.0 / 60.0;

    fn viewport() -> Rect {
        Rect::from_size(800.0, 600.0)
    }

    fn rope(anchor: Vec2) -> RopeSimulation {
        RopeSimulation::with_defaults(viewport(), anchor).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig::default().with_chain_length(1);
        let err = RopeSimulation::new(config, viewport(), Vec2::ZERO).unwrap_err();
        assert_eq!(err, ConfigError::ChainTooShort { length: 1 });

        let err = RopeSimulation::with_defaults(Rect::from_size(0.0, 0.0), Vec2::ZERO).unwrap_err();
        assert_eq!(err, ConfigError::EmptyViewport);
    }

    #[test]
    fn test_new_chain_is_at_rest() {
        let sim = rope(Vec2::new(400.0, 100.0));
        assert_eq!(sim.positions().len(), 28);
        assert_eq!(sim.head(), Vec2::new(400.0, 100.0));
        assert!(sim.points().iter().all(|p| p.velocity() == Vec2::ZERO));
        assert_eq!(sim.frames(), 0);
    }

    #[test]
    fn test_head_is_pinned_exactly() {
        let mut sim = rope(Vec2::new(400.0, 100.0));
        for i in 0..120 {
            let t = i as f32 * DT;
            let anchor = Vec2::new(400.0 + 200.0 * t.sin(), 200.0 + 80.0 * (2.0 * t).cos());
            assert_eq!(sim.tick(anchor, DT), TickOutcome::Advanced);
            assert_eq!(sim.head(), anchor);
        }
    }

    #[test]
    fn test_anchor_outside_bounds_is_clamped() {
        let mut sim = rope(Vec2::new(400.0, 100.0));
        sim.tick(Vec2::new(5000.0, -5000.0), DT);
        assert_eq!(sim.head(), Vec2::new(1040.0, -240.0));
        assert_eq!(sim.anchor(), sim.head());
    }

    #[test]
    fn test_first_tick_converges_to_segment_length() {
        let anchor = Vec2::new(400.0, 50.0);
        let mut sim = rope(anchor);
        sim.tick(anchor, DT);
        let error = max_length_error(&sim.positions(), 18.0);
        assert!(error < 0.05 * 18.0, "max length error {error}");
    }

    #[test]
    fn test_nan_anchor_resets_to_viewport_center() {
        let mut sim = rope(Vec2::new(100.0, 100.0));
        for _ in 0..10 {
            sim.tick(Vec2::new(150.0, 120.0), DT);
        }

        let outcome = sim.tick(Vec2::NAN, DT);
        assert_eq!(outcome, TickOutcome::Reset(ResetReason::NonFiniteAnchor));
        assert_eq!(sim.head(), Vec2::new(400.0, 300.0));
        assert!(sim.chain().is_finite());
    }

    #[test]
    fn test_nan_mid_chain_heals_next_tick() {
        let anchor = Vec2::new(400.0, 100.0);
        let mut sim = rope(anchor);
        sim.tick(anchor, DT);

        sim.chain.points_mut()[10].position = Vec2::NAN;
        sim.chain.points_mut()[11].previous = Vec2::new(f32::INFINITY, 0.0);

        assert_eq!(sim.tick(anchor, DT), TickOutcome::Advanced);
        assert!(sim.chain().is_finite());
        assert_eq!(sim.head(), anchor);
    }

    #[test]
    fn test_divergence_triggers_reset() {
        let anchor = Vec2::new(400.0, 100.0);
        let mut sim = rope(anchor);
        sim.tick(anchor, DT);
        let frames = sim.frames();
        sim.take_ready();

        // Integration heals NaNs before relaxation sees them, so inject one after it.
        sim.chain.points_mut()[5].position = Vec2::NAN;
        let outcome = sim.settle(anchor);

        assert_eq!(outcome, TickOutcome::Reset(ResetReason::Divergence));
        assert!(sim.chain().is_finite());
        assert_eq!(sim.head(), anchor);
        assert!(sim.points().iter().all(|p| p.velocity() == Vec2::ZERO));
        assert_eq!(sim.frames(), frames);
        assert!(sim.is_ready());
    }

    #[test]
    fn test_settle_publishes_finite_frame() {
        let anchor = Vec2::new(400.0, 100.0);
        let mut sim = rope(anchor);
        assert_eq!(sim.settle(anchor), TickOutcome::Advanced);
        assert_eq!(sim.frames(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut sim = rope(Vec2::new(200.0, 200.0));
        sim.reset(Vec2::new(300.0, 100.0));
        let first = sim.positions();
        sim.reset(Vec2::new(300.0, 100.0));
        assert_eq!(sim.positions(), first);
    }

    #[test]
    fn test_set_viewport_resets_and_moves_fallback() {
        let mut sim = rope(Vec2::new(200.0, 200.0));
        assert_eq!(sim.set_viewport(viewport()).unwrap(), None);

        let outcome = sim.set_viewport(Rect::from_size(1920.0, 1080.0)).unwrap();
        assert_eq!(outcome, Some(TickOutcome::Reset(ResetReason::ViewportChanged)));
        assert_eq!(sim.working_bounds().max, Vec2::new(2160.0, 1320.0));

        sim.tick(Vec2::NAN, DT);
        assert_eq!(sim.head(), Vec2::new(960.0, 540.0));

        assert_eq!(
            sim.set_viewport(Rect::from_size(-1.0, 5.0)),
            Err(ConfigError::EmptyViewport)
        );
        assert_eq!(sim.viewport(), Rect::from_size(1920.0, 1080.0));
    }

    #[test]
    fn test_tick_at_uses_default_dt_first() {
        let anchor = Vec2::new(400.0, 100.0);
        let mut a = rope(anchor);
        let mut b = rope(anchor);

        a.tick_at(anchor, 1000.0);
        b.tick(anchor, 1.0 / 60.0);
        assert_eq!(a.positions(), b.positions());

        // Huge gap is clamped to 1/15.
        a.tick_at(anchor, 1010.0);
        b.tick(anchor, 1.0 / 15.0);
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn test_ready_flag() {
        let mut sim = rope(Vec2::new(400.0, 100.0));
        assert!(sim.take_ready());
        assert!(!sim.is_ready());
        sim.tick(Vec2::new(400.0, 100.0), DT);
        assert!(sim.is_ready());
        assert_eq!(sim.frames(), 1);
    }

    #[test]
    fn test_simulation_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RopeSimulation>();
    }

    #[test]
    fn test_stroke_from_simulation() {
        let mut sim = rope(Vec2::new(400.0, 100.0));
        sim.tick(Vec2::new(420.0, 110.0), DT);
        let segments = sim.stroke(&StrokeStyler::default());
        assert_eq!(segments.len(), 27 * 15 - 1);
        assert_eq!(segments[0].width, 12.0);
    }
}
