//! Frame timing for the rope simulation.
//!
//! The host's frame driver is not guaranteed to tick at a fixed rate, so every
//! delta that reaches the integrator is clamped to `[MIN_DT, MAX_DT]`. The
//! first frame after a (re)start has no previous timestamp and uses
//! [`DEFAULT_DT`] instead of an unbounded raw delta.
//!
//! # Example
//!
//! ```ignore
//! use rope_trail::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // In the host's display callback:
//! let dt = clock.update();
//! rope.tick(cursor, dt);
//! ```
//!
//! The clamp is uniform regardless of the display's refresh rate, so very fast
//! or very slow displays see slightly different effective gravity.

use std::time::Instant;

/// Shortest step fed to the integrator (120 Hz).
pub const MIN_DT: f32 = 1.0 / 120.0;
/// Longest step fed to the integrator (15 Hz); bounds the gravity impulse on hitches.
pub const MAX_DT: f32 = 1.0 / 15.0;
/// Step used when no previous timestamp exists.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Clamp a raw frame delta into the stable range.
///
/// Non-finite input yields [`DEFAULT_DT`].
#[inline]
pub fn clamp_dt(raw: f32) -> f32 {
    if raw.is_finite() {
        raw.clamp(MIN_DT, MAX_DT)
    } else {
        DEFAULT_DT
    }
}

/// Converts host timestamps into clamped simulation deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Timestamp of the last frame, in seconds on the host's clock.
    last_timestamp: Option<f64>,
    /// Reference point for [`update`](Self::update).
    origin: Option<Instant>,
    /// Delta returned by the last advance.
    last_delta: f32,
    /// Frames advanced since the last restart.
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock with no previous frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to a host timestamp (seconds, monotonically increasing).
    ///
    /// Returns the clamped delta. The first call, and any call whose
    /// timestamp does not move forward, returns [`DEFAULT_DT`].
    pub fn advance(&mut self, timestamp: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(last) if timestamp > last => clamp_dt((timestamp - last) as f32),
            _ => DEFAULT_DT,
        };
        if timestamp.is_finite() {
            self.last_timestamp = Some(timestamp);
        }
        self.last_delta = dt;
        self.frame_count += 1;
        dt
    }

    /// Advance using the wall clock. Call once per frame.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let origin = *self.origin.get_or_insert(now);
        self.advance(now.duration_since(origin).as_secs_f64())
    }

    /// Forget the previous timestamp; the next frame uses [`DEFAULT_DT`].
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    /// Whether a previous timestamp exists.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.last_timestamp.is_some()
    }

    /// Delta returned by the most recent advance (0 before the first frame).
    #[inline]
    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }

    /// Frames advanced since the last restart.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}
