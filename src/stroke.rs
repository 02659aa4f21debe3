//! Stroke styling.
//!
//! Walks a smoothed polyline and emits one [`StrokeSegment`] per sub-segment
//! with width and alpha tapered by arc-length progress, plus a small
//! deterministic fray offset. The styler owns no state between frames: the
//! same polyline always produces the same segments.

use crate::config::StrokeConfig;
use crate::constraint::DISTANCE_EPSILON;
use crate::error::ConfigResult;
use crate::smooth::smooth;
use glam::Vec2;

/// One styled piece of the stroke, ordered head to tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSegment {
    /// Polyline start point.
    pub start: Vec2,
    /// Polyline end point.
    pub end: Vec2,
    /// Stroke width for this piece.
    pub width: f32,
    /// Opacity in [0, 1].
    pub alpha: f32,
    /// Fray offset: added to the start, subtracted from the end.
    pub jitter_offset: Vec2,
    /// Arc-length progress at `start`, 0 at the head.
    pub progress: f32,
}

impl StrokeSegment {
    /// Start point after applying the fray offset.
    #[inline]
    pub fn visible_start(&self) -> Vec2 {
        self.start + self.jitter_offset
    }

    /// End point after applying the fray offset.
    #[inline]
    pub fn visible_end(&self) -> Vec2 {
        self.end - self.jitter_offset
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Repeatable noise in [0, 1) keyed by segment index and channel.
///
/// Sine hash rather than an RNG so identical chains style identically.
#[inline]
pub fn hash_noise(index: usize, channel: u32) -> f32 {
    let x = index as f32 * 12.9898 + channel as f32 * 78.233;
    let s = x.sin() * 43_758.545;
    (s - s.floor()).clamp(0.0, 1.0)
}

/// Turns polylines into tapered, frayed stroke segments.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrokeStyler {
    config: StrokeConfig,
}

impl StrokeStyler {
    /// Validate `config` and build a styler.
    pub fn new(config: StrokeConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }

    /// Style an already-smoothed polyline.
    ///
    /// Returns no segments for fewer than two points or a polyline with no
    /// length.
    pub fn style(&self, points: &[Vec2]) -> Vec<StrokeSegment> {
        if points.len() < 2 {
            return Vec::new();
        }

        let raw_total: f32 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
        if raw_total < DISTANCE_EPSILON {
            return Vec::new();
        }
        let total: f32 = points
            .windows(2)
            .map(|w| w[0].distance(w[1]).max(DISTANCE_EPSILON))
            .sum();

        let StrokeConfig {
            max_width,
            min_width,
            base_alpha,
            jitter,
            ..
        } = self.config;

        let mut traveled = 0.0;
        let mut segments = Vec::with_capacity(points.len() - 1);

        for (i, w) in points.windows(2).enumerate() {
            let (start, end) = (w[0], w[1]);
            let delta = end - start;
            let raw_len = delta.length();
            let len = raw_len.max(DISTANCE_EPSILON);

            let progress = (traveled / total).clamp(0.0, 1.0);
            let taper = 1.0 - progress;
            let width = (max_width * taper).max(min_width);
            let alpha = (base_alpha * taper).clamp(0.0, 1.0);

            let dir = delta / len;
            let along = hash_noise(i, 0) * jitter.min(0.25 * raw_len);
            // Bounded so the visible segment never outgrows the polyline piece.
            let max_across = (along * (raw_len - along)).max(0.0).sqrt();
            let across = ((hash_noise(i, 1) - 0.5) * jitter).clamp(-max_across, max_across);
            let jitter_offset = dir * along + dir.perp() * across;

            segments.push(StrokeSegment {
                start,
                end,
                width,
                alpha,
                jitter_offset,
                progress,
            });
            traveled += len;
        }

        segments
    }

    /// Smooth a raw chain and style the result.
    pub fn stroke(&self, chain: &[Vec2]) -> Vec<StrokeSegment> {
        self.style(&smooth(chain, self.config.samples_per_segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styler() -> StrokeStyler {
        StrokeStyler::default()
    }

    fn wavy(n: usize) -> Vec<Vec2> {
        (0..n)
            .map(|i| Vec2::new((i as f32 * 0.7).sin() * 20.0, i as f32 * 18.0))
            .collect()
    }

    #[test]
    fn test_new_validates() {
        assert!(StrokeStyler::new(StrokeConfig::default().with_base_alpha(2.0)).is_err());
        assert!(StrokeStyler::new(StrokeConfig::default()).is_ok());
    }

    #[test]
    fn test_degenerate_inputs_produce_nothing() {
        let s = styler();
        assert!(s.style(&[]).is_empty());
        assert!(s.style(&[Vec2::ONE]).is_empty());
        assert!(s.style(&[Vec2::ONE; 6]).is_empty());
    }

    #[test]
    fn test_head_segment_is_full_width() {
        let segs = styler().style(&wavy(5));
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[0].progress, 0.0);
        assert_eq!(segs[0].width, 12.0);
        assert_eq!(segs[0].alpha, 0.95);
    }

    #[test]
    fn test_taper_is_monotonic() {
        let segs = styler().stroke(&wavy(28));
        assert!(!segs.is_empty());
        for w in segs.windows(2) {
            assert!(w[1].width <= w[0].width);
            assert!(w[1].alpha <= w[0].alpha);
            assert!(w[1].progress >= w[0].progress);
        }
        let tail = segs.last().unwrap();
        assert!(tail.width >= 3.0);
        assert!(tail.alpha >= 0.0 && tail.alpha < 0.1);
    }

    #[test]
    fn test_width_floor() {
        let segs = styler().style(&wavy(40));
        assert!(segs.iter().all(|s| s.width >= 3.0));
        assert!(segs.iter().any(|s| s.width == 3.0));
    }

    #[test]
    fn test_styling_is_deterministic() {
        let pts = wavy(12);
        assert_eq!(styler().stroke(&pts), styler().stroke(&pts));
    }

    #[test]
    fn test_jitter_is_small_and_shrinks_segment() {
        let segs = styler().style(&wavy(10));
        for s in &segs {
            assert!(s.jitter_offset.length() <= 0.35 * 1.2);
            let along = s.jitter_offset.dot((s.end - s.start).normalize());
            assert!(along >= -1e-5, "offset must pull endpoints inward");
            assert!(s.visible_start().distance(s.visible_end()) <= s.length() + 1e-4);
        }
    }

    #[test]
    fn test_jitter_never_lengthens_short_pieces() {
        // Dense sampling of a near-straight chain gives many tiny pieces.
        let chain: Vec<Vec2> = (0..28).map(|i| Vec2::new(i as f32 * 0.05, i as f32 * 0.4)).collect();
        let segs = styler().stroke(&chain);
        assert!(!segs.is_empty());
        for s in &segs {
            let visible = s.visible_start().distance(s.visible_end());
            assert!(visible <= s.length() + 1e-5, "{visible} > {}", s.length());
        }
    }

    #[test]
    fn test_zero_jitter_keeps_endpoints() {
        let s = StrokeStyler::new(StrokeConfig::default().with_jitter(0.0)).unwrap();
        for seg in s.style(&wavy(6)) {
            assert_eq!(seg.jitter_offset, Vec2::ZERO);
            assert_eq!(seg.visible_start(), seg.start);
        }
    }

    #[test]
    fn test_zero_length_pieces_are_tolerated() {
        let pts = [Vec2::ZERO, Vec2::ZERO, Vec2::new(0.0, 10.0)];
        let segs = styler().style(&pts);
        assert_eq!(segs.len(), 2);
        assert!(segs.iter().all(|s| s.jitter_offset.is_finite()));
    }

    #[test]
    fn test_hash_noise_range_and_repeatability() {
        for i in 0..500 {
            for c in 0..2 {
                let n = hash_noise(i, c);
                assert!((0.0..=1.0).contains(&n));
                assert_eq!(n, hash_noise(i, c));
            }
        }
        assert_ne!(hash_noise(3, 0), hash_noise(4, 0));
    }
}
