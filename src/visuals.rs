//! Visual configuration for rope strokes.
//!
//! Styling (width, alpha, fray) decides the stroke's shape; these options
//! decide its colour. The renderer draws every frame in two passes: a darker
//! base stroke at full width, then a lighter, narrower highlight inset on top.
//!
//! ```ignore
//! let visuals = StrokeVisuals::default()
//!     .with_palette(Palette::Ember)
//!     .with_highlight(0.4, 0.5);
//! let instances = build_instances(&segments, &visuals);
//! ```

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pre-defined colour ramps sampled from head (t = 0) to tail (t = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Palette {
    /// Natural hemp rope, tan fading to dark brown (default).
    #[default]
    Hemp,

    /// Single solid white.
    Solid,

    /// Ember - bright orange head cooling to deep red.
    Ember,

    /// Ocean - cyan head sinking to deep blue.
    Ocean,

    /// Neon - pink through purple to cyan.
    Neon,

    /// Ink - near-black with a faint blue tint.
    Ink,
}

impl Palette {
    /// Get the colour stops for this palette (5 colours, head to tail).
    pub fn colors(&self) -> [Vec3; 5] {
        match self {
            Palette::Hemp => [
                Vec3::new(0.86, 0.72, 0.50), // Light tan
                Vec3::new(0.76, 0.60, 0.40),
                Vec3::new(0.64, 0.48, 0.31), // Tan
                Vec3::new(0.50, 0.36, 0.22),
                Vec3::new(0.36, 0.24, 0.14), // Dark brown
            ],
            Palette::Solid => [Vec3::ONE; 5],
            Palette::Ember => [
                Vec3::new(1.0, 0.85, 0.4),  // Yellow-white
                Vec3::new(1.0, 0.6, 0.1),   // Orange
                Vec3::new(0.9, 0.3, 0.05),  // Red-orange
                Vec3::new(0.6, 0.1, 0.02),  // Red
                Vec3::new(0.25, 0.02, 0.0), // Dark red
            ],
            Palette::Ocean => [
                Vec3::new(0.6, 0.9, 1.0),   // Cyan
                Vec3::new(0.2, 0.6, 0.8),   // Light blue
                Vec3::new(0.0, 0.4, 0.6),   // Blue
                Vec3::new(0.0, 0.2, 0.4),   // Dark blue
                Vec3::new(0.0, 0.05, 0.15), // Deep blue
            ],
            Palette::Neon => [
                Vec3::new(1.0, 0.0, 0.5), // Pink
                Vec3::new(0.5, 0.0, 1.0), // Purple
                Vec3::new(0.0, 0.5, 1.0), // Blue
                Vec3::new(0.0, 1.0, 1.0), // Cyan
                Vec3::new(0.5, 1.0, 0.5), // Green
            ],
            Palette::Ink => [
                Vec3::new(0.10, 0.11, 0.16),
                Vec3::new(0.08, 0.09, 0.13),
                Vec3::new(0.06, 0.07, 0.10),
                Vec3::new(0.04, 0.05, 0.07),
                Vec3::new(0.02, 0.02, 0.03),
            ],
        }
    }

    /// Linearly interpolate the palette at `t` (clamped to [0, 1]).
    pub fn sample(&self, t: f32) -> Vec3 {
        let stops = self.colors();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f32;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        stops[i].lerp(stops[i + 1], scaled - i as f32)
    }
}

/// Which of the two draw passes an instance belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokePass {
    /// Darker stroke at full width, drawn first.
    Base,
    /// Lighter inset stroke drawn over the base.
    Highlight,
}

impl StrokePass {
    /// Both passes in draw order.
    pub const ALL: [StrokePass; 2] = [StrokePass::Base, StrokePass::Highlight];
}

/// Colour settings for the two-pass rope stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrokeVisuals {
    /// Colour ramp along the rope.
    pub palette: Palette,
    /// Multiplier applied to palette colours for the base pass.
    pub base_shade: f32,
    /// How far the highlight colour is mixed toward white (0-1).
    pub highlight_lighten: f32,
    /// Highlight width as a fraction of the base width.
    pub highlight_width_scale: f32,
    /// Highlight alpha as a fraction of the segment alpha.
    pub highlight_alpha_scale: f32,
}

impl Default for StrokeVisuals {
    fn default() -> Self {
        Self {
            palette: Palette::Hemp,
            base_shade: 0.55,
            highlight_lighten: 0.35,
            highlight_width_scale: 0.45,
            highlight_alpha_scale: 0.8,
        }
    }
}

impl StrokeVisuals {
    /// Set the colour palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set how dark the base pass is.
    pub fn with_base_shade(mut self, shade: f32) -> Self {
        self.base_shade = shade;
        self
    }

    /// Set highlight lightening and width fraction.
    pub fn with_highlight(mut self, lighten: f32, width_scale: f32) -> Self {
        self.highlight_lighten = lighten;
        self.highlight_width_scale = width_scale;
        self
    }

    /// RGB colour for `pass` at arc-length progress `t`.
    pub fn color(&self, pass: StrokePass, t: f32) -> Vec3 {
        let c = self.palette.sample(t);
        match pass {
            StrokePass::Base => (c * self.base_shade).clamp(Vec3::ZERO, Vec3::ONE),
            StrokePass::Highlight => c.lerp(Vec3::ONE, self.highlight_lighten.clamp(0.0, 1.0)),
        }
    }

    /// Width for `pass` given the styled segment width.
    #[inline]
    pub fn width(&self, pass: StrokePass, width: f32) -> f32 {
        match pass {
            StrokePass::Base => width,
            StrokePass::Highlight => width * self.highlight_width_scale,
        }
    }

    /// Alpha for `pass` given the styled segment alpha.
    #[inline]
    pub fn alpha(&self, pass: StrokePass, alpha: f32) -> f32 {
        match pass {
            StrokePass::Base => alpha,
            StrokePass::Highlight => (alpha * self.highlight_alpha_scale).clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_sample_endpoints() {
        for palette in [Palette::Hemp, Palette::Ember, Palette::Ocean, Palette::Neon, Palette::Ink] {
            let stops = palette.colors();
            assert_eq!(palette.sample(0.0), stops[0]);
            assert!(palette.sample(1.0).abs_diff_eq(stops[4], 1e-6));
        }
    }

    #[test]
    fn test_palette_sample_midpoint_and_clamp() {
        let stops = Palette::Ocean.colors();
        assert!(Palette::Ocean.sample(0.5).abs_diff_eq(stops[2], 1e-6));
        assert!(Palette::Ocean.sample(0.125).abs_diff_eq(stops[0].lerp(stops[1], 0.5), 1e-6));
        assert_eq!(Palette::Ocean.sample(-3.0), stops[0]);
        assert_eq!(Palette::Ocean.sample(f32::NAN), stops[0]);
    }

    #[test]
    fn test_base_is_darker_than_highlight() {
        let visuals = StrokeVisuals::default();
        for t in [0.0, 0.3, 0.9] {
            let base = visuals.color(StrokePass::Base, t);
            let highlight = visuals.color(StrokePass::Highlight, t);
            assert!(base.element_sum() < highlight.element_sum());
        }
    }

    #[test]
    fn test_highlight_is_inset() {
        let visuals = StrokeVisuals::default();
        assert_eq!(visuals.width(StrokePass::Base, 10.0), 10.0);
        assert!(visuals.width(StrokePass::Highlight, 10.0) < 10.0);
        assert!(visuals.alpha(StrokePass::Highlight, 0.9) <= 0.9);
    }
}
