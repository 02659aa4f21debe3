//! GPU-ready stroke instances.
//!
//! A renderer that draws each segment as an instanced quad can upload the
//! output of [`build_instances`] directly: the struct is `#[repr(C)]` and
//! `Pod`, so [`as_bytes`] is a zero-copy view of the buffer contents.
//!
//! Layout (32 bytes + 16 bytes colour = 48 bytes per instance):
//!
//! | offset | field   | type        |
//! |--------|---------|-------------|
//! | 0      | start   | `[f32; 2]`  |
//! | 8      | end     | `[f32; 2]`  |
//! | 16     | width   | `f32`       |
//! | 20     | alpha   | `f32`       |
//! | 24     | pass    | `u32`       |
//! | 28     | _pad    | `u32`       |
//! | 32     | color   | `[f32; 4]`  |

use crate::stroke::StrokeSegment;
use crate::visuals::{StrokePass, StrokeVisuals};
use bytemuck::{Pod, Zeroable};

/// One segment of one draw pass, ready for a vertex/instance buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StrokeInstance {
    /// Visible (frayed) start point.
    pub start: [f32; 2],
    /// Visible (frayed) end point.
    pub end: [f32; 2],
    /// Pass-adjusted stroke width.
    pub width: f32,
    /// Pass-adjusted alpha.
    pub alpha: f32,
    /// 0 for the base pass, 1 for the highlight pass.
    pub pass: u32,
    pub _pad: u32,
    /// Straight (non-premultiplied) RGBA; the alpha channel repeats `alpha`.
    pub color: [f32; 4],
}

impl StrokeInstance {
    /// Size of one instance in bytes.
    pub const SIZE: usize = std::mem::size_of::<StrokeInstance>();

    /// Build the instance for `segment` drawn in `pass`.
    pub fn new(segment: &StrokeSegment, pass: StrokePass, visuals: &StrokeVisuals) -> Self {
        let rgb = visuals.color(pass, segment.progress);
        let alpha = visuals.alpha(pass, segment.alpha);
        Self {
            start: segment.visible_start().to_array(),
            end: segment.visible_end().to_array(),
            width: visuals.width(pass, segment.width),
            alpha,
            pass: match pass {
                StrokePass::Base => 0,
                StrokePass::Highlight => 1,
            },
            _pad: 0,
            color: rgb.extend(alpha).to_array(),
        }
    }
}

/// Expand styled segments into both draw passes.
///
/// All base instances come first (head to tail), followed by all highlight
/// instances, matching the draw order.
pub fn build_instances(segments: &[StrokeSegment], visuals: &StrokeVisuals) -> Vec<StrokeInstance> {
    let mut out = Vec::with_capacity(segments.len() * StrokePass::ALL.len());
    for pass in StrokePass::ALL {
        out.extend(segments.iter().map(|s| StrokeInstance::new(s, pass, visuals)));
    }
    out
}

/// Raw bytes of an instance slice for buffer upload.
#[inline]
pub fn as_bytes(instances: &[StrokeInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
