//! # Headless Rope
//!
//! Drives a rope along a Lissajous cursor path without a window and prints
//! per-second stats: how stretched the chain is, how long the stroke is and
//! how many instances a renderer would draw.
//!
//! Run with: `cargo run --example headless --release -- [seconds]`

use rope_trail::constraint::max_length_error;
use rope_trail::prelude::*;
use rope_trail::smooth::{polyline_length, smooth};

fn main() {
    let seconds: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    let viewport = Rect::from_size(1280.0, 720.0);
    let config = SimulationConfig::default();
    let styler = StrokeStyler::default();
    let visuals = StrokeVisuals::default().with_palette(Palette::Ember);

    println!("=== Rope Trail Headless Demo ===");
    println!("Viewport: {}x{}", viewport.width(), viewport.height());
    println!(
        "Chain: {} points x {}px, {} iterations",
        config.chain_length, config.segment_length, config.constraint_iterations
    );
    println!("Simulating {} s at 60 Hz", seconds);
    println!();

    let mut rope = match RopeSimulation::new(config, viewport, viewport.center()) {
        Ok(rope) => rope,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let center = viewport.center();
    let mut resets = 0;
    let mut worst_error: f32 = 0.0;

    for frame in 0..seconds * 60 {
        let t = frame as f64 / 60.0;
        let anchor = center
            + Vec2::new(
                420.0 * (1.7 * t).sin() as f32,
                220.0 * (2.3 * t + 0.5).sin() as f32,
            );

        // One deliberately broken sample to exercise recovery.
        let anchor = if frame == 150 { Vec2::NAN } else { anchor };

        if let TickOutcome::Reset(reason) = rope.tick_at(anchor, t) {
            println!("frame {frame:4}: reset ({reason:?})");
            resets += 1;
        }
        worst_error = worst_error.max(max_length_error(&rope.positions(), config.segment_length));

        if (frame + 1) % 60 == 0 {
            let positions = rope.positions();
            let segments = rope.stroke(&styler);
            let instances = build_instances(&segments, &visuals);
            println!(
                "t={:>2}s head=({:7.1}, {:7.1}) tail=({:7.1}, {:7.1}) stretch={:5.2}px stroke={:6.1}px segments={} bytes={}",
                (frame + 1) / 60,
                positions[0].x,
                positions[0].y,
                positions[positions.len() - 1].x,
                positions[positions.len() - 1].y,
                max_length_error(&positions, config.segment_length),
                polyline_length(&smooth(&positions, styler.config().samples_per_segment)),
                segments.len(),
                as_bytes(&instances).len(),
            );
        }
    }

    println!();
    println!("Frames: {}", rope.frames());
    println!("Resets: {}", resets);
    println!("Worst segment error: {:.3}px", worst_error);
}
