//! Catmull-Rom densification of the chain polyline.

use glam::Vec2;

/// Evaluate a uniform Catmull-Rom segment between `p1` and `p2` at `t ∈ [0, 1]`.
#[inline]
pub fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

/// Turn `points` into a dense smooth polyline through every input point.
///
/// The input is padded by repeating its first and last point so the curve
/// reaches both ends. Each span contributes its start point plus
/// `samples_per_segment` samples for `t ∈ (0, 1]`, giving
/// `(n - 1) * (samples_per_segment + 1)` points. The first and last output
/// points equal the input's exactly. Inputs with fewer than two points are
/// returned unchanged; zero samples is treated as one.
pub fn smooth(points: &[Vec2], samples_per_segment: usize) -> Vec<Vec2> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let samples = samples_per_segment.max(1);
    let last = points.len() - 1;
    let at = |i: isize| points[i.clamp(0, last as isize) as usize];

    let mut out = Vec::with_capacity(last * (samples + 1));
    for seg in 0..last as isize {
        let (p0, p1, p2, p3) = (at(seg - 1), at(seg), at(seg + 1), at(seg + 2));
        out.push(p1);
        for k in 1..samples {
            let t = k as f32 / samples as f32;
            out.push(catmull_rom(p0, p1, p2, p3, t));
        }
        // The basis interpolates p2 at t = 1; push it verbatim to avoid rounding.
        out.push(p2);
    }
    out
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_inputs_unchanged() {
        assert!(smooth(&[], 14).is_empty());
        let single = [Vec2::new(3.0, 4.0)];
        assert_eq!(smooth(&single, 14), single.to_vec());
    }

    #[test]
    fn test_output_length_and_endpoints() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 18.0), Vec2::new(0.0, 36.0)];
        let out = smooth(&pts, 14);
        assert_eq!(out.len(), 14 * 2 + 2);
        assert_eq!(out[0], pts[0]);
        assert_eq!(*out.last().unwrap(), pts[2]);
    }

    #[test]
    fn test_passes_through_every_control_point() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(20.0, -3.0),
            Vec2::new(25.0, 12.0),
        ];
        let samples = 8;
        let out = smooth(&pts, samples);
        for (i, p) in pts.iter().take(3).enumerate() {
            assert_eq!(out[i * (samples + 1)], *p);
        }
    }

    #[test]
    fn test_collinear_input_stays_on_line() {
        let pts: Vec<Vec2> = (0..5).map(|i| Vec2::new(0.0, i as f32 * 18.0)).collect();
        let out = smooth(&pts, 14);
        assert!(out.iter().all(|p| p.x.abs() < 1e-4));
        assert!(out.windows(2).all(|w| w[1].y >= w[0].y - 1e-4));
    }

    #[test]
    fn test_zero_samples_treated_as_one() {
        let pts = [Vec2::ZERO, Vec2::new(5.0, 0.0), Vec2::new(10.0, 0.0)];
        assert_eq!(smooth(&pts, 0), vec![pts[0], pts[1], pts[1], pts[2]]);
    }

    #[test]
    fn test_catmull_rom_endpoints() {
        let (p0, p1, p2, p3) = (
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 1.0),
        );
        assert!(catmull_rom(p0, p1, p2, p3, 0.0).abs_diff_eq(p1, 1e-6));
        assert!(catmull_rom(p0, p1, p2, p3, 1.0).abs_diff_eq(p2, 1e-6));
    }

    #[test]
    fn test_polyline_length() {
        let pts = [Vec2::ZERO, Vec2::new(3.0, 4.0), Vec2::new(3.0, 10.0)];
        assert!((polyline_length(&pts) - 11.0).abs() < 1e-5);
        assert_eq!(polyline_length(&pts[..1]), 0.0);
    }
}
