//! Procedural 2D outlines

use ringcrate_core::{Point2f, Polygon2};
use std::f32::consts::TAU;

/// Radial amplitude of the outer boundary perturbation
pub const WAVE_AMPLITUDE: f32 = 0.5;

/// Closing samples closer than this to the first sample are dropped
const CLOSE_EPSILON: f32 = 1e-6;

/// Sample the wave-perturbed outer boundary of a ring
///
/// Returns `wave_count + 1` points. Sample `i` lies at angle
/// `2π·i / wave_count` and radius `radius + 0.5·sin(2i)`, with `i` taken in
/// radians. The last sample shares its angle with the first. An empty vector
/// is returned for `wave_count == 0`.
pub fn perturbed_boundary(radius: f32, wave_count: u32) -> Vec<Point2f> {
    if wave_count == 0 {
        return Vec::new();
    }

    (0..=wave_count)
        .map(|i| {
            let angle = TAU * i as f32 / wave_count as f32;
            let r = radius + WAVE_AMPLITUDE * (2.0 * i as f32).sin();
            Point2f::new(r * angle.cos(), r * angle.sin())
        })
        .collect()
}

/// Regular polygon approximating a circle, counter-clockwise from +X
pub fn circle(radius: f32, segments: u32) -> Vec<Point2f> {
    (0..segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            Point2f::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// The perturbed boundary as a closed loop
///
/// The closing sample is kept as its own vertex unless it lands on the first
/// one, so the loop ends with a short radial step where `sin(2W) != 0`.
pub fn outer_loop(radius: f32, wave_count: u32) -> Polygon2 {
    let mut points = perturbed_boundary(radius, wave_count);
    if points.len() >= 2 {
        let first = points[0];
        if let Some(last) = points.last() {
            if (last - first).norm() <= CLOSE_EPSILON {
                points.pop();
            }
        }
    }
    Polygon2::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_boundary_point_count() {
        for w in 1..40 {
            assert_eq!(perturbed_boundary(10.0, w).len(), w as usize + 1);
        }
    }

    #[test]
    fn test_boundary_radii() {
        let radius = 14.0;
        let points = perturbed_boundary(radius, 18);
        for (i, p) in points.iter().enumerate() {
            let expected = radius + 0.5 * (2.0 * i as f32).sin();
            assert_relative_eq!(p.coords.norm_squared(), expected * expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_boundary_angles() {
        let points = perturbed_boundary(5.0, 4);
        assert_relative_eq!(points[1].x, 0.0, epsilon = 1e-5);
        assert!(points[1].y > 0.0);
        assert_relative_eq!(points[2].y, 0.0, epsilon = 1e-5);
        assert!(points[2].x < 0.0);
        // First sample sits on +X at the unperturbed radius
        assert_relative_eq!(points[0].x, 5.0);
        assert_relative_eq!(points[0].y, 0.0);
    }

    #[test]
    fn test_boundary_is_deterministic() {
        assert_eq!(perturbed_boundary(7.5, 24), perturbed_boundary(7.5, 24));
    }

    #[test]
    fn test_zero_waves_is_empty() {
        assert!(perturbed_boundary(3.0, 0).is_empty());
    }

    #[test]
    fn test_circle() {
        let pts = circle(2.0, 8);
        assert_eq!(pts.len(), 8);
        for p in &pts {
            assert_relative_eq!(p.coords.norm(), 2.0, epsilon = 1e-6);
        }
        assert!(!Polygon2::new(pts).is_clockwise());
    }

    #[test]
    fn test_outer_loop_keeps_radial_step() {
        // sin(36) != 0, so the closing sample differs from the first
        let outer = outer_loop(14.0, 18);
        assert_eq!(outer.len(), 19);
        assert!(!outer.is_clockwise());
    }
}
