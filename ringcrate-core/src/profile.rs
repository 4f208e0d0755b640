//! Closed 2D outlines used as extrusion profiles

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A closed polygon in the XY plane
///
/// The last point connects back to the first; the closing point is never
/// stored twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon2 {
    pub points: Vec<Point2f>,
}

impl Polygon2 {
    /// Create a polygon from its points
    pub fn new(points: Vec<Point2f>) -> Self {
        Self { points }
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the edges as `(start, end)` pairs, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (&Point2f, &Point2f)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (&self.points[i], &self.points[(i + 1) % n]))
    }

    /// Signed area (shoelace); counter-clockwise polygons are positive
    pub fn signed_area(&self) -> f32 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let twice: f64 = self
            .edges()
            .map(|(a, b)| a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64)
            .sum();
        (twice * 0.5) as f32
    }

    /// Absolute enclosed area
    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// The same loop traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Even-odd point containment test
    pub fn contains(&self, point: &Point2f) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let t = (point.y - a.y) / (b.y - a.y);
                let x = a.x + t * (b.x - a.x);
                if point.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Smallest distance from `point` to any edge of the polygon
    pub fn min_distance_to(&self, point: &Point2f) -> f32 {
        self.edges()
            .map(|(a, b)| segment_distance(point, a, b))
            .fold(f32::INFINITY, f32::min)
    }
}

/// Distance from `p` to the segment `a..b`
pub fn segment_distance(p: &Point2f, a: &Point2f, b: &Point2f) -> f32 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= f32::EPSILON {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}
