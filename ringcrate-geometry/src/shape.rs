//! Planar shapes with holes

use ringcrate_core::{Error, Polygon2, Result};
use serde::{Deserialize, Serialize};

/// Minimum clearance between a hole vertex and the outer boundary
const HOLE_CLEARANCE: f32 = 1e-6;

/// An outer loop with zero or more holes, ready for extrusion
///
/// The outer loop is stored counter-clockwise and every hole clockwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub outer: Polygon2,
    pub holes: Vec<Polygon2>,
}

impl Shape {
    /// Create a shape, normalising loop orientation
    pub fn new(outer: Polygon2, holes: Vec<Polygon2>) -> Self {
        let outer = if outer.is_clockwise() { outer.reversed() } else { outer };
        let holes = holes
            .into_iter()
            .map(|hole| if hole.is_clockwise() { hole } else { hole.reversed() })
            .collect();
        Self { outer, holes }
    }

    /// A shape without holes
    pub fn solid(outer: Polygon2) -> Self {
        Self::new(outer, Vec::new())
    }

    /// All loops, outer first
    pub fn loops(&self) -> impl Iterator<Item = &Polygon2> + '_ {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    /// Total number of loop vertices
    pub fn vertex_count(&self) -> usize {
        self.loops().map(Polygon2::len).sum()
    }

    /// Enclosed area, holes subtracted
    pub fn area(&self) -> f32 {
        self.outer.area() - self.holes.iter().map(Polygon2::area).sum::<f32>()
    }

    /// Check that the shape can be triangulated and extruded
    pub fn validate(&self) -> Result<()> {
        if self.outer.len() < 3 {
            return Err(Error::InvalidData(format!(
                "Outer loop needs at least 3 points, got {}",
                self.outer.len()
            )));
        }
        if self.outer.area() <= f32::EPSILON {
            return Err(Error::InvalidData("Outer loop encloses no area".to_string()));
        }

        for (index, hole) in self.holes.iter().enumerate() {
            if hole.len() < 3 {
                return Err(Error::InvalidData(format!(
                    "Hole {} needs at least 3 points, got {}",
                    index,
                    hole.len()
                )));
            }
            for point in &hole.points {
                if !self.outer.contains(point)
                    || self.outer.min_distance_to(point) <= HOLE_CLEARANCE
                {
                    return Err(Error::InvalidData(format!(
                        "Hole {} vertex ({}, {}) is not strictly inside the outer loop",
                        index, point.x, point.y
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::circle;
    use approx::assert_relative_eq;
    use ringcrate_core::Point2f;

    #[test]
    fn test_orientation_is_normalised() {
        let outer = Polygon2::new(circle(2.0, 16)).reversed();
        let hole = Polygon2::new(circle(1.0, 16));
        let shape = Shape::new(outer, vec![hole]);

        assert!(!shape.outer.is_clockwise());
        assert!(shape.holes[0].is_clockwise());
        assert!(shape.validate().is_ok());
        assert_eq!(shape.vertex_count(), 32);
    }

    #[test]
    fn test_area_subtracts_holes() {
        let square = |s: f32| {
            Polygon2::new(vec![
                Point2f::new(-s, -s),
                Point2f::new(s, -s),
                Point2f::new(s, s),
                Point2f::new(-s, s),
            ])
        };
        let shape = Shape::new(square(2.0), vec![square(1.0)]);
        assert_relative_eq!(shape.area(), 12.0);
    }

    #[test]
    fn test_hole_outside_is_rejected() {
        let outer = Polygon2::new(circle(1.0, 16));
        let hole = Polygon2::new(circle(1.5, 16));
        assert!(Shape::new(outer, vec![hole]).validate().is_err());
    }

    #[test]
    fn test_degenerate_outer_is_rejected() {
        let outer = Polygon2::new(vec![Point2f::new(0.0, 0.0), Point2f::new(1.0, 0.0)]);
        assert!(Shape::solid(outer).validate().is_err());
    }
}
