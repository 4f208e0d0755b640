//! Line segment sets used for edge overlays, grids and axes

use crate::color::Color;
use crate::point::*;
use crate::transform::Transform3D;
use serde::{Deserialize, Serialize};

/// Independent line segments stored as consecutive point pairs
///
/// `colors`, when present, holds one color per point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineSegments {
    pub points: Vec<Point3f>,
    pub colors: Option<Vec<Color>>,
}

impl LineSegments {
    /// Create an empty segment set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty segment set that carries per-point colors
    pub fn with_colors() -> Self {
        Self {
            points: Vec::new(),
            colors: Some(Vec::new()),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.points.len() < 2
    }

    /// Append a segment
    ///
    /// If the set carries colors, both ends get `color` (white when `None`).
    pub fn push_segment(&mut self, start: Point3f, end: Point3f, color: Option<Color>) {
        self.points.push(start);
        self.points.push(end);
        if let Some(colors) = self.colors.as_mut() {
            let c = color.unwrap_or_default();
            colors.push(c);
            colors.push(c);
        }
    }

    /// Iterate over `(start, end)` pairs
    pub fn segments(&self) -> impl Iterator<Item = (&Point3f, &Point3f)> + '_ {
        self.points.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// A copy with `transform` applied to every point
    pub fn transformed(&self, transform: &Transform3D) -> LineSegments {
        LineSegments {
            points: self.points.iter().map(|p| transform.transform_point(p)).collect(),
            colors: self.colors.clone(),
        }
    }
}
