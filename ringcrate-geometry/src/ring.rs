//! Tolerance ring assembly: profile, solid, overlay and placement

use crate::edges::{edges_geometry, DEFAULT_EDGE_THRESHOLD_DEGREES};
use crate::extrude::{extrude_shape, ExtrudeOptions};
use crate::profile::{circle, outer_loop};
use crate::shape::Shape;
use ringcrate_core::{
    Error, LineSegments, Point2f, Polygon2, Result, RingParams, Transform3D, TriangleMesh,
};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use tracing::info;

/// Required gap between the wavy outer loop and the bore
const BORE_CLEARANCE: f32 = 1e-3;

/// Tessellation settings for building a ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingOptions {
    /// Segments used to approximate the bore circle
    pub bore_segments: u32,
    /// Side-wall layers along the ring width
    pub extrude_steps: u32,
    /// Crease angle for the edge overlay, in degrees
    pub edge_threshold_degrees: f32,
}

impl Default for RingOptions {
    fn default() -> Self {
        Self {
            bore_segments: 64,
            extrude_steps: 1,
            edge_threshold_degrees: DEFAULT_EDGE_THRESHOLD_DEGREES,
        }
    }
}

/// A built tolerance ring
#[derive(Debug, Clone)]
pub struct ToleranceRing {
    pub params: RingParams,
    /// Annular profile in the XY plane
    pub profile: Shape,
    /// Solid extruded along +Z, in part coordinates
    pub mesh: TriangleMesh,
    /// Crease and boundary edges of `mesh`
    pub edges: LineSegments,
    /// Places the part upright on the `y = 0` ground plane
    pub transform: Transform3D,
}

impl ToleranceRing {
    /// Build the ring described by `params`
    pub fn build(params: &RingParams, options: &RingOptions) -> Result<Self> {
        params.validate()?;
        if options.bore_segments < 3 {
            return Err(Error::InvalidData(format!(
                "Bore needs at least 3 segments, got {}",
                options.bore_segments
            )));
        }

        let outer = outer_loop(params.outer_radius(), params.wave_count);
        let clearance = outer.min_distance_to(&Point2f::origin());
        if clearance <= params.bore_radius() + BORE_CLEARANCE {
            return Err(Error::InvalidData(format!(
                "Wavy outer boundary of {} comes within {:.3} mm of the axis, inside the {:.3} mm bore radius",
                params.part_id,
                clearance,
                params.bore_radius()
            )));
        }

        let bore = Polygon2::new(circle(params.bore_radius(), options.bore_segments));
        let profile = Shape::new(outer, vec![bore]);
        let extrude = ExtrudeOptions {
            depth: params.width,
            steps: options.extrude_steps,
        };
        let mesh = extrude_shape(&profile, &extrude)?;
        let edges = edges_geometry(&mesh, options.edge_threshold_degrees);

        info!(
            part = %params.part_id,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            edges = edges.segment_count(),
            "built tolerance ring"
        );

        Ok(Self {
            params: params.clone(),
            profile,
            mesh,
            edges,
            // Extrusion axis +Z becomes +Y; the lower face lands on y = 0
            transform: Transform3D::rotation_x(-FRAC_PI_2),
        })
    }

    /// Build with default tessellation
    pub fn from_params(params: &RingParams) -> Result<Self> {
        Self::build(params, &RingOptions::default())
    }

    /// The solid with its placement applied
    pub fn world_mesh(&self) -> TriangleMesh {
        self.mesh.transformed(&self.transform)
    }

    /// The edge overlay with its placement applied
    pub fn world_edges(&self) -> LineSegments {
        self.edges.transformed(&self.transform)
    }

    /// Largest radius reached by the outer boundary
    pub fn max_radius(&self) -> f32 {
        self.profile
            .outer
            .points
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ringcrate_core::Drawable;

    #[test]
    fn test_default_ring_builds() {
        let ring = ToleranceRing::from_params(&RingParams::default()).unwrap();
        assert!(ring.mesh.indices_valid());
        assert!(ring.mesh.signed_volume() > 0.0);
        assert!(!ring.edges.is_empty());
    }

    #[test]
    fn test_world_placement() {
        let params = RingParams::default();
        let ring = ToleranceRing::from_params(&params).unwrap();
        let (min, max) = ring.world_mesh().bounding_box();
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(max.y, params.width, epsilon = 1e-4);
    }

    #[test]
    fn test_thin_wall_is_rejected() {
        // Wave amplitude exceeds the wall thickness
        let params = RingParams::new("TR-THIN", 20.0, 5.0, 0.3, 24);
        let err = ToleranceRing::from_params(&params).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_too_few_bore_segments() {
        let options = RingOptions { bore_segments: 2, ..Default::default() };
        assert!(ToleranceRing::build(&RingParams::default(), &options).is_err());
    }
}
