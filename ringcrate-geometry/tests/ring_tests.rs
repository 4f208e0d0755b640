//! Integration tests for ringcrate-geometry
//!
//! These tests build complete tolerance rings and check the solid, the
//! overlay and the sampled boundary together.

use approx::assert_relative_eq;
use ringcrate_core::{lift, Drawable, Point3f, RingParams, TriangleMesh};
use ringcrate_geometry::*;
use std::collections::HashMap;

/// Count how many faces use each undirected edge
fn edge_usage(mesh: &TriangleMesh) -> HashMap<(usize, usize), usize> {
    let mut usage = HashMap::new();
    for face in &mesh.faces {
        for i in 0..3 {
            let a = face[i];
            let b = face[(i + 1) % 3];
            *usage.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }
    usage
}

#[test]
fn test_ring_is_closed_manifold() {
    for waves in [18, 24, 36, 60] {
        let params = RingParams::new("TR-CLOSED", 30.0, 8.0, 2.0, waves);
        let ring = ToleranceRing::from_params(&params).unwrap();
        let usage = edge_usage(&ring.mesh);
        assert!(
            usage.values().all(|&count| count == 2),
            "ring with {} waves has open or non-manifold edges",
            waves
        );
    }
}

#[test]
fn test_ring_volume_matches_profile() {
    let params = RingParams::default();
    let ring = ToleranceRing::from_params(&params).unwrap();
    let expected = ring.profile.area() * params.width;
    assert_relative_eq!(ring.mesh.signed_volume(), expected, max_relative = 1e-3);
    // Placement is a rotation, so the volume is preserved
    assert_relative_eq!(ring.world_mesh().signed_volume(), expected, max_relative = 1e-3);
}

#[test]
fn test_ring_face_budget() {
    let params = RingParams::default();
    let options = RingOptions { bore_segments: 48, extrude_steps: 2, ..Default::default() };
    let ring = ToleranceRing::build(&params, &options).unwrap();

    let outer = ring.profile.outer.len();
    let bore = ring.profile.holes[0].len();
    let loop_vertices = outer + bore;
    // Caps: loop_vertices triangles each; walls: two per edge per step
    assert_eq!(ring.mesh.face_count(), 2 * loop_vertices + 2 * 2 * loop_vertices);
    assert_eq!(ring.mesh.vertex_count(), 3 * loop_vertices);
}

#[test]
fn test_overlay_contains_cap_outlines() {
    let params = RingParams::default();
    let ring = ToleranceRing::from_params(&params).unwrap();
    let segments: Vec<(Point3f, Point3f)> = ring.edges.segments().map(|(a, b)| (*a, *b)).collect();
    let close = |p: &Point3f, q: &Point3f| (p - q).norm() < 1e-4;

    for outline in ring.profile.loops() {
        for (p, q) in outline.edges() {
            for z in [0.0, params.width] {
                let (a, b) = (lift(p, z), lift(q, z));
                assert!(
                    segments
                        .iter()
                        .any(|(s, e)| (close(s, &a) && close(e, &b)) || (close(s, &b) && close(e, &a))),
                    "missing outline edge {:?} -> {:?}",
                    a,
                    b
                );
            }
        }
    }

    let (min, max) = ring.edges.bounding_box();
    assert_relative_eq!(min.z, 0.0);
    assert_relative_eq!(max.z, params.width);
}

#[test]
fn test_outer_boundary_reaches_wave_peaks() {
    let params = RingParams::default();
    let ring = ToleranceRing::from_params(&params).unwrap();
    assert!(ring.max_radius() <= params.outer_radius() + WAVE_AMPLITUDE + 1e-4);
    assert!(ring.max_radius() > params.outer_radius());
}

#[test]
fn test_boundary_reproducible_across_builds() {
    let params = RingParams::default();
    let a = ToleranceRing::from_params(&params).unwrap();
    let b = ToleranceRing::from_params(&params).unwrap();
    assert_eq!(a.mesh.vertices, b.mesh.vertices);
    assert_eq!(a.mesh.faces, b.mesh.faces);
}
