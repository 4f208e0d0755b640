//! Reference geometry: ground grid and coordinate axes

use ringcrate_core::{Color, LineSegments, Point3f};

/// Square grid in the XZ plane at `y = 0`, centred on the origin
///
/// Produces `divisions + 1` lines along each axis. When `divisions` is even
/// the two lines through the origin use `center_color`.
pub fn grid_helper(size: f32, divisions: u32, center_color: Color, grid_color: Color) -> LineSegments {
    let divisions = divisions.max(1);
    let center = divisions / 2;
    let step = size / divisions as f32;
    let half = size / 2.0;

    let mut lines = LineSegments::with_colors();
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if i == center && divisions % 2 == 0 { center_color } else { grid_color };
        lines.push_segment(Point3f::new(-half, 0.0, k), Point3f::new(half, 0.0, k), Some(color));
        lines.push_segment(Point3f::new(k, 0.0, -half), Point3f::new(k, 0.0, half), Some(color));
    }
    lines
}

/// Three segments of length `size` along +X, +Y and +Z, colored red, green and blue
pub fn axes_helper(size: f32) -> LineSegments {
    let mut lines = LineSegments::with_colors();
    let origin = Point3f::origin();
    lines.push_segment(origin, Point3f::new(size, 0.0, 0.0), Some(Color::RED));
    lines.push_segment(origin, Point3f::new(0.0, size, 0.0), Some(Color::GREEN));
    lines.push_segment(origin, Point3f::new(0.0, 0.0, size), Some(Color::BLUE));
    lines
}
