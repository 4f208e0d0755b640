//! Point types and related functionality

use nalgebra::{Point2, Point3, Vector2, Vector3};

/// A 2D point with floating point coordinates, used for profiles
pub type Point2f = Point2<f32>;

/// A 2D vector with floating point components
pub type Vector2f = Vector2<f32>;

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Lift a profile point onto the plane `z = depth`
pub fn lift(point: &Point2f, depth: f32) -> Point3f {
    Point3f::new(point.x, point.y, depth)
}

/// Component-wise minimum and maximum of a set of points
pub fn bounds<'a, I>(points: I) -> Option<(Point3f, Point3f)>
where
    I: IntoIterator<Item = &'a Point3f>,
{
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    let mut min = first;
    let mut max = first;

    for p in iter {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);

        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }

    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_of_empty_set() {
        let points: Vec<Point3f> = Vec::new();
        assert!(bounds(&points).is_none());
    }

    #[test]
    fn test_bounds() {
        let points = vec![
            Point3f::new(1.0, -2.0, 0.5),
            Point3f::new(-1.0, 4.0, 0.0),
            Point3f::new(0.0, 0.0, 3.0),
        ];
        let (min, max) = bounds(&points).unwrap();
        assert_eq!(min, Point3f::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Point3f::new(1.0, 4.0, 3.0));
    }
}
