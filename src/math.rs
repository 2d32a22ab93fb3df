//! Geometric types used by the mesh.
//!
//! All of them are `f32` based `cgmath` types. The mesh only needs a small
//! part of linear algebra: averaging points and applying 4x4 transformation
//! matrices to them.

use cgmath::prelude::*;


pub type Point3 = cgmath::Point3<f32>;
pub type Vector3 = cgmath::Vector3<f32>;
pub type Matrix4 = cgmath::Matrix4<f32>;
pub type Quaternion = cgmath::Quaternion<f32>;


/// Applies the homogeneous transformation `matrix` to `point`.
#[inline]
pub fn transform_point(matrix: &Matrix4, point: Point3) -> Point3 {
    matrix.transform_point(point)
}

/// Returns the arithmetic mean of all given points, or `None` if the iterator
/// is empty.
pub fn centroid(points: impl IntoIterator<Item = Point3>) -> Option<Point3> {
    let mut sum = Vector3::new(0.0, 0.0, 0.0);
    let mut count = 0u32;
    for p in points {
        sum += p.to_vec();
        count += 1;
    }

    if count == 0 {
        None
    } else {
        Some(Point3::from_vec(sum / count as f32))
    }
}

/// Center, rotation and scale describing a selection, as used by
/// manipulator widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterRotationScale {
    pub center: Point3,
    pub rotation: Quaternion,
    pub scale: Vector3,
}

impl CenterRotationScale {
    /// Identity rotation and unit scale around the given center.
    pub fn around(center: Point3) -> Self {
        Self {
            center,
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}


#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cgmath::Rad;

    use super::*;

    #[test]
    fn centroid_of_nothing() {
        assert_eq!(centroid(vec![]), None);
    }

    #[test]
    fn centroid_of_points() {
        let c = centroid(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 3.0, -3.0),
        ]);
        assert_relative_eq!(c.unwrap(), Point3::new(1.0, 1.0, -1.0));
    }

    #[test]
    fn transform_translation_and_rotation() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(
            transform_point(&m, Point3::new(1.0, 1.0, 1.0)),
            Point3::new(2.0, 3.0, 4.0)
        );

        let m = Matrix4::from_angle_z(Rad(std::f32::consts::FRAC_PI_2));
        assert_relative_eq!(
            transform_point(&m, Point3::new(1.0, 0.0, 0.0)),
            Point3::new(0.0, 1.0, 0.0),
            epsilon = 1e-6
        );
    }
}
