use cgmath::prelude::*;
use cgmath::{Point3, Quaternion, Rad};

/// Point at `from`'s own height below/above `target`, so facing it only yaws.
pub fn flat_look_target(from: Point3<f32>, target: Point3<f32>) -> Point3<f32> {
    Point3::new(target.x, from.y, target.z)
}

/// Rotation about +Y that turns the +Z forward axis from `from` towards
/// `target` on the horizontal plane. Identity when the two coincide.
pub fn look_at_yaw(from: Point3<f32>, target: Point3<f32>) -> Quaternion<f32> {
    let direction = flat_look_target(from, target) - from;
    if direction.magnitude2() <= f32::EPSILON {
        return Quaternion::one();
    }
    Quaternion::from_angle_y(Rad(direction.x.atan2(direction.z)))
}
