use nalgebra::{Vector2, Vector3};

/// Signed distance to a sphere.
/// Negative inside, zero on surface, positive outside.
pub fn sdf_sphere(point: Vector3<f64>, center: Vector3<f64>, radius: f64) -> f64 {
    (point - center).norm() - radius
}

/// Signed distance to an axis-aligned box centered at the origin.
/// `half_extents` is the half-size in each dimension.
pub fn sdf_box(point: Vector3<f64>, half_extents: Vector3<f64>) -> f64 {
    let d = point.abs() - half_extents;
    let outside = Vector3::new(d.x.max(0.0), d.y.max(0.0), d.z.max(0.0)).norm();
    let inside = d.x.max(d.y).max(d.z).min(0.0);
    outside + inside
}

/// Signed distance to a box with rounded edges, centered at the origin.
///
/// Unlike an offset box, the outer extent stays `half_extents`: the edges are
/// rounded inward by `radius`. The radius is clamped to
/// `[0, min(half_extents)]`, so `radius = 0` is exactly [`sdf_box`].
pub fn sdf_rounded_box(point: Vector3<f64>, half_extents: Vector3<f64>, radius: f64) -> f64 {
    let r = radius.clamp(0.0, half_extents.min().max(0.0));
    sdf_box(point, half_extents - Vector3::repeat(r)) - r
}

/// Signed distance to a torus centered at the origin, ring in the XY plane.
/// `major_radius` is the distance from center to the tube center,
/// `minor_radius` is the tube radius.
pub fn sdf_torus(point: Vector3<f64>, major_radius: f64, minor_radius: f64) -> f64 {
    let q = Vector2::new(point.xy().norm() - major_radius, point.z);
    q.norm() - minor_radius
}

/// Signed distance to a capped cylinder centered at the origin, axis along Z.
/// The cylinder spans `height / 2` above and below the XY plane.
pub fn sdf_cylinder(point: Vector3<f64>, radius: f64, height: f64) -> f64 {
    let d_radial = point.xy().norm() - radius;
    let d_axial = point.z.abs() - height / 2.0;
    if d_radial > 0.0 && d_axial > 0.0 {
        (d_radial * d_radial + d_axial * d_axial).sqrt()
    } else {
        d_radial.max(d_axial)
    }
}
