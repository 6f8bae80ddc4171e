//! Single-child modifiers.
//!
//! Each modifier either rewrites the child's distance value, or rewrites the
//! query point before the child is evaluated (twist).

use nalgebra::Vector3;

/// Shell (thin wall) of total `thickness` around the child's surface.
///
/// `side` places the wall: `0.5` centers it on the surface (`|d| - t/2`),
/// `0.0` puts it entirely inside the original solid, `1.0` entirely outside.
/// Intermediate values slide the wall linearly.
pub fn shell(d: f64, thickness: f64, side: f64) -> f64 {
    (d - (side - 0.5) * thickness).abs() - thickness / 2.0
}

/// `count` nested walls of `thickness`, evenly spaced `2 * thickness` apart.
///
/// The outermost wall is centered on the child's surface like a centered
/// [`shell`]; the others step inward, so the gaps between walls are as wide
/// as the walls. `count = 1` is exactly a centered shell. Callers guarantee
/// `thickness > 0` and `count >= 1`.
pub fn multi_shell(d: f64, thickness: f64, count: u32) -> f64 {
    let pitch = 2.0 * thickness;
    let last = f64::from(count.saturating_sub(1));
    let wall = (-d / pitch).round().clamp(0.0, last);
    (d + wall * pitch).abs() - thickness / 2.0
}

/// Twist space around the Z axis by `rate` radians per unit of height.
/// Applied to the query point before the child is evaluated.
pub fn twist(point: Vector3<f64>, rate: f64) -> Vector3<f64> {
    let (s, c) = (point.z * rate).sin_cos();
    Vector3::new(point.x * c - point.y * s, point.x * s + point.y * c, point.z)
}

/// Scale the child's distance. Keeps the zero set; `factor` must be positive.
pub fn factor(d: f64, factor: f64) -> f64 {
    d * factor
}

/// Sine displacement: `d + amplitude * sin(fx) * sin(fy) * sin(fz)`.
/// The result stays within `amplitude` of the child's distance.
pub fn sine(d: f64, point: Vector3<f64>, amplitude: f64, frequency: f64) -> f64 {
    let p = point * frequency;
    d + amplitude * p.x.sin() * p.y.sin() * p.z.sin()
}
