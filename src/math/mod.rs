//! Linear algebra type aliases and geometric tolerances.

pub type Vector3 = nalgebra::Vector3<f64>;
pub type Matrix3 = nalgebra::Matrix3<f64>;
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Length below which an axis or strut direction counts as degenerate.
pub const TOLERANCE: f64 = 1e-12;

/// Flatten a 4×4 matrix row by row (`m00, m01, .., m33`).
pub fn row_major(m: &Matrix4) -> [f64; 16] {
    let mut out = [0.0; 16];
    for r in 0..4 {
        for c in 0..4 {
            out[r * 4 + c] = m[(r, c)];
        }
    }
    out
}

/// Round `value` to `decimals` places.
///
/// Works on the exact decimal expansion of `value`, with ties to even, so
/// `2.675` (stored just below the tie) becomes `2.67` and `0.125` becomes
/// `0.12`. Scaling by a power of ten first would round both up.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    format!("{:.*}", decimals as usize, value).parse().unwrap_or(value)
}
