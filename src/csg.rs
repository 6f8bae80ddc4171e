//! Pairwise combinators on distance values.
//!
//! Combinator nodes fold these over their children left to right, so an
//! N-ary node is a chain of the binary form. Union and intersection keep
//! the shader's accumulator semantics: `min` seeded with a large positive
//! value and `max` seeded with a large negative one.

/// Distance to the union of two shapes.
pub fn union(d1: f64, d2: f64) -> f64 {
    d1.min(d2)
}

/// Distance to the common part of two shapes. Exact inside, a lower bound
/// outside.
pub fn intersection(d1: f64, d2: f64) -> f64 {
    d1.max(d2)
}

/// Smooth (polynomial) union with blending radius `k`.
///
/// Never larger than `union(d1, d2)`, and at most `k / 4` below it, with the
/// deepest dip where `d1 == d2`. Outside the band `|d1 - d2| < k` it equals
/// the sharp union. `k <= 0` degenerates to a sharp union.
pub fn smooth_union(d1: f64, d2: f64, k: f64) -> f64 {
    if k <= 0.0 {
        return union(d1, d2);
    }
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    d2 * (1.0 - h) + d1 * h - k * h * (1.0 - h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_union_zero_radius_is_sharp() {
        assert_eq!(smooth_union(0.3, -0.2, 0.0), -0.2);
        assert_eq!(smooth_union(0.3, -0.2, -1.0), -0.2);
    }

    #[test]
    fn smooth_union_max_dip_is_quarter_radius() {
        let d = smooth_union(1.0, 1.0, 0.8);
        assert!((d - (1.0 - 0.2)).abs() < 1e-12);
    }

    #[test]
    fn smooth_union_outside_band_is_sharp() {
        assert_eq!(smooth_union(5.0, 1.0, 0.5), 1.0);
        assert_eq!(smooth_union(-3.0, 2.0, 0.5), -3.0);
    }
}
