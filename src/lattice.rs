//! Periodic strut lattices.
//!
//! A lattice tiles space with a cubic unit cell. Each topology is a short list
//! of struts between anchor points of one cell octant; folding the query point
//! into that octant (`|(c mod cell) - cell/2|` per axis) mirrors the octant
//! eight ways and repeats it in every direction.
//!
//! Strut distance is measured to the infinite line through the two anchors,
//! not to the finite segment. Existing lattice renderings depend on that, so
//! it is kept as is.

use std::fmt;
use std::str::FromStr;

use crate::error::SceneError;
use crate::frame::Frame;
use crate::math::{Vector3, TOLERANCE};

/// Strut anchors in octant coordinates (multiples of the unit cell size).
///
/// 0-7 are octant vertices, 8-19 edge centres, 20-22 the off-centre anchors
/// used by [`LatticeType::HexGrid`].
const ANCHORS: [[f64; 3]; 23] = [
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.0, 0.0],
    [0.0, 0.5, 0.0],
    [0.0, 0.0, 0.5],
    [0.5, 0.0, 0.5],
    [0.5, 0.5, 0.5],
    [0.0, 0.5, 0.5],
    [0.25, 0.0, 0.0],
    [0.5, 0.25, 0.0],
    [0.25, 0.5, 0.0],
    [0.0, 0.25, 0.0],
    [0.0, 0.0, 0.25],
    [0.5, 0.0, 0.25],
    [0.5, 0.5, 0.25],
    [0.0, 0.5, 0.25],
    [0.25, 0.0, 0.5],
    [0.5, 0.25, 0.5],
    [0.25, 0.5, 0.5],
    [0.0, 0.25, 0.5],
    [0.2, 0.0, 0.0],
    [0.0, 0.2, 0.0],
    [0.0, 0.0, 0.2],
];

const BIGX: &[(usize, usize)] = &[(0, 6)];
const GRID: &[(usize, usize)] = &[(6, 2), (6, 5), (6, 7)];
const STAR: &[(usize, usize)] = &[(6, 2), (6, 5), (6, 7), (0, 6)];
const CROSS: &[(usize, usize)] = &[(1, 6), (3, 6), (4, 6)];
const OCTAGON: &[(usize, usize)] = &[(1, 3), (3, 4), (4, 1)];
const OCTET: &[(usize, usize)] = &[(1, 6), (3, 6), (4, 6), (1, 3), (3, 4), (4, 1)];
const VINTILE: &[(usize, usize)] = &[(8, 13), (13, 17), (17, 18), (18, 15), (15, 11), (11, 8)];
const DUAL: &[(usize, usize)] = &[(0, 1), (0, 3), (0, 4)];
const INTERLOCK: &[(usize, usize)] = &[(6, 2), (6, 5), (6, 7), (0, 1), (0, 3), (0, 4)];
const ISOTROP: &[(usize, usize)] = &[(0, 1), (2, 1), (5, 1), (7, 1), (3, 7), (6, 7), (4, 7)];
const HEXGRID: &[(usize, usize)] = &[(6, 20), (6, 21), (6, 22)];

/// The named strut topologies, in index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LatticeType {
    BigX,
    Grid,
    Star,
    Cross,
    Octagon,
    Octet,
    Vintile,
    Dual,
    Interlock,
    Isotrop,
    HexGrid,
}

impl LatticeType {
    pub const ALL: [LatticeType; 11] = [
        LatticeType::BigX,
        LatticeType::Grid,
        LatticeType::Star,
        LatticeType::Cross,
        LatticeType::Octagon,
        LatticeType::Octet,
        LatticeType::Vintile,
        LatticeType::Dual,
        LatticeType::Interlock,
        LatticeType::Isotrop,
        LatticeType::HexGrid,
    ];

    /// Look up a topology by index. Out-of-range indices are clamped to
    /// `[0, 10]` rather than rejected.
    pub fn from_index(index: i64) -> Self {
        let last = Self::ALL.len() as i64 - 1;
        let clamped = index.clamp(0, last);
        if clamped != index {
            log::debug!("lattice type index {index} clamped to {clamped}");
        }
        Self::ALL[clamped as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            LatticeType::BigX => "bigx",
            LatticeType::Grid => "grid",
            LatticeType::Star => "star",
            LatticeType::Cross => "cross",
            LatticeType::Octagon => "octagon",
            LatticeType::Octet => "octet",
            LatticeType::Vintile => "vintile",
            LatticeType::Dual => "dual",
            LatticeType::Interlock => "interlock",
            LatticeType::Isotrop => "isotrop",
            LatticeType::HexGrid => "hexgrid",
        }
    }

    /// Struts as pairs of anchor indices.
    pub fn struts(self) -> &'static [(usize, usize)] {
        match self {
            LatticeType::BigX => BIGX,
            LatticeType::Grid => GRID,
            LatticeType::Star => STAR,
            LatticeType::Cross => CROSS,
            LatticeType::Octagon => OCTAGON,
            LatticeType::Octet => OCTET,
            LatticeType::Vintile => VINTILE,
            LatticeType::Dual => DUAL,
            LatticeType::Interlock => INTERLOCK,
            LatticeType::Isotrop => ISOTROP,
            LatticeType::HexGrid => HEXGRID,
        }
    }
}

impl fmt::Display for LatticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LatticeType {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SceneError::UnknownLatticeType(s.to_owned()))
    }
}

/// A strut lattice filling space, oriented by `frame`.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    ltype: LatticeType,
    unit_cell: f64,
    thickness: f64,
    frame: Frame,
}

impl Lattice {
    /// `unit_cell` is the cube edge length, `thickness` the strut diameter.
    pub fn new(ltype: LatticeType, unit_cell: f64, thickness: f64) -> Result<Self, SceneError> {
        if !(unit_cell.is_finite() && unit_cell > 0.0) {
            return Err(SceneError::InvalidParameter { name: "unit cell size", value: unit_cell });
        }
        if !(thickness.is_finite() && thickness >= 0.0) {
            return Err(SceneError::InvalidParameter { name: "strut thickness", value: thickness });
        }
        Ok(Self { ltype, unit_cell, thickness, frame: Frame::world_xy() })
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    pub fn ltype(&self) -> LatticeType {
        self.ltype
    }

    /// `(index, name)` of the topology.
    pub fn lattice_type(&self) -> (usize, &'static str) {
        (self.ltype.index(), self.ltype.name())
    }

    pub fn unit_cell(&self) -> f64 {
        self.unit_cell
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Signed distance at a world-space point.
    pub fn distance(&self, point: Vector3) -> f64 {
        let struts = self.scaled_struts();
        self.local_distance(self.frame.to_local(point), &struts)
    }

    /// Signed distance at many points. The strut table is scaled once and
    /// shared by all points.
    pub fn distance_batch(&self, points: &[Vector3]) -> Vec<f64> {
        let struts = self.scaled_struts();
        points
            .iter()
            .map(|&p| self.local_distance(self.frame.to_local(p), &struts))
            .collect()
    }

    /// Fold a local point into the reference octant.
    pub fn fold(&self, local: Vector3) -> Vector3 {
        let half = self.unit_cell / 2.0;
        local.map(|c| (c.rem_euclid(self.unit_cell) - half).abs())
    }

    fn scaled_struts(&self) -> Vec<(Vector3, Vector3)> {
        let anchor = |i: usize| Vector3::from(ANCHORS[i]) * self.unit_cell;
        self.ltype
            .struts()
            .iter()
            .map(|&(a, b)| (anchor(a), anchor(b)))
            .collect()
    }

    fn local_distance(&self, local: Vector3, struts: &[(Vector3, Vector3)]) -> f64 {
        let folded = self.fold(local);
        let nearest = struts
            .iter()
            .map(|&(a, b)| line_distance_squared(folded, a, b))
            .fold(f64::INFINITY, f64::min);
        nearest.sqrt() - self.thickness / 2.0
    }
}

/// Squared distance from `point` to the infinite line through `a` and `b`.
/// A zero-length strut degenerates to the distance to `a`.
fn line_distance_squared(point: Vector3, a: Vector3, b: Vector3) -> f64 {
    let v = b - a;
    let d = point - a;
    let c2 = v.dot(&v);
    if c2 < TOLERANCE {
        return d.dot(&d);
    }
    let t = d.dot(&v) / c2;
    (d - v * t).norm_squared()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_stay_in_reference_octant() {
        for a in ANCHORS {
            assert!(a.iter().all(|&c| (0.0..=0.5).contains(&c)));
        }
    }

    #[test]
    fn struts_reference_existing_anchors() {
        for t in LatticeType::ALL {
            assert!(!t.struts().is_empty());
            for &(a, b) in t.struts() {
                assert!(a < ANCHORS.len() && b < ANCHORS.len(), "{t}: ({a}, {b})");
            }
        }
    }

    #[test]
    fn index_is_clamped() {
        assert_eq!(LatticeType::from_index(-4), LatticeType::BigX);
        assert_eq!(LatticeType::from_index(10), LatticeType::HexGrid);
        assert_eq!(LatticeType::from_index(99), LatticeType::HexGrid);
        assert_eq!(LatticeType::from_index(5).index(), 5);
    }

    #[test]
    fn names_parse_back() {
        for t in LatticeType::ALL {
            assert_eq!(t.name().parse::<LatticeType>(), Ok(t));
        }
        assert!("honeycomb".parse::<LatticeType>().is_err());
    }

    #[test]
    fn line_distance_is_not_clamped_to_segment() {
        let a = Vector3::zeros();
        let b = Vector3::new(1.0, 0.0, 0.0);
        // Far beyond the segment end, yet on the line.
        assert_eq!(line_distance_squared(Vector3::new(5.0, 0.0, 0.0), a, b), 0.0);
        assert!((line_distance_squared(Vector3::new(5.0, 2.0, 0.0), a, b) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_strut_uses_point_distance() {
        let a = Vector3::new(1.0, 1.0, 1.0);
        let d = line_distance_squared(Vector3::new(1.0, 1.0, 4.0), a, a);
        assert!((d - 9.0).abs() < 1e-12);
    }

    #[test]
    fn fold_mirrors_negative_coordinates() {
        let lat = Lattice::new(LatticeType::Grid, 2.0, 0.1).unwrap();
        let f1 = lat.fold(Vector3::new(0.3, -0.3, 1.7));
        let f2 = lat.fold(Vector3::new(-0.3, 0.3, -1.7));
        assert!((f1 - f2).norm() < 1e-12);
        assert!(f1.iter().all(|&c| (0.0..=1.0).contains(&c)));
    }
}
