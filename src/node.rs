//! Scene tree: a closed enum of primitives, combinators and modifiers.
//!
//! Children are held behind `Arc<Node>` so subtrees can be shared and the
//! tree is immutable once built. Every node evaluates standalone, either one
//! point at a time ([`Node::distance`]) or node-at-a-time over a whole batch
//! ([`Node::distance_batch`]); both paths apply the same kernels in the same
//! order and therefore agree exactly.

use std::sync::Arc;

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::frame::Frame;
use crate::grid::SampleGrid;
use crate::lattice::Lattice;
use crate::{csg, modifiers, primitives};

/// Points per rayon task in [`Node::distance_batch_par`].
const PAR_CHUNK: usize = 4096;

/// Finite-difference step used by [`Sdf::normal`].
pub const GRADIENT_STEP: f64 = 1e-6;

/// Trait for any object that can evaluate a signed distance.
pub trait Sdf: Send + Sync {
    fn distance(&self, point: Vector3<f64>) -> f64;

    fn distance_batch(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        points.iter().map(|&p| self.distance(p)).collect()
    }

    /// Central-difference gradient with step `h`. Not normalized; for an
    /// exact distance field its length is close to 1.
    fn gradient(&self, point: Vector3<f64>, h: f64) -> Vector3<f64> {
        let axis = |i: usize| {
            let mut e = Vector3::zeros();
            e[i] = h;
            self.distance(point + e) - self.distance(point - e)
        };
        Vector3::new(axis(0), axis(1), axis(2)) / (2.0 * h)
    }

    /// Unit outward normal, or `None` where the gradient vanishes (e.g. the
    /// center of a sphere).
    fn normal(&self, point: Vector3<f64>) -> Option<Vector3<f64>> {
        self.gradient(point, GRADIENT_STEP).try_normalize(f64::EPSILON)
    }

    /// Mean curvature `(k1 + k2) / 2` from the seven-point Laplacian with
    /// step `h`. Only meaningful on exact distance fields, where the
    /// Laplacian equals twice the mean curvature of the level set.
    fn mean_curvature(&self, point: Vector3<f64>, h: f64) -> f64 {
        let center = self.distance(point);
        let mut sum = 0.0;
        for i in 0..3 {
            let mut e = Vector3::zeros();
            e[i] = h;
            sum += self.distance(point + e) + self.distance(point - e) - 2.0 * center;
        }
        sum / (2.0 * h * h)
    }
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Leaf shapes. All but the sphere are evaluated in their own local frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Sphere at `center` with given `radius`.
    Sphere { center: Vector3<f64>, radius: f64 },

    /// Box with `half_extents` about the frame origin; edges rounded inward
    /// by `radius`.
    Box { frame: Frame, half_extents: Vector3<f64>, radius: f64 },

    /// Torus in the frame's XY plane.
    Torus { frame: Frame, major_radius: f64, minor_radius: f64 },

    /// Capped cylinder along the frame's Z axis, centered on its origin.
    Cylinder { frame: Frame, radius: f64, height: f64 },

    /// Periodic strut lattice.
    Lattice(Lattice),
}

impl Primitive {
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            Primitive::Sphere { .. } => None,
            Primitive::Box { frame, .. }
            | Primitive::Torus { frame, .. }
            | Primitive::Cylinder { frame, .. } => Some(frame),
            Primitive::Lattice(lattice) => Some(lattice.frame()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Sphere { .. } => "sphere",
            Primitive::Box { .. } => "box",
            Primitive::Torus { .. } => "torus",
            Primitive::Cylinder { .. } => "cylinder",
            Primitive::Lattice(_) => "lattice",
        }
    }
}

impl Sdf for Primitive {
    fn distance(&self, point: Vector3<f64>) -> f64 {
        match self {
            Primitive::Sphere { center, radius } => {
                primitives::sdf_sphere(point, *center, *radius)
            }
            Primitive::Box { frame, half_extents, radius } => {
                primitives::sdf_rounded_box(frame.to_local(point), *half_extents, *radius)
            }
            Primitive::Torus { frame, major_radius, minor_radius } => {
                primitives::sdf_torus(frame.to_local(point), *major_radius, *minor_radius)
            }
            Primitive::Cylinder { frame, radius, height } => {
                primitives::sdf_cylinder(frame.to_local(point), *radius, *height)
            }
            Primitive::Lattice(lattice) => lattice.distance(point),
        }
    }

    fn distance_batch(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        match self {
            Primitive::Lattice(lattice) => lattice.distance_batch(points),
            _ => points.iter().map(|&p| self.distance(p)).collect(),
        }
    }
}

impl Sdf for Lattice {
    fn distance(&self, point: Vector3<f64>) -> f64 {
        Lattice::distance(self, point)
    }

    fn distance_batch(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        Lattice::distance_batch(self, points)
    }
}

// ---------------------------------------------------------------------------
// Combinators
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CombinatorOp {
    Union,
    Intersection,
    /// Pairwise polynomial blend with radius `k`, folded left over N children.
    SmoothUnion { k: f64 },
}

impl CombinatorOp {
    /// Minimum number of children.
    pub fn min_children(self) -> usize {
        match self {
            CombinatorOp::Union | CombinatorOp::Intersection => 1,
            CombinatorOp::SmoothUnion { .. } => 2,
        }
    }

    pub fn combine(self, d1: f64, d2: f64) -> f64 {
        match self {
            CombinatorOp::Union => csg::union(d1, d2),
            CombinatorOp::Intersection => csg::intersection(d1, d2),
            CombinatorOp::SmoothUnion { k } => csg::smooth_union(d1, d2, k),
        }
    }
}

/// An operator over an ordered, non-empty list of children.
#[derive(Clone, Debug, PartialEq)]
pub struct Combinator {
    op: CombinatorOp,
    children: Vec<Arc<Node>>,
}

impl Combinator {
    /// Callers guarantee `children.len() >= op.min_children()`.
    pub(crate) fn new(op: CombinatorOp, children: Vec<Arc<Node>>) -> Self {
        debug_assert!(children.len() >= op.min_children());
        Self { op, children }
    }

    pub fn op(&self) -> CombinatorOp {
        self.op
    }

    pub fn children(&self) -> &[Arc<Node>] {
        &self.children
    }

    fn distance(&self, point: Vector3<f64>) -> f64 {
        let op = self.op;
        self.children
            .iter()
            .map(|child| child.distance(point))
            .reduce(|acc, d| op.combine(acc, d))
            .unwrap_or(f64::INFINITY)
    }

    fn distance_batch(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        let op = self.op;
        let mut children = self.children.iter();
        let Some(first) = children.next() else {
            return vec![f64::INFINITY; points.len()];
        };
        let mut acc = first.distance_batch(points);
        for child in children {
            let d = child.distance_batch(points);
            for (a, b) in acc.iter_mut().zip(d) {
                *a = op.combine(*a, b);
            }
        }
        acc
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModifierOp {
    /// Wall of `thickness`; `side` 0.5 = centered, 0 = inside, 1 = outside.
    Shell { thickness: f64, side: f64 },
    /// `count` nested walls of `thickness`, the outermost centered on the
    /// surface.
    MultiShell { thickness: f64, count: u32 },
    /// Rotate space about Z by `rate` radians per unit height.
    Twist { rate: f64 },
    /// Multiply the child's distance by a positive `factor`.
    Factor { factor: f64 },
    /// Add a product-of-sines displacement.
    Sine { amplitude: f64, frequency: f64 },
}

impl ModifierOp {
    pub fn name(self) -> &'static str {
        match self {
            ModifierOp::Shell { .. } => "shell",
            ModifierOp::MultiShell { .. } => "multishell",
            ModifierOp::Twist { .. } => "twist",
            ModifierOp::Factor { .. } => "factor",
            ModifierOp::Sine { .. } => "sine",
        }
    }

    /// Map a query point before the child sees it.
    fn warp(self, point: Vector3<f64>) -> Vector3<f64> {
        match self {
            ModifierOp::Twist { rate } => modifiers::twist(point, rate),
            _ => point,
        }
    }

    /// Map the child's distance at `point` (the unwarped query point).
    fn adjust(self, d: f64, point: Vector3<f64>) -> f64 {
        match self {
            ModifierOp::Shell { thickness, side } => modifiers::shell(d, thickness, side),
            ModifierOp::MultiShell { thickness, count } => {
                modifiers::multi_shell(d, thickness, count)
            }
            ModifierOp::Twist { .. } => d,
            ModifierOp::Factor { factor } => modifiers::factor(d, factor),
            ModifierOp::Sine { amplitude, frequency } => {
                modifiers::sine(d, point, amplitude, frequency)
            }
        }
    }
}

/// A wrapper around exactly one child.
#[derive(Clone, Debug, PartialEq)]
pub struct Modifier {
    op: ModifierOp,
    child: Arc<Node>,
}

impl Modifier {
    pub(crate) fn new(op: ModifierOp, child: Arc<Node>) -> Self {
        Self { op, child }
    }

    pub fn op(&self) -> ModifierOp {
        self.op
    }

    pub fn child(&self) -> &Arc<Node> {
        &self.child
    }

    fn distance(&self, point: Vector3<f64>) -> f64 {
        let d = self.child.distance(self.op.warp(point));
        self.op.adjust(d, point)
    }

    fn distance_batch(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        let d = match self.op {
            ModifierOp::Twist { .. } => {
                let warped: Vec<_> = points.iter().map(|&p| self.op.warp(p)).collect();
                self.child.distance_batch(&warped)
            }
            _ => self.child.distance_batch(points),
        };
        d.into_iter()
            .zip(points)
            .map(|(d, &p)| self.op.adjust(d, p))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A scene tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Primitive(Primitive),
    Combinator(Combinator),
    Modifier(Modifier),
}

impl Node {
    /// Signed distance at a single point.
    pub fn distance(&self, point: Vector3<f64>) -> f64 {
        match self {
            Node::Primitive(p) => p.distance(point),
            Node::Combinator(c) => c.distance(point),
            Node::Modifier(m) => m.distance(point),
        }
    }

    /// Signed distance at every point, evaluated one node at a time over the
    /// whole batch. `result[i] == self.distance(points[i])`.
    pub fn distance_batch(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        match self {
            Node::Primitive(p) => p.distance_batch(points),
            Node::Combinator(c) => c.distance_batch(points),
            Node::Modifier(m) => m.distance_batch(points),
        }
    }

    /// [`Node::distance_batch`] split into chunks evaluated in parallel.
    /// Output order matches `points`.
    pub fn distance_batch_par(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        points
            .par_chunks(PAR_CHUNK)
            .map(|chunk| self.distance_batch(chunk))
            .collect::<Vec<_>>()
            .concat()
    }

    /// Signed distance at every sample of `grid`, in its flat index order.
    pub fn distance_grid(&self, grid: &SampleGrid) -> Vec<f64> {
        grid.sample(self)
    }

    /// Negative or zero distance counts as inside.
    pub fn contains(&self, point: Vector3<f64>) -> bool {
        self.distance(point) <= 0.0
    }

    /// Direct children, left to right.
    pub fn children(&self) -> &[Arc<Node>] {
        match self {
            Node::Primitive(_) => &[],
            Node::Combinator(c) => c.children(),
            Node::Modifier(m) => std::slice::from_ref(m.child()),
        }
    }

    /// Lower-case variant name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Node::Primitive(p) => p.name(),
            Node::Combinator(c) => match c.op() {
                CombinatorOp::Union => "union",
                CombinatorOp::Intersection => "intersection",
                CombinatorOp::SmoothUnion { .. } => "smooth union",
            },
            Node::Modifier(m) => m.op().name(),
        }
    }

    /// Total number of nodes in this subtree, shared subtrees counted once
    /// per occurrence.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }
}

impl Sdf for Node {
    fn distance(&self, point: Vector3<f64>) -> f64 {
        Node::distance(self, point)
    }

    fn distance_batch(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        Node::distance_batch(self, points)
    }
}

impl From<Primitive> for Node {
    fn from(p: Primitive) -> Self {
        Node::Primitive(p)
    }
}

impl From<Lattice> for Node {
    fn from(lattice: Lattice) -> Self {
        Node::Primitive(Primitive::Lattice(lattice))
    }
}
