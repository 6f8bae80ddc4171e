//! Scene tree construction.
//!
//! These constructors are the only way to build combinators and modifiers,
//! so every node holds at least the children its variant needs.
//!
//! # Example
//!
//! ```rust
//! use volsdf::{Frame, Node};
//! use nalgebra::Vector3;
//!
//! let frame = Frame::from_plane(Vector3::new(0.0, 0.0, 2.0), Vector3::x()).unwrap();
//! let part = Node::union(
//!     Node::sphere(Vector3::zeros(), 5.0),
//!     Node::cylinder(1.0, 12.0).with_frame(frame),
//! );
//! let walled = Node::shell(part, 0.4, 0.5);
//! assert!(walled.distance(Vector3::new(5.0, 0.0, 0.0)) < 0.0);
//! ```

use std::sync::Arc;

use nalgebra::Vector3;

use crate::error::SceneError;
use crate::frame::Frame;
use crate::lattice::{Lattice, LatticeType};
use crate::node::{Combinator, CombinatorOp, Modifier, ModifierOp, Node, Primitive};
use crate::translator::NodeKind;

// ---------------------------------------------------------------------------
// Primitives (frame-bearing shapes start in the world frame)
// ---------------------------------------------------------------------------

impl Node {
    /// Sphere at `center`.
    pub fn sphere(center: Vector3<f64>, radius: f64) -> Self {
        Primitive::Sphere { center, radius }.into()
    }

    /// Box with the given half-extents.
    pub fn cuboid(half_extents: Vector3<f64>) -> Self {
        Self::rounded_cuboid(half_extents, 0.0)
    }

    /// Box with the given half-extents whose edges are rounded by `radius`.
    pub fn rounded_cuboid(half_extents: Vector3<f64>, radius: f64) -> Self {
        Primitive::Box { frame: Frame::world_xy(), half_extents, radius }.into()
    }

    /// Torus about the local Z axis.
    pub fn torus(major_radius: f64, minor_radius: f64) -> Self {
        Primitive::Torus { frame: Frame::world_xy(), major_radius, minor_radius }.into()
    }

    /// Capped cylinder along the local Z axis, `height` in total.
    pub fn cylinder(radius: f64, height: f64) -> Self {
        Primitive::Cylinder { frame: Frame::world_xy(), radius, height }.into()
    }

    /// Strut lattice; `ltype` is clamped to the valid type range.
    pub fn lattice(ltype: i64, unit_cell: f64, thickness: f64) -> Result<Self, SceneError> {
        Ok(Lattice::new(LatticeType::from_index(ltype), unit_cell, thickness)?.into())
    }

    /// Place a primitive in `frame`.
    ///
    /// Frame-bearing primitives take `frame` as their local frame; a sphere
    /// has its center mapped from `frame` to world space. Combinators and
    /// modifiers carry no frame and are returned unchanged.
    pub fn with_frame(self, frame: Frame) -> Self {
        let Node::Primitive(primitive) = self else {
            return self;
        };
        let placed = match primitive {
            Primitive::Sphere { center, radius } => {
                Primitive::Sphere { center: frame.to_world(center), radius }
            }
            Primitive::Box { half_extents, radius, .. } => {
                Primitive::Box { frame, half_extents, radius }
            }
            Primitive::Torus { major_radius, minor_radius, .. } => {
                Primitive::Torus { frame, major_radius, minor_radius }
            }
            Primitive::Cylinder { radius, height, .. } => {
                Primitive::Cylinder { frame, radius, height }
            }
            Primitive::Lattice(lattice) => Primitive::Lattice(lattice.with_frame(frame)),
        };
        placed.into()
    }
}

// ---------------------------------------------------------------------------
// Combinators
// ---------------------------------------------------------------------------

impl Node {
    /// Boolean union of two shapes.
    pub fn union(a: impl Into<Arc<Node>>, b: impl Into<Arc<Node>>) -> Self {
        Self::pair(CombinatorOp::Union, a, b)
    }

    /// Boolean intersection of two shapes.
    pub fn intersection(a: impl Into<Arc<Node>>, b: impl Into<Arc<Node>>) -> Self {
        Self::pair(CombinatorOp::Intersection, a, b)
    }

    /// Smooth union of two shapes with blend radius `k`.
    pub fn smooth_union(a: impl Into<Arc<Node>>, b: impl Into<Arc<Node>>, k: f64) -> Self {
        Self::pair(CombinatorOp::SmoothUnion { k }, a, b)
    }

    /// Union of one or more shapes.
    pub fn union_all<I>(children: I) -> Result<Self, SceneError>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Node>>,
    {
        Self::list(CombinatorOp::Union, children)
    }

    /// Intersection of one or more shapes. A single child is returned as is
    /// by evaluation (identity).
    pub fn intersection_all<I>(children: I) -> Result<Self, SceneError>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Node>>,
    {
        Self::list(CombinatorOp::Intersection, children)
    }

    /// Smooth union of two or more shapes, blended pairwise left to right.
    pub fn smooth_union_all<I>(children: I, k: f64) -> Result<Self, SceneError>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Node>>,
    {
        Self::list(CombinatorOp::SmoothUnion { k }, children)
    }

    fn pair(op: CombinatorOp, a: impl Into<Arc<Node>>, b: impl Into<Arc<Node>>) -> Self {
        Node::Combinator(Combinator::new(op, vec![a.into(), b.into()]))
    }

    fn list<I>(op: CombinatorOp, children: I) -> Result<Self, SceneError>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Node>>,
    {
        let children: Vec<Arc<Node>> = children.into_iter().map(Into::into).collect();
        let required = op.min_children();
        if children.len() < required {
            return Err(SceneError::TooFewChildren {
                kind: NodeKind::from(op),
                required,
                actual: children.len(),
            });
        }
        Ok(Node::Combinator(Combinator::new(op, children)))
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

impl Node {
    /// Hollow `child` into a wall of `thickness`. `side` is 0.5 for a wall
    /// centered on the surface, 0 for inside, 1 for outside.
    pub fn shell(child: impl Into<Arc<Node>>, thickness: f64, side: f64) -> Self {
        Self::wrap(ModifierOp::Shell { thickness, side }, child)
    }

    /// `count` nested walls of `thickness`, the outermost centered on
    /// `child`'s surface and each next one `2 * thickness` further in.
    pub fn multi_shell(
        child: impl Into<Arc<Node>>,
        thickness: f64,
        count: u32,
    ) -> Result<Self, SceneError> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(SceneError::InvalidParameter { name: "wall thickness", value: thickness });
        }
        if count == 0 {
            return Err(SceneError::InvalidParameter { name: "wall count", value: 0.0 });
        }
        Ok(Self::wrap(ModifierOp::MultiShell { thickness, count }, child))
    }

    /// Twist `child` about Z by `rate` radians per unit height.
    pub fn twist(child: impl Into<Arc<Node>>, rate: f64) -> Self {
        Self::wrap(ModifierOp::Twist { rate }, child)
    }

    /// Scale `child`'s distance values by a positive `factor`.
    pub fn factor(child: impl Into<Arc<Node>>, factor: f64) -> Result<Self, SceneError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(SceneError::InvalidParameter { name: "distance factor", value: factor });
        }
        Ok(Self::wrap(ModifierOp::Factor { factor }, child))
    }

    /// Displace `child`'s surface by `amplitude * sin(fx) sin(fy) sin(fz)`.
    pub fn sine(child: impl Into<Arc<Node>>, amplitude: f64, frequency: f64) -> Self {
        Self::wrap(ModifierOp::Sine { amplitude, frequency }, child)
    }

    fn wrap(op: ModifierOp, child: impl Into<Arc<Node>>) -> Self {
        Node::Modifier(Modifier::new(op, child.into()))
    }
}
