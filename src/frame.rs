//! Rigid local coordinate frames.
//!
//! A [`Frame`] is an origin plus an orthonormal, right-handed basis. Shapes
//! that carry a frame are evaluated in its local space: the query point is
//! mapped through the inverse transform first, which preserves distances.

use crate::error::FrameError;
use crate::math::{Matrix3, Matrix4, Vector3, TOLERANCE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    origin: Vector3,
    xaxis: Vector3,
    yaxis: Vector3,
    zaxis: Vector3,
}

impl Default for Frame {
    fn default() -> Self {
        Self::world_xy()
    }
}

impl Frame {
    /// Build a frame from an origin and two (not necessarily orthogonal)
    /// axis directions. `xaxis` keeps its direction; `yaxis` is
    /// re-orthogonalized against it.
    pub fn new(origin: Vector3, xaxis: Vector3, yaxis: Vector3) -> Result<Self, FrameError> {
        let xlen = xaxis.norm();
        if xlen < TOLERANCE || yaxis.norm() < TOLERANCE {
            return Err(FrameError::ZeroAxis);
        }
        let x = xaxis / xlen;
        let z = x.cross(&yaxis);
        let zlen = z.norm();
        if zlen < TOLERANCE {
            return Err(FrameError::ParallelAxes);
        }
        let z = z / zlen;
        let y = z.cross(&x);
        Ok(Self { origin, xaxis: x, yaxis: y, zaxis: z })
    }

    /// The world frame: origin at zero, axes X and Y.
    pub fn world_xy() -> Self {
        Self {
            origin: Vector3::zeros(),
            xaxis: Vector3::x(),
            yaxis: Vector3::y(),
            zaxis: Vector3::z(),
        }
    }

    /// Frame whose local Z is the plane normal.
    ///
    /// The in-plane X axis is the longest of the three vectors
    /// `(-n.y, n.x, 0)`, `(0, -n.z, n.y)`, `(n.z, 0, -n.x)`, the first one on
    /// a tie. A plane with normal +Z therefore gets X = -Y and Y = +X, the
    /// same axes existing shaders were fed for tori and cylinders.
    pub fn from_plane(point: Vector3, normal: Vector3) -> Result<Self, FrameError> {
        let nlen = normal.norm();
        if nlen < TOLERANCE {
            return Err(FrameError::ZeroAxis);
        }
        let n = normal / nlen;

        let candidates = [
            Vector3::new(-n.y, n.x, 0.0),
            Vector3::new(0.0, -n.z, n.y),
            Vector3::new(n.z, 0.0, -n.x),
        ];
        let mut xaxis = candidates[0];
        for c in &candidates[1..] {
            if c.norm() > xaxis.norm() {
                xaxis = *c;
            }
        }
        Self::new(point, xaxis, n.cross(&xaxis))
    }

    pub fn origin(&self) -> Vector3 {
        self.origin
    }

    pub fn xaxis(&self) -> Vector3 {
        self.xaxis
    }

    pub fn yaxis(&self) -> Vector3 {
        self.yaxis
    }

    pub fn zaxis(&self) -> Vector3 {
        self.zaxis
    }

    /// Rotation part: columns are the local axes in world coordinates.
    pub fn rotation(&self) -> Matrix3 {
        Matrix3::from_columns(&[self.xaxis, self.yaxis, self.zaxis])
    }

    /// Local → world affine transform.
    pub fn matrix(&self) -> Matrix4 {
        let mut m = self.rotation().to_homogeneous();
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.origin);
        m
    }

    /// World → local affine transform. Exact for rigid frames: `[Rᵀ | −Rᵀo]`.
    pub fn inverse_matrix(&self) -> Matrix4 {
        let rt = self.rotation().transpose();
        let mut m = rt.to_homogeneous();
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&(-(rt * self.origin)));
        m
    }

    /// Map a world-space point into this frame.
    pub fn to_local(&self, point: Vector3) -> Vector3 {
        let p = point - self.origin;
        Vector3::new(p.dot(&self.xaxis), p.dot(&self.yaxis), p.dot(&self.zaxis))
    }

    /// Map a local point back to world space.
    pub fn to_world(&self, local: Vector3) -> Vector3 {
        self.origin + self.xaxis * local.x + self.yaxis * local.y + self.zaxis * local.z
    }
}
