//! Structured sampling grids.
//!
//! A [`SampleGrid`] is a regular lattice of sample points; sampling an SDF
//! over it is parallelized with rayon.

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::node::Sdf;

/// A regular 3D grid of sample points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleGrid {
    /// World-space position of sample `[0, 0, 0]`.
    pub origin: Vector3<f64>,
    /// Distance between neighbouring samples along each axis.
    pub spacing: f64,
    /// Number of samples along each axis `[nx, ny, nz]`.
    pub resolution: [usize; 3],
}

impl SampleGrid {
    pub fn new(origin: Vector3<f64>, spacing: f64, resolution: [usize; 3]) -> Self {
        Self { origin, spacing, resolution }
    }

    /// Grid spanning `[min, max]` with `samples` points per axis, both
    /// corners included. Uses the x extent for the spacing.
    pub fn spanning(min: Vector3<f64>, max: Vector3<f64>, samples: usize) -> Self {
        let spacing = if samples > 1 { (max.x - min.x) / (samples - 1) as f64 } else { 0.0 };
        let extent = max - min;
        let count = |e: f64| {
            if spacing > 0.0 {
                (e / spacing).round() as usize + 1
            } else {
                1
            }
        };
        Self::new(min, spacing, [samples.max(1), count(extent.y), count(extent.z)])
    }

    pub fn len(&self) -> usize {
        self.resolution.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of sample `(ix, iy, iz)`: row-major `[x][y][z]`.
    pub fn index_of(&self, ix: usize, iy: usize, iz: usize) -> usize {
        let [_, ny, nz] = self.resolution;
        ix * ny * nz + iy * nz + iz
    }

    /// World-space position of sample `(ix, iy, iz)`.
    pub fn point(&self, ix: usize, iy: usize, iz: usize) -> Vector3<f64> {
        self.origin + Vector3::new(ix as f64, iy as f64, iz as f64) * self.spacing
    }

    fn point_at(&self, idx: usize) -> Vector3<f64> {
        let [_, ny, nz] = self.resolution;
        self.point(idx / (ny * nz), (idx / nz) % ny, idx % nz)
    }

    /// All sample points in flat index order.
    pub fn points(&self) -> Vec<Vector3<f64>> {
        (0..self.len()).map(|idx| self.point_at(idx)).collect()
    }

    /// Evaluate `sdf` at every sample, in flat index order.
    pub fn sample<S: Sdf + ?Sized>(&self, sdf: &S) -> Vec<f64> {
        (0..self.len())
            .into_par_iter()
            .map(|idx| sdf.distance(self.point_at(idx)))
            .collect()
    }
}
