// src/math/probability/covariance/kronecker.rs

use crate::math::error::{GpssiError, GpssiResult};
use crate::math::probability::covariance::operator::{
    ColoringFactor, CovarianceOperator, CovarianceRepr, ensure_len,
};
use crate::math::probability::kernel::CovarianceKernel;
use crate::math::types::Grid;
use nalgebra::DMatrix;
use rayon::prelude::*;
use tracing::debug;

/// Separable Kovarianz: `C = A₀ ⊗ A₁ (⊗ A₂)`, eine dichte Matrix pro Achse.
///
/// Die volle Matrix wird nie gebildet; Bau und Speicher kosten O(Σ nₐ²).
/// Für Kernel, die nicht exakt separabel sind (z.B. RBF mit Nugget), ist das
/// Produkt eine Näherung, siehe `CovarianceKernel::axis_factor`.
#[derive(Debug, Clone, PartialEq)]
pub struct KroneckerCovariance {
    grid: Grid,
    axes: Vec<DMatrix<f64>>,
}

impl KroneckerCovariance {
    pub fn from_kernel<K: CovarianceKernel + ?Sized>(grid: &Grid, kernel: &K) -> Self {
        let ndim = grid.ndim();
        let axes = grid
            .shape()
            .iter()
            .zip(grid.spacing())
            .map(|(&len, &spacing)| {
                DMatrix::from_fn(len, len, |i, j| {
                    let delta = (i as f64 - j as f64).abs() * spacing;
                    kernel.axis_factor(delta, ndim)
                })
            })
            .collect();
        Self {
            grid: grid.clone(),
            axes,
        }
    }

    /// Die Achsenmatrizen in Achsenreihenfolge (Achse 0 = langsamste).
    pub fn axis_matrices(&self) -> &[DMatrix<f64>] {
        &self.axes
    }
}

impl CovarianceOperator for KroneckerCovariance {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn representation(&self) -> CovarianceRepr {
        CovarianceRepr::Kron
    }

    fn matvec(&self, x: &[f64]) -> GpssiResult<Vec<f64>> {
        ensure_len("covariance operand", self.cell_count(), x.len())?;
        Ok(kron_matvec(&self.axes, self.grid.shape(), x))
    }

    fn to_dense(&self) -> DMatrix<f64> {
        let mut axes = self.axes.iter();
        let first = match axes.next() {
            Some(first) => first.clone(),
            None => return DMatrix::zeros(0, 0),
        };
        axes.fold(first, |acc, axis| acc.kronecker(axis))
    }

    fn factorize(&self) -> GpssiResult<Box<dyn ColoringFactor>> {
        let mut factors = Vec::with_capacity(self.axes.len());
        for (axis, matrix) in self.axes.iter().enumerate() {
            debug!("Cholesky of kron axis {} ({}x{})", axis, matrix.nrows(), matrix.ncols());
            let cholesky =
                matrix
                    .clone()
                    .cholesky()
                    .ok_or(GpssiError::FactorizationFailed {
                        representation: CovarianceRepr::Kron,
                        axis: Some(axis),
                    })?;
            factors.push(cholesky.l());
        }
        Ok(Box::new(KroneckerColoring {
            shape: self.grid.shape().to_vec(),
            factors,
        }))
    }
}

/// `L = L₀ ⊗ L₁ (⊗ L₂)` aus den Achsen-Cholesky-Faktoren; `L·Lᵀ = ⊗(Lₐ·Lₐᵀ) = C`.
#[derive(Debug, Clone)]
pub struct KroneckerColoring {
    shape: Vec<usize>,
    factors: Vec<DMatrix<f64>>,
}

impl ColoringFactor for KroneckerColoring {
    fn representation(&self) -> CovarianceRepr {
        CovarianceRepr::Kron
    }

    fn cell_count(&self) -> usize {
        self.shape.iter().product()
    }

    fn color(&self, noise: &[f64]) -> GpssiResult<Vec<f64>> {
        ensure_len("noise vector", self.cell_count(), noise.len())?;
        Ok(kron_matvec(&self.factors, &self.shape, noise))
    }
}

/// `(M₀ ⊗ … ⊗ Mₖ) · x` für row-major `x` über `shape`, ohne das Produkt zu bilden.
///
/// Nacheinander wird jede Achse mit ihrer Matrix multipliziert (Modenprodukt).
/// Jedes Ausgabeelement wird von genau einem Task mit fester Summationsreihenfolge berechnet.
pub(crate) fn kron_matvec(matrices: &[DMatrix<f64>], shape: &[usize], x: &[f64]) -> Vec<f64> {
    let mut current = x.to_vec();
    for (axis, matrix) in matrices.iter().enumerate() {
        current = mode_product(&current, shape, axis, matrix);
    }
    current
}

fn mode_product(x: &[f64], shape: &[usize], axis: usize, matrix: &DMatrix<f64>) -> Vec<f64> {
    let len = shape[axis];
    let inner: usize = shape[axis + 1..].iter().product();
    let block = len * inner;
    let mut out = vec![0.0; x.len()];

    // Ein Task pro Ausgabezeile (Block, Zeile), auch für Achse 0 mit nur einem Block.
    out.par_chunks_mut(inner)
        .enumerate()
        .for_each(|(chunk, out_row)| {
            let row = chunk % len;
            let in_block = &x[(chunk / len) * block..][..block];
            for (i, out_value) in out_row.iter_mut().enumerate() {
                let mut acc = 0.0;
                for k in 0..len {
                    acc += matrix[(row, k)] * in_block[k * inner + i];
                }
                *out_value = acc;
            }
        });
    out
}
