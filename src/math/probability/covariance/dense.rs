// src/math/probability/covariance/dense.rs

use crate::math::error::{GpssiError, GpssiResult};
use crate::math::probability::covariance::operator::{
    ColoringFactor, CovarianceOperator, CovarianceRepr, ensure_len,
};
use crate::math::probability::kernel::CovarianceKernel;
use crate::math::types::Grid;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use tracing::debug;

/// Volle, dichte Kovarianzmatrix über alle Zellen (flacher row-major Index).
#[derive(Debug, Clone, PartialEq)]
pub struct DenseCovariance {
    grid: Grid,
    matrix: DMatrix<f64>,
}

impl DenseCovariance {
    /// Wertet den Kernel auf allen paarweisen (spacing-gewichteten) Abständen aus.
    pub fn from_kernel<K: CovarianceKernel + ?Sized>(grid: &Grid, kernel: &K) -> Self {
        let n = grid.len();
        let positions: Vec<Vec<f64>> = (0..n).map(|i| grid.position(i)).collect();

        // Spaltenweise befüllen (nalgebra ist column-major); jede Spalte gehört genau einem Task.
        let mut data = vec![0.0; n * n];
        data.par_chunks_mut(n).enumerate().for_each(|(j, column)| {
            let pj = &positions[j];
            for (i, entry) in column.iter_mut().enumerate() {
                let d_sq: f64 = positions[i]
                    .iter()
                    .zip(pj)
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                *entry = kernel.evaluate(d_sq.sqrt());
            }
        });

        Self {
            grid: grid.clone(),
            matrix: DMatrix::from_vec(n, n, data),
        }
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

impl CovarianceOperator for DenseCovariance {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn representation(&self) -> CovarianceRepr {
        CovarianceRepr::Full
    }

    fn matvec(&self, x: &[f64]) -> GpssiResult<Vec<f64>> {
        ensure_len("covariance operand", self.cell_count(), x.len())?;
        let y = &self.matrix * DVector::from_column_slice(x);
        Ok(y.as_slice().to_vec())
    }

    fn to_dense(&self) -> DMatrix<f64> {
        self.matrix.clone()
    }

    fn factorize(&self) -> GpssiResult<Box<dyn ColoringFactor>> {
        debug!("Cholesky of dense {}x{} covariance", self.matrix.nrows(), self.matrix.ncols());
        let cholesky = self
            .matrix
            .clone()
            .cholesky()
            .ok_or(GpssiError::FactorizationFailed {
                representation: CovarianceRepr::Full,
                axis: None,
            })?;
        Ok(Box::new(DenseColoring {
            lower: cholesky.l(),
        }))
    }
}

/// Unterer Cholesky-Faktor der vollen Matrix.
#[derive(Debug, Clone)]
pub struct DenseColoring {
    lower: DMatrix<f64>,
}

impl ColoringFactor for DenseColoring {
    fn representation(&self) -> CovarianceRepr {
        CovarianceRepr::Full
    }

    fn cell_count(&self) -> usize {
        self.lower.nrows()
    }

    fn color(&self, noise: &[f64]) -> GpssiResult<Vec<f64>> {
        ensure_len("noise vector", self.cell_count(), noise.len())?;
        let z = &self.lower * DVector::from_column_slice(noise);
        Ok(z.as_slice().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::probability::kernel::RbfKernel;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_two_cell_line() {
        let grid = Grid::new([2]).unwrap();
        let kernel = RbfKernel::new(1.0, 1.0).unwrap().with_eps(1e-6).unwrap();
        let cov = DenseCovariance::from_kernel(&grid, &kernel);
        let m = cov.matrix();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m[(0, 1)], m[(1, 0)]);
        assert_abs_diff_eq!(m[(0, 0)], 1.0 + 1e-6, epsilon = 1e-15);
        assert_abs_diff_eq!(m[(1, 1)], 1.0 + 1e-6, epsilon = 1e-15);
        assert_relative_eq!(m[(0, 1)], kernel.evaluate(1.0), max_relative = 1e-15);
        assert!(m[(0, 1)] < m[(0, 0)]);
    }

    #[test]
    fn test_symmetric_with_anisotropic_spacing() {
        let grid = Grid::with_spacing([3, 2], [0.5, 2.0]).unwrap();
        let kernel = RbfKernel::new(2.0, 1.5).unwrap();
        let m = DenseCovariance::from_kernel(&grid, &kernel).to_dense();
        assert_eq!(m, m.transpose());
        // Zelle 0 = (0,0), Zelle 2 = (1,0): Abstand 0.5 entlang Achse 0.
        assert_relative_eq!(m[(0, 2)], kernel.evaluate(0.5), max_relative = 1e-15);
        // Zelle 1 = (0,1): Abstand 2.0 entlang Achse 1.
        assert_relative_eq!(m[(0, 1)], kernel.evaluate(2.0), max_relative = 1e-15);
    }

    #[test]
    fn test_cholesky_reconstructs_matrix() {
        let grid = Grid::new([3, 3]).unwrap();
        let kernel = RbfKernel::new(1.5, 1.0).unwrap().with_eps(1e-4).unwrap();
        let cov = DenseCovariance::from_kernel(&grid, &kernel);
        let factor = cov.factorize().unwrap();
        assert_eq!(factor.representation(), CovarianceRepr::Full);

        // Spalten von L über Einheitsvektoren rekonstruieren.
        let n = grid.len();
        let mut lower = DMatrix::<f64>::zeros(n, n);
        for j in 0..n {
            let mut e = vec![0.0; n];
            e[j] = 1.0;
            let column = factor.color(&e).unwrap();
            lower.set_column(j, &DVector::from_vec(column));
        }
        let rebuilt = &lower * lower.transpose();
        assert_relative_eq!(rebuilt, cov.to_dense(), epsilon = 1e-12);
    }

    #[test]
    fn test_factorization_failure_is_reported() {
        // Indefinit: Eigenwerte 3 und -1.
        let cov = DenseCovariance {
            grid: Grid::new([2]).unwrap(),
            matrix: DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]),
        };
        assert_eq!(
            cov.factorize().unwrap_err(),
            GpssiError::FactorizationFailed {
                representation: CovarianceRepr::Full,
                axis: None
            }
        );
    }

    #[test]
    fn test_matvec_rejects_wrong_length() {
        let grid = Grid::new([2, 2]).unwrap();
        let cov = DenseCovariance::from_kernel(&grid, &RbfKernel::new(1.0, 1.0).unwrap());
        assert!(matches!(
            cov.matvec(&[1.0, 2.0]),
            Err(GpssiError::ShapeMismatch { .. })
        ));
    }
}
