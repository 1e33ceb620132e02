// src/math/probability/covariance/builder.rs

use crate::math::error::GpssiResult;
use crate::math::probability::covariance::{
    Covariance, CovarianceRepr, dense::DenseCovariance, kronecker::KroneckerCovariance,
};
use crate::math::probability::kernel::CovarianceKernel;
use crate::math::types::Grid;
use crate::math::utils::constants;
use tracing::{info, warn};

/// Builder für Kovarianzoperatoren über einem Gitter.
#[derive(Debug, Clone)]
pub struct CovarianceBuilder {
    grid: Grid,
    representation: CovarianceRepr,
}

impl CovarianceBuilder {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            representation: CovarianceRepr::default(),
        }
    }

    pub fn representation(mut self, representation: CovarianceRepr) -> Self {
        self.representation = representation;
        self
    }

    /// Baut den Operator. Symmetrie und PSD folgen aus der Kernelfamilie und
    /// werden hier nicht erneut geprüft.
    pub fn build<K: CovarianceKernel + ?Sized>(&self, kernel: &K) -> Covariance {
        let cells = self.grid.len();
        match self.representation {
            CovarianceRepr::Full => {
                if cells > constants::DENSE_CELL_WARNING {
                    warn!(
                        "Dense covariance over {} cells needs {} MiB; consider 'kron'",
                        cells,
                        cells * cells * std::mem::size_of::<f64>() / (1024 * 1024)
                    );
                }
                info!(
                    "Building full covariance on {} with {} ({}x{})",
                    self.grid,
                    kernel.kernel_type(),
                    cells,
                    cells
                );
                Covariance::Full(DenseCovariance::from_kernel(&self.grid, kernel))
            }
            CovarianceRepr::Kron => {
                if !kernel.is_exactly_separable() {
                    info!(
                        "{} is not exactly separable; kron covariance is an approximation",
                        kernel.kernel_type()
                    );
                }
                info!(
                    "Building kron covariance on {} with {} (axis sizes {:?})",
                    self.grid,
                    kernel.kernel_type(),
                    self.grid.shape()
                );
                Covariance::Kron(KroneckerCovariance::from_kernel(&self.grid, kernel))
            }
        }
    }
}

/// Kurzform: `build(grid_shape, kernel, representation, spacing?)`.
///
/// `representation` ist der Tag `"full"` oder `"kron"`; ohne `spacing` gilt Einheitsabstand.
pub fn build_covariance<K: CovarianceKernel + ?Sized>(
    shape: &[usize],
    kernel: &K,
    representation: &str,
    spacing: Option<&[f64]>,
) -> GpssiResult<Covariance> {
    let representation: CovarianceRepr = representation.parse()?;
    let grid = match spacing {
        Some(spacing) => Grid::with_spacing(shape.to_vec(), spacing.to_vec())?,
        None => Grid::new(shape.to_vec())?,
    };
    Ok(CovarianceBuilder::new(grid)
        .representation(representation)
        .build(kernel))
}
