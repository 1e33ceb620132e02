// src/math/probability/covariance/mod.rs

pub mod builder;
pub mod dense;
pub mod kronecker;
pub mod operator;

pub use self::builder::{CovarianceBuilder, build_covariance};
pub use self::dense::DenseCovariance;
pub use self::kronecker::KroneckerCovariance;
pub use self::operator::{ColoringFactor, CovarianceOperator, CovarianceRepr};

use crate::math::error::GpssiResult;
use crate::math::types::Grid;
use nalgebra::DMatrix;

/// Ergebnis des `CovarianceBuilder`: eine der beiden Darstellungen.
/// Unveränderlich; kann für beliebig viele Samples wiederverwendet werden.
#[derive(Debug, Clone, PartialEq)]
pub enum Covariance {
    Full(DenseCovariance),
    Kron(KroneckerCovariance),
}

impl Covariance {
    fn operator(&self) -> &dyn CovarianceOperator {
        match self {
            Covariance::Full(dense) => dense,
            Covariance::Kron(kron) => kron,
        }
    }
}

impl CovarianceOperator for Covariance {
    fn grid(&self) -> &Grid {
        self.operator().grid()
    }

    fn representation(&self) -> CovarianceRepr {
        self.operator().representation()
    }

    fn matvec(&self, x: &[f64]) -> GpssiResult<Vec<f64>> {
        self.operator().matvec(x)
    }

    fn to_dense(&self) -> DMatrix<f64> {
        self.operator().to_dense()
    }

    fn factorize(&self) -> GpssiResult<Box<dyn ColoringFactor>> {
        self.operator().factorize()
    }
}
