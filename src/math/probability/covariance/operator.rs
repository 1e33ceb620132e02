// src/math/probability/covariance/operator.rs

use crate::math::error::{GpssiError, GpssiResult};
use crate::math::types::Grid;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Darstellung der räumlichen Kovarianz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CovarianceRepr {
    /// Dichte (M×M)-Matrix über alle Zellen. O(M²) Speicher, nur für kleine Gitter.
    Full,
    /// Eine dichte Matrix pro Achse; die volle Matrix ist ihr Kronecker-Produkt.
    #[default]
    Kron,
}

impl fmt::Display for CovarianceRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CovarianceRepr::Full => write!(f, "full"),
            CovarianceRepr::Kron => write!(f, "kron"),
        }
    }
}

impl FromStr for CovarianceRepr {
    type Err = GpssiError;

    fn from_str(tag: &str) -> GpssiResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(CovarianceRepr::Full),
            "kron" => Ok(CovarianceRepr::Kron),
            _ => Err(GpssiError::UnknownRepresentation {
                tag: tag.to_string(),
            }),
        }
    }
}

/// Gemeinsame Fähigkeiten beider Kovarianzdarstellungen.
///
/// Der Sampler arbeitet nur gegen diesen Trait und kennt die Darstellung nicht.
/// Operatoren sind nach dem Bau unveränderlich und dürfen parallel gelesen werden.
pub trait CovarianceOperator: Send + Sync + fmt::Debug {
    fn grid(&self) -> &Grid;

    fn representation(&self) -> CovarianceRepr;

    /// Zeilen- bzw. Spaltenzahl der (gedachten) vollen Matrix.
    fn cell_count(&self) -> usize {
        self.grid().len()
    }

    /// `C · x`
    fn matvec(&self, x: &[f64]) -> GpssiResult<Vec<f64>>;

    /// `xᵀ · C · x`
    fn quadratic_form(&self, x: &[f64]) -> GpssiResult<f64> {
        let cx = self.matvec(x)?;
        Ok(x.iter().zip(&cx).map(|(a, b)| a * b).sum())
    }

    /// Materialisiert die volle Matrix. Für `Kron` nur zu Prüfzwecken auf kleinen Gittern.
    fn to_dense(&self) -> DMatrix<f64>;

    /// Cholesky-Zerlegung. Scheitert sie, ist der Kernel falsch konfiguriert (fatal).
    fn factorize(&self) -> GpssiResult<Box<dyn ColoringFactor>>;
}

/// Wurzelfaktor `L` mit `L · Lᵀ = C`, angewendet auf Standardnormal-Rauschen.
pub trait ColoringFactor: Send + Sync + fmt::Debug {
    fn representation(&self) -> CovarianceRepr;

    fn cell_count(&self) -> usize;

    /// Farbiges Rauschen `z = L · noise`.
    fn color(&self, noise: &[f64]) -> GpssiResult<Vec<f64>>;
}

pub(crate) fn ensure_len(what: &'static str, expected: usize, actual: usize) -> GpssiResult<()> {
    if expected != actual {
        return Err(GpssiError::ShapeMismatch {
            what,
            expected: vec![expected],
            actual: vec![actual],
        });
    }
    Ok(())
}
