// src/math/probability/kernel/rbf.rs

use crate::math::error::{GpssiError, GpssiResult};
use crate::math::probability::kernel::traits::CovarianceKernel;
use crate::math::utils::{comparison, constants};
use serde::{Deserialize, Serialize};

/// Gaußscher (RBF) Kovarianzkernel:
/// `k(d) = w0 · exp(-d² / (2 · w1²)) + eps · [d == 0]`.
///
/// `w0` skaliert die Varianz des Feldes, `w1` ist die Korrelationslänge in
/// physikalischen Einheiten, `eps` ein Nugget auf der Diagonalen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RbfParams")]
pub struct RbfKernel {
    w0: f64,
    w1: f64,
    eps: f64,
}

#[derive(Deserialize)]
struct RbfParams {
    w0: f64,
    w1: f64,
    #[serde(default = "default_eps")]
    eps: f64,
}

fn default_eps() -> f64 {
    constants::DEFAULT_KERNEL_EPS
}

impl TryFrom<RbfParams> for RbfKernel {
    type Error = GpssiError;

    fn try_from(params: RbfParams) -> GpssiResult<Self> {
        RbfKernel::new(params.w0, params.w1)?.with_eps(params.eps)
    }
}

impl RbfKernel {
    /// Erstellt einen Kernel mit Standard-Nugget (`1e-5`).
    pub fn new(w0: f64, w1: f64) -> GpssiResult<Self> {
        if !comparison::is_positive_finite(w0) {
            return Err(GpssiError::invalid_config(format!(
                "RBF amplitude w0 must be finite and > 0, got {}",
                w0
            )));
        }
        if !comparison::is_positive_finite(w1) {
            return Err(GpssiError::invalid_config(format!(
                "RBF length scale w1 must be finite and > 0, got {}",
                w1
            )));
        }
        Ok(Self {
            w0,
            w1,
            eps: constants::DEFAULT_KERNEL_EPS,
        })
    }

    /// Setzt das Nugget. `eps = 0` ist erlaubt, kann aber die Faktorisierung scheitern lassen.
    pub fn with_eps(mut self, eps: f64) -> GpssiResult<Self> {
        if !eps.is_finite() || eps < 0.0 {
            return Err(GpssiError::invalid_config(format!(
                "RBF nugget eps must be finite and >= 0, got {}",
                eps
            )));
        }
        self.eps = eps;
        Ok(self)
    }

    pub fn w0(&self) -> f64 {
        self.w0
    }

    pub fn w1(&self) -> f64 {
        self.w1
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    #[inline]
    fn correlation(&self, distance: f64) -> f64 {
        (-(distance * distance) / (2.0 * self.w1 * self.w1)).exp()
    }
}

impl CovarianceKernel for RbfKernel {
    fn evaluate(&self, distance: f64) -> f64 {
        let base = self.w0 * self.correlation(distance);
        if distance == 0.0 { base + self.eps } else { base }
    }

    /// `w0^(1/n) · exp(-δ² / (2·w1²))` plus ein Achsen-Nugget auf der Diagonalen.
    ///
    /// Das Achsen-Nugget `(w0+eps)^(1/n) − w0^(1/n)` sorgt dafür, dass das
    /// Kronecker-Produkt auf der Diagonalen exakt `w0 + eps` ergibt. Abseits der
    /// Diagonalen weicht das Produkt um O(eps) vom vollen Kernel ab; für `eps = 0`
    /// ist die Zerlegung exakt.
    fn axis_factor(&self, axis_distance: f64, ndim: usize) -> f64 {
        let root = 1.0 / ndim.max(1) as f64;
        let scale = self.w0.powf(root);
        let base = scale * self.correlation(axis_distance);
        if axis_distance == 0.0 {
            base + ((self.w0 + self.eps).powf(root) - scale)
        } else {
            base
        }
    }

    fn is_exactly_separable(&self) -> bool {
        self.eps == 0.0
    }

    fn amplitude(&self) -> f64 {
        self.w0
    }

    fn nugget(&self) -> f64 {
        self.eps
    }

    fn kernel_type(&self) -> &'static str {
        "RbfKernel"
    }
}
