// src/math/geodesic/config.rs

use crate::math::error::{GpssiError, GpssiResult};
use crate::math::utils::constants;
use serde::{Deserialize, Serialize};

/// Nachbarschaft, über die der Raster-Scan Distanzen weiterreicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Nur achsenparallele Nachbarn: 4 in 2D, 6 in 3D.
    Axial,
    /// Achsenparallele und diagonale Nachbarn: 8 in 2D, 26 in 3D.
    #[default]
    Full,
}

/// Konfiguration für die geodätische Distanztransformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeodesicConfig {
    /// Gewichtung zwischen rein räumlicher Distanz (0.0) und Intensitätsdifferenz (1.0).
    pub lambda: f64,
    /// Anzahl der Durchläufe; jeder Durchlauf besteht aus einem Vorwärts- und einem Rückwärts-Scan.
    pub iterations: usize,
    pub connectivity: Connectivity,
    /// Startwert für alle Zellen ohne Saat und Obergrenze des Ergebnisses.
    /// Bei leerer Maske hat jede Zelle genau diesen Wert.
    pub sentinel: f64,
}

impl Default for GeodesicConfig {
    fn default() -> Self {
        Self {
            lambda: 0.9,
            iterations: 2,
            connectivity: Connectivity::Full,
            sentinel: constants::DEFAULT_SENTINEL,
        }
    }
}

impl GeodesicConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_sentinel(mut self, sentinel: f64) -> Self {
        self.sentinel = sentinel;
        self
    }

    pub fn validate(&self) -> GpssiResult<()> {
        if !self.lambda.is_finite() || !(0.0..=1.0).contains(&self.lambda) {
            return Err(GpssiError::invalid_config(format!(
                "lambda must lie in [0, 1], got {}",
                self.lambda
            )));
        }
        if self.iterations == 0 {
            return Err(GpssiError::invalid_config(
                "geodesic distance requires at least one iteration",
            ));
        }
        if !self.sentinel.is_finite() || self.sentinel <= 0.0 {
            return Err(GpssiError::invalid_config(format!(
                "sentinel must be finite and > 0, got {}",
                self.sentinel
            )));
        }
        Ok(())
    }
}
