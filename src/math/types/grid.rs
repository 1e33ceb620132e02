// src/math/types/grid.rs

use crate::math::error::{GpssiError, GpssiResult};
use crate::math::utils::{comparison, indexing};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximale unterstützte Achsenzahl (Bild = 2, Volumen = 3, Linie = 1).
pub const MAX_DIMS: usize = 3;

/// Regelmäßiges 1D/2D/3D-Gitter mit physikalischem Abstand pro Achse.
/// Die Zellen werden zeilenweise (row-major) indiziert: die letzte Achse läuft am schnellsten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridSpec")]
pub struct Grid {
    shape: Vec<usize>,
    spacing: Vec<f64>,
}

#[derive(Deserialize)]
struct GridSpec {
    shape: Vec<usize>,
    spacing: Option<Vec<f64>>,
}

impl TryFrom<GridSpec> for Grid {
    type Error = GpssiError;

    fn try_from(spec: GridSpec) -> GpssiResult<Self> {
        match spec.spacing {
            Some(spacing) => Grid::with_spacing(spec.shape, spacing),
            None => Grid::new(spec.shape),
        }
    }
}

impl Grid {
    /// Erstellt ein Gitter mit Einheitsabstand.
    pub fn new(shape: impl Into<Vec<usize>>) -> GpssiResult<Self> {
        let shape = shape.into();
        let spacing = vec![1.0; shape.len()];
        Self::with_spacing(shape, spacing)
    }

    /// Erstellt ein Gitter mit explizitem Abstand pro Achse.
    pub fn with_spacing(
        shape: impl Into<Vec<usize>>,
        spacing: impl Into<Vec<f64>>,
    ) -> GpssiResult<Self> {
        let shape = shape.into();
        let spacing = spacing.into();

        if shape.is_empty() || shape.len() > MAX_DIMS {
            return Err(GpssiError::InvalidDimensionality {
                dims: shape.len(),
                supported: "1, 2 or 3",
            });
        }
        if shape.iter().any(|&len| len == 0) {
            return Err(GpssiError::invalid_config(format!(
                "grid shape {:?} contains an empty axis",
                shape
            )));
        }
        if spacing.len() != shape.len() {
            return Err(GpssiError::ShapeMismatch {
                what: "spacing",
                expected: vec![shape.len()],
                actual: vec![spacing.len()],
            });
        }
        if let Some((axis, &value)) = spacing
            .iter()
            .enumerate()
            .find(|&(_, &s)| !comparison::is_positive_finite(s))
        {
            return Err(GpssiError::InvalidSpacing { axis, value });
        }

        Ok(Self { shape, spacing })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Gesamtzahl der Zellen (∏ shape).
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Ein validiertes Gitter hat nie null Zellen.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn strides(&self) -> Vec<usize> {
        indexing::row_major_strides(&self.shape)
    }

    /// Flacher Index zu Koordinaten; `None` außerhalb des Gitters.
    pub fn index_of(&self, coords: &[usize]) -> Option<usize> {
        if coords.len() != self.ndim() {
            return None;
        }
        let mut flat = 0usize;
        for (axis, &c) in coords.iter().enumerate() {
            if c >= self.shape[axis] {
                return None;
            }
            flat = flat * self.shape[axis] + c;
        }
        Some(flat)
    }

    /// Physikalische Position einer Zelle (Index · Spacing pro Achse).
    pub fn position(&self, flat: usize) -> Vec<f64> {
        let mut coords = vec![0usize; self.ndim()];
        indexing::unravel(flat, &self.shape, &mut coords);
        coords
            .iter()
            .zip(&self.spacing)
            .map(|(&c, &s)| c as f64 * s)
            .collect()
    }

    /// Volumen (bzw. Fläche/Länge) einer einzelnen Zelle.
    pub fn cell_volume(&self) -> f64 {
        self.spacing.iter().product()
    }

    /// Gleiche Form und gleicher Abstand.
    pub fn ensure_matches(&self, other: &Grid, what: &'static str) -> GpssiResult<()> {
        if self.shape != other.shape {
            return Err(GpssiError::ShapeMismatch {
                what,
                expected: self.shape.clone(),
                actual: other.shape.clone(),
            });
        }
        if let Some(axis) = (0..self.ndim()).find(|&a| self.spacing[a] != other.spacing[a]) {
            return Err(GpssiError::InvalidSpacing {
                axis,
                value: other.spacing[axis],
            });
        }
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.shape.iter().map(|d| d.to_string()).collect();
        write!(f, "{} @ {:?}", dims.join("x"), self.spacing)
    }
}
