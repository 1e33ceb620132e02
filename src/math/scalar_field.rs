// src/math/scalar_field.rs

use crate::math::types::{Grid, Mask, Volume};

/// Trait für ein reellwertiges Skalarfeld über einem `Grid`.
/// Distanzkarte, gesampeltes Feld und Intensitätsbild teilen sich damit
/// Zugriff, Extremwerte und Schwellwertbildung.
pub trait ScalarField {
    fn grid(&self) -> &Grid;

    /// Rohdaten in row-major Reihenfolge.
    fn values(&self) -> &[f64];

    /// Wert an einer Koordinate, `None` außerhalb des Gitters.
    fn value_at(&self, coords: &[usize]) -> Option<f64> {
        self.grid()
            .index_of(coords)
            .and_then(|i| self.values().get(i).copied())
    }

    fn max_value(&self) -> f64 {
        self.values().iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    fn min_value(&self) -> f64 {
        self.values().iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Binäre Maske aller Zellen mit `value > level`.
    ///
    /// Konvention: Vordergrund ist strikt größer als die Schwelle. Bei der
    /// vorzeichenbehafteten Distanzkarte (positiv innen) ist `level = 0.0`
    /// die natürliche Wahl.
    fn threshold(&self, level: f64) -> Mask {
        Volume::from_parts(
            self.grid().clone(),
            self.values().iter().map(|&v| v > level).collect(),
        )
    }
}

impl ScalarField for Volume<f64> {
    fn grid(&self) -> &Grid {
        Volume::grid(self)
    }

    fn values(&self) -> &[f64] {
        self.data()
    }
}
