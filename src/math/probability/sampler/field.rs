// src/math/probability/sampler/field.rs

use crate::math::scalar_field::ScalarField;
use crate::math::types::{Grid, Mask, Volume};

/// Distanzkarte plus gefärbtes Rauschen, eine neue Instanz pro Sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledField {
    field: Volume<f64>,
}

impl SampledField {
    pub(crate) fn new(field: Volume<f64>) -> Self {
        Self { field }
    }

    pub fn as_volume(&self) -> &Volume<f64> {
        &self.field
    }

    pub fn into_volume(self) -> Volume<f64> {
        self.field
    }

    /// Segmentierungs-Sample mit der Standardschwelle `value > 0`.
    pub fn to_mask(&self) -> Mask {
        self.threshold(0.0)
    }
}

impl ScalarField for SampledField {
    fn grid(&self) -> &Grid {
        self.field.grid()
    }

    fn values(&self) -> &[f64] {
        self.field.data()
    }
}
