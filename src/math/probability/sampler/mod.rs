// src/math/probability/sampler/mod.rs

pub mod field;

pub use self::field::SampledField;

use crate::math::error::{GpssiError, GpssiResult};
use crate::math::geodesic::DistanceMap;
use crate::math::probability::covariance::{ColoringFactor, CovarianceOperator, CovarianceRepr};
use crate::math::scalar_field::ScalarField;
use crate::math::types::{Grid, Volume};
use rayon::prelude::*;
use tracing::{debug, info};

/// Zieht Segmentierungsfelder `S = D + L·ε` zu einer festen Kovarianz.
///
/// Die Zerlegung wird einmal beim Erzeugen berechnet und für alle Samples
/// wiederverwendet. Zufall kommt ausschließlich über das übergebene Rauschen `ε`.
#[derive(Debug)]
pub struct Sampler {
    grid: Grid,
    factor: Box<dyn ColoringFactor>,
}

impl Sampler {
    pub fn new<C: CovarianceOperator + ?Sized>(covariance: &C) -> GpssiResult<Self> {
        let factor = covariance.factorize()?;
        info!(
            "Sampler ready: {} covariance on {}",
            factor.representation(),
            covariance.grid()
        );
        Ok(Self {
            grid: covariance.grid().clone(),
            factor,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn representation(&self) -> CovarianceRepr {
        self.factor.representation()
    }

    /// Nur das gefärbte Rauschen `L·ε`, ohne Distanzkarte.
    pub fn colored_noise(&self, noise: &[f64]) -> GpssiResult<Vec<f64>> {
        self.factor.color(noise)
    }

    pub fn sample(&self, map: &DistanceMap, noise: &[f64]) -> GpssiResult<SampledField> {
        if map.grid().shape() != self.grid.shape() {
            return Err(GpssiError::ShapeMismatch {
                what: "distance map",
                expected: self.grid.shape().to_vec(),
                actual: map.grid().shape().to_vec(),
            });
        }
        let colored = self.factor.color(noise)?;
        let data = map
            .values()
            .iter()
            .zip(&colored)
            .map(|(&d, &z)| d + z)
            .collect();
        Ok(SampledField::new(Volume::from_parts(map.grid().clone(), data)))
    }

    /// Ein Sample pro Rauschvektor, in Eingabereihenfolge.
    /// Der erste fehlerhafte Vektor bricht ab.
    pub fn sample_many(
        &self,
        map: &DistanceMap,
        noises: &[Vec<f64>],
    ) -> GpssiResult<Vec<SampledField>> {
        debug!("Drawing {} samples on {}", noises.len(), self.grid);
        noises
            .par_iter()
            .map(|noise| self.sample(map, noise))
            .collect()
    }
}

/// Einmaliges Sample: zerlegt die Kovarianz bei jedem Aufruf neu.
/// Für mehrere Samples `Sampler` verwenden.
pub fn sample<C: CovarianceOperator + ?Sized>(
    map: &DistanceMap,
    covariance: &C,
    noise: &[f64],
) -> GpssiResult<SampledField> {
    Sampler::new(covariance)?.sample(map, noise)
}
