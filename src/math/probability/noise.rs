// src/math/probability/noise.rs

use rand::Rng;
use rand_distr::StandardNormal;

/// Zieht `len` unabhängige standardnormalverteilte Werte aus einem vom
/// Aufrufer gehaltenen Generator. Die Bibliothek selbst erzeugt nie Zufall.
pub fn standard_normal<R: Rng>(rng: &mut R, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.sample(StandardNormal)).collect()
}
