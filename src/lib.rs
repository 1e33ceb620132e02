//! Geodesic-prior segmentation sampling.
//!
//! Aus einem Intensitätsbild und einer Referenzmaske entsteht eine geodätische
//! Distanzkarte `D`; ein RBF-Kernel über dem Gitter definiert eine Kovarianz `C`
//! (dicht oder als Kronecker-Produkt pro Achse). Jedes Sample ist
//! `S = D + L·ε` mit `L·Lᵀ = C` und vom Aufrufer geliefertem Rauschen `ε`;
//! `S > 0` ergibt eine Segmentierungsvariante.
//!
//! ```no_run
//! use gpssi::prelude::*;
//! use rand::SeedableRng;
//!
//! # fn main() -> GpssiResult<()> {
//! let grid = Grid::new([32, 32])?;
//! let image = Image::filled(grid.clone(), 0.0);
//! let mut mask = Mask::filled(grid.clone(), false);
//! mask.set(&[16, 16], true);
//!
//! let map = GeodesicDistance::new(GeodesicConfig::default())?.compute_signed(&image, &mask)?;
//! let kernel = RbfKernel::new(4.0, 3.0)?;
//! let covariance = CovarianceBuilder::new(grid.clone()).build(&kernel);
//! let sampler = Sampler::new(&covariance)?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let noise = standard_normal(&mut rng, grid.len());
//! let sample = sampler.sample(&map, &noise)?.to_mask();
//! # let _ = sample;
//! # Ok(())
//! # }
//! ```

pub mod math;

pub use math::prelude;
pub use math::{GpssiError, GpssiResult};
