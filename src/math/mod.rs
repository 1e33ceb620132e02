pub mod error;
pub mod geodesic;
pub mod probability;
pub mod scalar_field;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{GpssiError, GpssiResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        error::{GpssiError, GpssiResult},
        geodesic::{Connectivity, DistanceMap, GeodesicConfig, GeodesicDistance, geodesic_map},
        probability::{
            covariance::*,
            kernel::{CovarianceKernel, RbfKernel, heuristics},
            noise::standard_normal,
            sampler::{SampledField, Sampler, sample},
        },
        scalar_field::ScalarField,
        types::*,
    };
}
