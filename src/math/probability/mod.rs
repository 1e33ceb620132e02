pub mod covariance;
pub mod kernel;
pub mod noise;
pub mod sampler;

pub use covariance::{
    ColoringFactor, Covariance, CovarianceBuilder, CovarianceOperator, CovarianceRepr,
    build_covariance,
};
pub use kernel::{CovarianceKernel, RbfKernel};
pub use sampler::{SampledField, Sampler, sample};
