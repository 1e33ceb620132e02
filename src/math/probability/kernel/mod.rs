// src/math/probability/kernel/mod.rs
pub mod heuristics;
pub mod rbf;
pub mod traits;

pub use self::rbf::RbfKernel;
pub use self::traits::CovarianceKernel;
