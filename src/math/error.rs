// src/math/error.rs
use crate::math::probability::covariance::CovarianceRepr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GpssiError {
    #[error("Shape mismatch for {what}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Unsupported grid dimensionality: {dims} (supported: {supported})")]
    InvalidDimensionality { dims: usize, supported: &'static str },

    #[error("Invalid spacing on axis {axis}: {value} (must be finite and > 0)")]
    InvalidSpacing { axis: usize, value: f64 },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Unknown covariance representation '{tag}' (expected 'full' or 'kron')")]
    UnknownRepresentation { tag: String },

    #[error("Cholesky factorization failed for {representation} covariance{}", axis_suffix(.axis))]
    FactorizationFailed {
        representation: CovarianceRepr,
        axis: Option<usize>,
    },
}

fn axis_suffix(axis: &Option<usize>) -> String {
    match axis {
        Some(axis) => format!(" (axis {})", axis),
        None => String::new(),
    }
}

impl GpssiError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type GpssiResult<T> = Result<T, GpssiError>;
