// src/math/utils.rs

/// Numerische Konstanten
pub mod constants {
    /// Startwert für Zellen ohne Saat bei der geodätischen Distanz.
    pub const DEFAULT_SENTINEL: f64 = 1.0e10;
    /// Standard-Nugget des RBF-Kernels.
    pub const DEFAULT_KERNEL_EPS: f64 = 1e-5;
    /// Ab dieser Zellenzahl warnt der Builder bei dichter (full) Kovarianz. 4096² f64 = 128 MiB.
    pub const DENSE_CELL_WARNING: usize = 4096;
    pub const PI: f64 = std::f64::consts::PI;
}

/// Wertebereichsprüfungen
pub mod comparison {
    /// Strikt positiv und endlich (Spacing, Längenskalen)
    pub fn is_positive_finite(value: f64) -> bool {
        value.is_finite() && value > 0.0
    }
}

/// Index-Hilfen für zeilenweise (row-major) abgelegte N-D-Gitter
pub mod indexing {
    /// Strides für row-major Ablage: letzte Achse läuft am schnellsten.
    pub fn row_major_strides(shape: &[usize]) -> Vec<usize> {
        let mut strides = vec![1usize; shape.len()];
        for axis in (0..shape.len().saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * shape[axis + 1];
        }
        strides
    }

    /// Zerlegt einen flachen Index in Koordinaten.
    pub fn unravel(mut flat: usize, shape: &[usize], out: &mut [usize]) {
        for axis in (0..shape.len()).rev() {
            out[axis] = flat % shape[axis];
            flat /= shape[axis];
        }
    }
}
