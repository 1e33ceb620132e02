// src/math/probability/kernel/traits.rs

/// Trait für stationäre, radiale Kovarianzfunktionen `k(d)`.
///
/// `d` ist der euklidische (spacing-gewichtete) Abstand zweier Gitterpunkte.
/// Implementierungen müssen für `d = 0` endlich sein, monoton fallen und
/// für große `d` gegen 0 gehen.
pub trait CovarianceKernel: Send + Sync + std::fmt::Debug {
    /// Kovarianz für den Abstand `distance`.
    fn evaluate(&self, distance: f64) -> f64;

    /// Vektorisierte Auswertung über paarweise Abstände.
    fn evaluate_many(&self, distances: &[f64]) -> Vec<f64> {
        distances.iter().map(|&d| self.evaluate(d)).collect()
    }

    /// Faktor einer Achse für die separable (Kronecker-)Darstellung in `ndim` Dimensionen.
    /// Das Produkt der Achsenfaktoren soll `evaluate` für das gleiche Abstandstupel
    /// wiedergeben bzw. annähern.
    fn axis_factor(&self, axis_distance: f64, ndim: usize) -> f64;

    /// `true`, wenn das Produkt der Achsenfaktoren exakt `evaluate` ergibt.
    fn is_exactly_separable(&self) -> bool {
        false
    }

    /// Maximalwert der Kovarianz abseits der Diagonale (`w0`).
    fn amplitude(&self) -> f64;

    /// Zusätzlicher Diagonalterm für numerische Stabilität (`eps`).
    fn nugget(&self) -> f64;

    /// Gibt den Namen/Typ des Kernels zurück für Debugging
    fn kernel_type(&self) -> &'static str {
        "Unknown"
    }
}
