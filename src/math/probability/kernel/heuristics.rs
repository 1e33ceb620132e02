// src/math/probability/kernel/heuristics.rs

//! Startwerte für Kernel-Hyperparameter aus der Referenzmaske.
//! Keine Optimierung, nur geometrische Daumenregeln.

use crate::math::types::Mask;
use crate::math::utils::constants::PI;

/// Radius des Kreises (2D) bzw. der Kugel (3D) mit derselben physikalischen
/// Fläche/Volumen wie der Vordergrund der Maske. Guter Startwert für `w1`.
///
/// Gibt `None` zurück, wenn die Maske leer ist.
pub fn equal_volume_radius(mask: &Mask) -> Option<f64> {
    let count = mask.count_foreground();
    if count == 0 {
        return None;
    }
    let measure = count as f64 * mask.grid().cell_volume();
    let radius = match mask.grid().ndim() {
        1 => measure / 2.0,
        2 => (measure / PI).sqrt(),
        _ => (3.0 * measure / (4.0 * PI)).cbrt(),
    };
    Some(radius)
}

/// `w0 = (D/2)²`, wobei `D` die erwartete Abweichung der Kontur (in Einheiten
/// der Distanzkarte) für das 95%-Intervall ist.
pub fn amplitude_for_interval(expected_distance: f64) -> f64 {
    (expected_distance / 2.0).powi(2)
}
