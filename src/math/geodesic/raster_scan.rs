// src/math/geodesic/raster_scan.rs

use crate::math::geodesic::config::{Connectivity, GeodesicConfig};
use crate::math::types::{Grid, MAX_DIMS};
use crate::math::utils::indexing;

/// Ein Nachbar-Versatz aus der kausalen Halbnachbarschaft des Vorwärts-Scans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NeighborOffset {
    pub steps: [isize; MAX_DIMS],
    /// Versatz im flachen Index (Vorwärtsrichtung).
    pub flat: isize,
    /// Quadrierte physikalische Schrittlänge (Spacing berücksichtigt).
    pub spatial_sq: f64,
}

/// Alle Versätze, deren Nachbar in Raster-Reihenfolge vor der Zelle liegt
/// (erste von Null verschiedene Komponente ist -1). Der Rückwärts-Scan nutzt die Negation.
pub(crate) fn causal_offsets(grid: &Grid, connectivity: Connectivity) -> Vec<NeighborOffset> {
    let ndim = grid.ndim();
    let strides = grid.strides();
    let total = 3usize.pow(ndim as u32);
    let mut offsets = Vec::new();

    for code in 0..total {
        let mut steps = [0isize; MAX_DIMS];
        let mut rest = code;
        for axis in (0..ndim).rev() {
            steps[axis] = (rest % 3) as isize - 1;
            rest /= 3;
        }

        let first_nonzero = steps[..ndim].iter().copied().find(|&s| s != 0);
        if first_nonzero != Some(-1) {
            continue;
        }
        let nonzero = steps[..ndim].iter().filter(|&&s| s != 0).count();
        if connectivity == Connectivity::Axial && nonzero != 1 {
            continue;
        }

        let flat = (0..ndim).map(|a| steps[a] * strides[a] as isize).sum();
        let spatial_sq = (0..ndim)
            .map(|a| (steps[a] as f64 * grid.spacing()[a]).powi(2))
            .sum();
        offsets.push(NeighborOffset {
            steps,
            flat,
            spatial_sq,
        });
    }
    offsets
}

/// Geodätische Distanz per abwechselndem Vorwärts-/Rückwärts-Raster-Scan.
///
/// Die Schrittkosten zwischen Nachbarn sind `sqrt((1-λ)·|Δx|² + λ·ΔI²)`.
/// `seeds` markiert Zellen mit Distanz 0. Ohne Saat bleibt jede Zelle auf
/// `config.sentinel`; das Ergebnis ist immer durch den Sentinel begrenzt.
pub(crate) fn raster_scan(
    grid: &Grid,
    intensity: &[f64],
    seeds: &[bool],
    config: &GeodesicConfig,
) -> Vec<f64> {
    let sentinel = config.sentinel;
    let mut distance: Vec<f64> = seeds
        .iter()
        .map(|&is_seed| if is_seed { 0.0 } else { sentinel })
        .collect();

    if !seeds.iter().any(|&s| s) {
        return distance;
    }

    let offsets = causal_offsets(grid, config.connectivity);
    for _ in 0..config.iterations {
        sweep(grid, intensity, &mut distance, &offsets, config.lambda, true);
        sweep(grid, intensity, &mut distance, &offsets, config.lambda, false);
    }

    for d in distance.iter_mut() {
        *d = d.min(sentinel);
    }
    distance
}

fn sweep(
    grid: &Grid,
    intensity: &[f64],
    distance: &mut [f64],
    offsets: &[NeighborOffset],
    lambda: f64,
    forward: bool,
) {
    let shape = grid.shape();
    let ndim = grid.ndim();
    let n = grid.len();
    let sign: isize = if forward { 1 } else { -1 };
    let mut coords = [0usize; MAX_DIMS];

    for step in 0..n {
        let idx = if forward { step } else { n - 1 - step };
        indexing::unravel(idx, shape, &mut coords[..ndim]);

        let mut best = distance[idx];
        for offset in offsets {
            let in_bounds = (0..ndim).all(|a| {
                let c = coords[a] as isize + sign * offset.steps[a];
                c >= 0 && (c as usize) < shape[a]
            });
            if !in_bounds {
                continue;
            }
            let neighbor = (idx as isize + sign * offset.flat) as usize;
            let delta_i = intensity[idx] - intensity[neighbor];
            let cost = ((1.0 - lambda) * offset.spatial_sq + lambda * delta_i * delta_i).sqrt();
            let candidate = distance[neighbor] + cost;
            if candidate < best {
                best = candidate;
            }
        }
        distance[idx] = best;
    }
}
