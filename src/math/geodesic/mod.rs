// src/math/geodesic/mod.rs

pub mod config;
pub mod map;
mod raster_scan;

pub use self::config::{Connectivity, GeodesicConfig};
pub use self::map::DistanceMap;

use crate::math::error::{GpssiError, GpssiResult};
use crate::math::types::{Grid, Image, Mask, Volume};
use tracing::{debug, warn};

/// Berechnet geodätische Distanzkarten aus Intensitätsbild und Referenzmaske.
///
/// Jede Vordergrundzelle hat Distanz 0, alle anderen die kleinste Pfadsumme
/// zur Maske, wobei jeder Schritt `sqrt((1-λ)·|Δx|² + λ·ΔI²)` kostet.
/// Der Raster-Scan ist eine Näherung: mehr Iterationen nähern sich der
/// exakten geodätischen Distanz an, eine Konvergenz ist nicht garantiert.
#[derive(Debug, Clone)]
pub struct GeodesicDistance {
    config: GeodesicConfig,
}

impl GeodesicDistance {
    pub fn new(config: GeodesicConfig) -> GpssiResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeodesicConfig {
        &self.config
    }

    /// Nicht-negative Distanz jeder Zelle zum nächsten Vordergrund.
    ///
    /// Leere Maske: jede Zelle erhält `config.sentinel` (kein Fehler).
    pub fn compute(&self, image: &Image, mask: &Mask) -> GpssiResult<DistanceMap> {
        self.validate_inputs(image, mask)?;
        let distance = self.distance_to(image, mask.data());
        Ok(DistanceMap::new(
            Volume::from_parts(image.grid().clone(), distance),
            false,
        ))
    }

    /// Vorzeichenbehaftete Karte `d(Hintergrund) − d(Vordergrund)`:
    /// positiv innerhalb der Maske, negativ außerhalb. Mit der Schwelle `> 0`
    /// ergibt die rauschfreie Karte wieder die Referenzmaske.
    pub fn compute_signed(&self, image: &Image, mask: &Mask) -> GpssiResult<DistanceMap> {
        self.validate_inputs(image, mask)?;
        let outside = self.distance_to(image, mask.data());
        let background = mask.inverted();
        let inside = self.distance_to(image, background.data());
        let signed = inside
            .iter()
            .zip(&outside)
            .map(|(&to_background, &to_foreground)| to_background - to_foreground)
            .collect();
        Ok(DistanceMap::new(
            Volume::from_parts(image.grid().clone(), signed),
            true,
        ))
    }

    fn distance_to(&self, image: &Image, seeds: &[bool]) -> Vec<f64> {
        let grid = image.grid();
        let seed_count = seeds.iter().filter(|&&s| s).count();
        if seed_count == 0 {
            warn!(
                "Geodesic distance on {} without seed cells; every cell set to sentinel {}",
                grid, self.config.sentinel
            );
        }
        debug!(
            "Geodesic raster scan: grid {}, lambda {}, iterations {}, connectivity {:?}, seeds {}",
            grid, self.config.lambda, self.config.iterations, self.config.connectivity, seed_count
        );
        raster_scan::raster_scan(grid, image.data(), seeds, &self.config)
    }

    fn validate_inputs(&self, image: &Image, mask: &Mask) -> GpssiResult<()> {
        if image.grid().ndim() < 2 {
            return Err(GpssiError::InvalidDimensionality {
                dims: image.grid().ndim(),
                supported: "2 or 3",
            });
        }
        image.grid().ensure_matches(mask.grid(), "mask")?;
        if let Some(cell) = image.data().iter().position(|v| !v.is_finite()) {
            return Err(GpssiError::invalid_config(format!(
                "image intensity at cell {} is not finite",
                cell
            )));
        }
        Ok(())
    }
}

/// Kurzform: `compute(image, mask, lambda, iterations, spacing?)`.
///
/// Ist `spacing` gesetzt, ersetzt es den Abstand des Bildgitters (Länge = Achsenzahl, alle Werte > 0);
/// die Maske muss dann nur in der Form übereinstimmen.
pub fn geodesic_map(
    image: &Image,
    mask: &Mask,
    lambda: f64,
    iterations: usize,
    spacing: Option<&[f64]>,
) -> GpssiResult<DistanceMap> {
    let engine = GeodesicDistance::new(
        GeodesicConfig::new()
            .with_lambda(lambda)
            .with_iterations(iterations),
    )?;
    match spacing {
        None => engine.compute(image, mask),
        Some(spacing) => {
            let grid = Grid::with_spacing(image.shape().to_vec(), spacing.to_vec())?;
            if mask.shape() != image.shape() {
                return Err(GpssiError::ShapeMismatch {
                    what: "mask",
                    expected: image.shape().to_vec(),
                    actual: mask.shape().to_vec(),
                });
            }
            let image = Volume::from_parts(grid.clone(), image.data().to_vec());
            let mask = Volume::from_parts(grid, mask.data().to_vec());
            engine.compute(&image, &mask)
        }
    }
}
