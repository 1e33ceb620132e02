// src/math/geodesic/map.rs

use crate::math::error::GpssiResult;
use crate::math::scalar_field::ScalarField;
use crate::math::types::{Grid, Image, Volume};

/// Ergebnis der geodätischen Distanztransformation.
/// Nach der Erzeugung unveränderlich; Anpassungen liefern eine neue Karte.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    field: Volume<f64>,
    signed: bool,
}

impl DistanceMap {
    pub(crate) fn new(field: Volume<f64>, signed: bool) -> Self {
        Self { field, signed }
    }

    /// Übernimmt ein extern berechnetes, nicht-negatives Feld als Distanzkarte (z.B. aus einem Cache).
    pub fn from_volume(field: Volume<f64>) -> Self {
        Self::new(field, false)
    }

    /// Wie `from_volume`, für eine vorzeichenbehaftete Karte (positiv innerhalb der Maske).
    pub fn from_signed_volume(field: Volume<f64>) -> Self {
        Self::new(field, true)
    }

    /// `true` für `d(Hintergrund) − d(Vordergrund)`, positiv innerhalb der Maske.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn as_volume(&self) -> &Volume<f64> {
        &self.field
    }

    pub fn into_volume(self) -> Volume<f64> {
        self.field
    }

    /// Setzt alle Zellen, deren Intensität `predicate` erfüllt, auf den
    /// hintergrundseitigen Extremwert der Karte: das Minimum bei
    /// vorzeichenbehafteten Karten, das Maximum bei reinen Distanzen.
    /// Typisch: Zellen außerhalb des Körpers (`|v| v == 0.0`) nie als Vordergrund samplen.
    ///
    /// Bei der vorzeichenlosen Karte liegt jede Zelle bereits bei `>= 0`; die
    /// Schwelle `value > 0` muss der Aufrufer dort selbst verschieben.
    pub fn saturated_where<F>(self, image: &Image, predicate: F) -> GpssiResult<Self>
    where
        F: Fn(f64) -> bool,
    {
        self.field.grid().ensure_matches(image.grid(), "image")?;
        let background = if self.signed {
            self.min_value()
        } else {
            self.max_value()
        };
        let data = self
            .field
            .data()
            .iter()
            .zip(image.data())
            .map(|(&d, &v)| if predicate(v) { background } else { d })
            .collect();
        Ok(Self {
            field: Volume::from_parts(self.field.grid().clone(), data),
            signed: self.signed,
        })
    }
}

impl ScalarField for DistanceMap {
    fn grid(&self) -> &Grid {
        self.field.grid()
    }

    fn values(&self) -> &[f64] {
        self.field.data()
    }
}
