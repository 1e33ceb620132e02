// src/math/types/volume.rs

use crate::math::error::{GpssiError, GpssiResult};
use crate::math::types::grid::Grid;

/// Ein Array über einem `Grid`, zeilenweise (row-major) gespeichert.
/// Für Intensitätsbilder `Volume<f64>`, für Masken `Volume<bool>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T> {
    grid: Grid,
    data: Vec<T>,
}

/// Binäre Segmentierungsmaske.
pub type Mask = Volume<bool>;
/// Reellwertiges Intensitätsbild.
pub type Image = Volume<f64>;

impl<T> Volume<T> {
    /// Übernimmt die Daten; die Länge muss der Zellenzahl des Gitters entsprechen.
    pub fn from_vec(grid: Grid, data: Vec<T>) -> GpssiResult<Self> {
        if data.len() != grid.len() {
            return Err(GpssiError::ShapeMismatch {
                what: "volume data",
                expected: vec![grid.len()],
                actual: vec![data.len()],
            });
        }
        Ok(Self { grid, data })
    }

    /// Ohne Längenprüfung; nur für Daten, die bereits aus `grid.len()` erzeugt wurden.
    pub(crate) fn from_parts(grid: Grid, data: Vec<T>) -> Self {
        debug_assert_eq!(grid.len(), data.len());
        Self { grid, data }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn shape(&self) -> &[usize] {
        self.grid.shape()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, coords: &[usize]) -> Option<&T> {
        self.grid.index_of(coords).and_then(|i| self.data.get(i))
    }

    pub fn set(&mut self, coords: &[usize], value: T) -> bool {
        match self.grid.index_of(coords) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Volume<U> {
        Volume::from_parts(self.grid.clone(), self.data.iter().map(f).collect())
    }
}

impl<T: Clone> Volume<T> {
    pub fn filled(grid: Grid, value: T) -> Self {
        let data = vec![value; grid.len()];
        Self { grid, data }
    }
}

impl Volume<bool> {
    /// Maske aus numerischen Labels: alles ungleich Null ist Vordergrund.
    pub fn mask_from(grid: Grid, labels: &[u8]) -> GpssiResult<Self> {
        Self::from_vec(grid, labels.iter().map(|&v| v != 0).collect())
    }

    /// Anzahl der Vordergrundzellen.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Komplement (Vordergrund ↔ Hintergrund).
    pub fn inverted(&self) -> Self {
        self.map(|&v| !v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let grid = Grid::new([2, 2]).unwrap();
        let err = Volume::from_vec(grid, vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, GpssiError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_get_set_row_major() {
        let grid = Grid::new([2, 3]).unwrap();
        let mut image = Volume::filled(grid, 0.0);
        assert!(image.set(&[1, 2], 7.0));
        assert!(!image.set(&[2, 0], 1.0));
        assert_eq!(image.data()[5], 7.0);
        assert_eq!(image.get(&[1, 2]), Some(&7.0));
    }

    #[test]
    fn test_mask_from_labels() {
        let grid = Grid::new([2, 2]).unwrap();
        let mask = Mask::mask_from(grid, &[0, 255, 1, 0]).unwrap();
        assert_eq!(mask.count_foreground(), 2);
        assert_eq!(mask.inverted().count_foreground(), 2);
        assert_eq!(mask.data(), &[false, true, true, false]);
    }
}
