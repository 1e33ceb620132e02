pub mod grid;
pub mod volume;

pub use grid::{Grid, MAX_DIMS};
pub use volume::{Image, Mask, Volume};
