//! Heightfield - fractal terrain elevation grids via midpoint displacement

pub mod core;
pub mod rng;
pub mod terrain;

pub use crate::core::error::{Error, Result};
pub use crate::rng::{RandomSource, SeededSource};
pub use crate::terrain::{HeightGrid, TerrainParams, TransferFunction};
