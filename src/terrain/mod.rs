//! Fractal elevation grids and their post-processing pipeline.
//!
//! A [`HeightGrid`] is generated by diamond-square midpoint displacement,
//! normalized into [0, 1], and optionally reshaped by a stack of
//! [`TransferFunction`]s and convolution kernels before being dumped as a
//! flat array for an external mesh builder.

pub mod config;
pub mod grid;
pub mod transfer;

pub use config::TerrainParams;
pub use grid::HeightGrid;
pub use transfer::TransferFunction;
