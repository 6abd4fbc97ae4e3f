//! Error types for height-field generation

use thiserror::Error;

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for height-field operations.
///
/// Validation variants (`KernelNotSquare`, `KernelEvenDimension`,
/// `TransferOutOfRange`) indicate programmer error at the call site and are
/// raised before any state is mutated. Domain variants (`FlatField`,
/// `ConstantTransfer`, `TesselationUnderflow`) replace the silent
/// NaN/Infinity propagation a naive division would produce.
#[derive(Debug, Error)]
pub enum Error {
    #[error("convolution matrix is not square: row {row} has {len} entries, expected {dim}")]
    KernelNotSquare { row: usize, len: usize, dim: usize },

    #[error("convolution matrix dimension must be odd, got {0}")]
    KernelEvenDimension(usize),

    #[error("transfer function must map [0,1] into [0,1]: f({x}) = {y}")]
    TransferOutOfRange { x: f64, y: f64 },

    #[error("cannot normalize a flat field: every cell equals {0}")]
    FlatField(f64),

    #[error("transfer function is constant ({0}) over its domain, range cannot be normalized")]
    ConstantTransfer(f64),

    #[error("tesselation is already 0, cannot decrease further")]
    TesselationUnderflow,
}
