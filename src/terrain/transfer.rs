//! Normalized transfer functions for remapping elevation values.

use crate::core::error::{Error, Result};

/// Number of sampling intervals used to estimate a function's range.
const SAMPLE_STEPS: usize = 100;

/// A remapping curve normalized to map [0, 1] into [0, 1].
///
/// Wraps an arbitrary continuous function over `[domain_min, domain_max]`.
/// The observed output range is recorded at construction by sampling
/// `SAMPLE_STEPS + 1` evenly spaced points, and `get_y` rescales through it.
/// The function does not have to be monotonic; it does have to be defined
/// over the whole domain (no validation is done for the caller).
///
/// Immutable once built; owned by the grid's transfer stack after stacking.
pub struct TransferFunction {
    raw: Box<dyn Fn(f64) -> f64>,
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl std::fmt::Debug for TransferFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferFunction")
            .field("domain_min", &self.domain_min)
            .field("domain_max", &self.domain_max)
            .field("range_min", &self.range_min)
            .field("range_max", &self.range_max)
            .finish_non_exhaustive()
    }
}

impl TransferFunction {
    /// Wrap `raw`, sampling its range over `[domain_min, domain_max]`.
    ///
    /// Fails with [`Error::ConstantTransfer`] when every sample is equal,
    /// since a zero-width range cannot be rescaled. Catching this here
    /// keeps `get_y` infallible and division-free on the hot path.
    pub fn new(
        raw: impl Fn(f64) -> f64 + 'static,
        domain_min: f64,
        domain_max: f64,
    ) -> Result<Self> {
        let mut range_min = f64::INFINITY;
        let mut range_max = f64::NEG_INFINITY;
        for i in 0..=SAMPLE_STEPS {
            let x = i as f64 * (domain_max - domain_min) / SAMPLE_STEPS as f64 + domain_min;
            let y = raw(x);
            if y < range_min {
                range_min = y;
            }
            if y > range_max {
                range_max = y;
            }
        }
        if range_min == range_max {
            return Err(Error::ConstantTransfer(range_min));
        }
        Ok(Self {
            raw: Box::new(raw),
            domain_min,
            domain_max,
            range_min,
            range_max,
        })
    }

    /// Evaluate at `x` in [0, 1]: map into the domain, apply the raw
    /// function, rescale the result through the recorded range.
    pub fn get_y(&self, x: f64) -> f64 {
        let mapped = x * (self.domain_max - self.domain_min) + self.domain_min;
        let y = (self.raw)(mapped);
        (y - self.range_min) / (self.range_max - self.range_min)
    }

    /// Start of the sampled domain.
    pub fn domain_min(&self) -> f64 {
        self.domain_min
    }

    /// End of the sampled domain.
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// Smallest output observed while sampling.
    pub fn range_min(&self) -> f64 {
        self.range_min
    }

    /// Largest output observed while sampling.
    pub fn range_max(&self) -> f64 {
        self.range_max
    }
}
