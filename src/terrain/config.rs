//! Parameters controlling terrain generation.

use serde::{Deserialize, Serialize};

/// Parameters for constructing and generating a height grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TerrainParams {
    /// Random seed for corner seeding and midpoint displacement.
    pub seed: u64,
    /// Recursion depth; the grid side is `2^tesselation + 1`.
    /// Memory grows as the square of that, so keep it moderate.
    pub tesselation: u32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            tesselation: 6,
        }
    }
}
