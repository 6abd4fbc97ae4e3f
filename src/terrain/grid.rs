//! Fractal height grid generated by diamond-square midpoint displacement.
//!
//! The grid spans indices `[0, last_index]` on both axes with
//! `side = 2^tesselation + 1`. Construction seeds the four corners with
//! uniform random values; `generate` fills the interior level by level with
//! a perturbation amplitude that halves at each level, then normalizes all
//! cells into [0, 1].

use log::debug;

use crate::core::error::{Error, Result};
use crate::rng::{RandomSource, SeededSource};
use crate::terrain::config::TerrainParams;
use crate::terrain::transfer::TransferFunction;

/// A square fractal elevation grid.
///
/// Cells are stored flat, x-major: cell `(x, y)` lives at `x * side + y`.
/// After `generate` every value lies in [0, 1]; resize operations introduce
/// fresh unnormalized detail on purpose (see `increase_tesselation`).
pub struct HeightGrid {
    cells: Vec<f64>,
    tesselation: u32,
    last_index: usize,
    transfer_stack: Vec<TransferFunction>,
    rng: Box<dyn RandomSource>,
}

impl HeightGrid {
    /// Create a grid at the given tesselation level with corners seeded
    /// from `rng`. All other cells start at zero.
    ///
    /// Memory grows as `(2^tesselation + 1)^2`; keep the level moderate.
    pub fn new(tesselation: u32, rng: Box<dyn RandomSource>) -> Self {
        let last_index = 1usize << tesselation;
        let side = last_index + 1;
        let mut grid = Self {
            cells: vec![0.0; side * side],
            tesselation,
            last_index,
            transfer_stack: Vec::new(),
            rng,
        };
        grid.seed_corners();
        grid
    }

    /// Create a grid from parameters, using a deterministic seeded source.
    pub fn from_params(params: &TerrainParams) -> Self {
        Self::new(params.tesselation, Box::new(SeededSource::new(params.seed)))
    }

    /// Current linear dimension (`2^tesselation + 1`).
    pub fn side(&self) -> usize {
        self.last_index + 1
    }

    /// Current recursion depth.
    pub fn tesselation(&self) -> u32 {
        self.tesselation
    }

    /// Largest valid index on either axis (`2^tesselation`).
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// Elevation at `(x, y)`. Panics if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(x <= self.last_index && y <= self.last_index);
        self.cells[x * self.side() + y]
    }

    fn set(&mut self, x: usize, y: usize, value: f64) {
        let side = self.side();
        self.cells[x * side + y] = value;
    }

    fn seed_corners(&mut self) {
        let last = self.last_index;
        let corners = [(0, 0), (last, 0), (0, last), (last, last)];
        for (x, y) in corners {
            let v = self.rng.next_uniform();
            self.set(x, y, v);
        }
    }

    /// Zero the grid and re-seed the four corners with fresh random values.
    ///
    /// Required before re-running `generate`: a second full generation pass
    /// over an already-filled grid treats stale cells as displacement
    /// anchors and does not produce a clean fractal.
    pub fn reset(&mut self) {
        self.cells.fill(0.0);
        self.seed_corners();
    }

    /// Run the full diamond-square recursion, then normalize into [0, 1].
    ///
    /// Fails with [`Error::FlatField`] if every cell ends up equal, which
    /// would make normalization divide by zero. The grid keeps its raw
    /// values in that case; `reset` and retry.
    pub fn generate(&mut self) -> Result<()> {
        debug!(
            "generating {} levels on a {}x{} grid",
            self.tesselation,
            self.side(),
            self.side()
        );
        for level in 0..self.tesselation {
            self.generate_at_level(level);
        }
        self.normalize()
    }

    /// One diamond-square pass at the given level (0 = coarsest).
    ///
    /// The perturbation amplitude is `2^-level`, so each finer level adds
    /// half the roughness of the previous one.
    fn generate_at_level(&mut self, level: u32) {
        let step = 1usize << (self.tesselation - level);
        let half = step / 2;
        let amplitude = 2.0_f64.powi(-(level as i32));
        let last = self.last_index;

        // Diamond step: center of each coarse cell gets the mean of its
        // four diagonal corners.
        for left in (0..last).step_by(step) {
            for top in (0..last).step_by(step) {
                let mean = (self.get(left, top)
                    + self.get(left + step, top)
                    + self.get(left, top + step)
                    + self.get(left + step, top + step))
                    / 4.0;
                let perturb = (self.rng.next_uniform() - 0.5) * amplitude;
                self.set(left + half, top + half, mean + perturb);
            }
        }

        // Square step: the edge midpoints right of and below each coarse
        // lattice point get the mean of their in-bounds axis neighbors.
        for left in (0..=last).step_by(step) {
            for top in (0..=last).step_by(step) {
                for (x, y) in [(left + half, top), (left, top + half)] {
                    if x <= last && y <= last {
                        let mean = self.neighbor_mean(x, y, half);
                        let perturb = (self.rng.next_uniform() - 0.5) * amplitude;
                        self.set(x, y, mean + perturb);
                    }
                }
            }
        }
    }

    /// Mean of the 2-4 axis-aligned neighbors at `radius` that lie inside
    /// the grid. Edge midpoints on the boundary simply have fewer neighbors.
    fn neighbor_mean(&self, x: usize, y: usize, radius: usize) -> f64 {
        let mut sum = 0.0;
        let mut count = 0u32;
        if x >= radius {
            sum += self.get(x - radius, y);
            count += 1;
        }
        if x + radius <= self.last_index {
            sum += self.get(x + radius, y);
            count += 1;
        }
        if y >= radius {
            sum += self.get(x, y - radius);
            count += 1;
        }
        if y + radius <= self.last_index {
            sum += self.get(x, y + radius);
            count += 1;
        }
        sum / count as f64
    }

    /// Linearly rescale all cells so the minimum maps to 0 and the maximum
    /// to 1.
    fn normalize(&mut self) -> Result<()> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.cells {
            min = min.min(v);
            max = max.max(v);
        }
        if min == max {
            return Err(Error::FlatField(min));
        }
        let range = max - min;
        for v in &mut self.cells {
            *v = (*v - min) / range;
        }
        Ok(())
    }

    /// Stack a transfer function onto the output stage.
    ///
    /// The function is probed at the 11 points 0.0, 0.1, ..., 1.0; if any
    /// output falls outside [0, 1] (or is NaN) the call fails with
    /// [`Error::TransferOutOfRange`] and the stack is left untouched.
    /// Stacking is append-only; there is no removal.
    pub fn apply_transfer_function(&mut self, tf: TransferFunction) -> Result<()> {
        for i in 0..=10 {
            let x = i as f64 / 10.0;
            let y = tf.get_y(x);
            if !(0.0..=1.0).contains(&y) {
                return Err(Error::TransferOutOfRange { x, y });
            }
        }
        self.transfer_stack.push(tf);
        Ok(())
    }

    /// Dump all elevations as a fresh flat array of `side^2` values,
    /// x-major, each value passed through the transfer stack in insertion
    /// order. Pure; safe to call repeatedly.
    pub fn dump(&self) -> Vec<f64> {
        self.cells
            .iter()
            .map(|&v| {
                self.transfer_stack
                    .iter()
                    .fold(v, |acc, tf| tf.get_y(acc))
            })
            .collect()
    }

    /// Convolve the grid with a square, odd-dimension kernel.
    ///
    /// Kernel taps falling outside the grid are omitted and the weighted
    /// sum is divided by the weights actually used, so edges are averaged
    /// over their real neighborhood instead of padded. The new grid is
    /// built fully before replacing the old one; a validation failure
    /// leaves the grid untouched. There is no undo.
    pub fn apply_convolution(&mut self, matrix: &[Vec<f64>]) -> Result<()> {
        let dim = matrix.len();
        if dim % 2 != 1 {
            return Err(Error::KernelEvenDimension(dim));
        }
        for (row, entries) in matrix.iter().enumerate() {
            if entries.len() != dim {
                return Err(Error::KernelNotSquare {
                    row,
                    len: entries.len(),
                    dim,
                });
            }
        }

        let side = self.side();
        let half = (dim / 2) as isize;
        let mut new_cells = vec![0.0; side * side];
        for x in 0..side {
            for y in 0..side {
                let mut sum = 0.0;
                let mut weight = 0.0;
                for (mx, row) in matrix.iter().enumerate() {
                    for (my, &coeff) in row.iter().enumerate() {
                        let nx = x as isize + mx as isize - half;
                        let ny = y as isize + my as isize - half;
                        if nx >= 0 && nx < side as isize && ny >= 0 && ny < side as isize {
                            sum += self.cells[nx as usize * side + ny as usize] * coeff;
                            weight += coeff;
                        }
                    }
                }
                new_cells[x * side + y] = sum / weight;
            }
        }
        self.cells = new_cells;
        Ok(())
    }

    /// Histogram of cell values over `box_count` equal-width buckets
    /// spanning [0, 1]. A value of exactly 1.0 lands in the last bucket;
    /// out-of-range values (possible after a resize) clamp to the ends.
    pub fn statistics(&self, box_count: usize) -> Vec<usize> {
        assert!(box_count > 0, "box_count must be positive");
        let mut stat = vec![0usize; box_count];
        for &v in &self.cells {
            let bucket = ((v * box_count as f64).floor() as isize)
                .clamp(0, box_count as isize - 1) as usize;
            stat[bucket] += 1;
        }
        stat
    }

    /// Double the resolution: every cell `(x, y)` moves to `(2x, 2y)` and a
    /// single diamond-square pass at the new finest level fills in the new
    /// midpoints. Coarser structure is preserved exactly; the fresh detail
    /// is not re-normalized, so cells may stray slightly outside [0, 1].
    pub fn increase_tesselation(&mut self) {
        let old_side = self.side();
        let new_last = self.last_index * 2;
        let new_side = new_last + 1;
        let mut new_cells = vec![0.0; new_side * new_side];
        for x in 0..old_side {
            for y in 0..old_side {
                new_cells[(2 * x) * new_side + 2 * y] = self.cells[x * old_side + y];
            }
        }
        self.cells = new_cells;
        self.tesselation += 1;
        self.last_index = new_last;
        debug!("tesselation increased to {}, side {}", self.tesselation, new_side);
        self.generate_at_level(self.tesselation - 1);
    }

    /// Halve the resolution by keeping only even-indexed cells. Lossy and
    /// irreversible: odd-indexed detail is discarded, not averaged.
    ///
    /// Fails with [`Error::TesselationUnderflow`] at level 0.
    pub fn decrease_tesselation(&mut self) -> Result<()> {
        if self.tesselation == 0 {
            return Err(Error::TesselationUnderflow);
        }
        let old_side = self.side();
        let new_last = self.last_index / 2;
        let new_side = new_last + 1;
        let mut new_cells = vec![0.0; new_side * new_side];
        for x in 0..new_side {
            for y in 0..new_side {
                new_cells[x * new_side + y] = self.cells[(2 * x) * old_side + 2 * y];
            }
        }
        self.cells = new_cells;
        self.tesselation -= 1;
        self.last_index = new_last;
        debug!("tesselation decreased to {}, side {}", self.tesselation, new_side);
        Ok(())
    }
}
