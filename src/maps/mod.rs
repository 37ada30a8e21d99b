//! Block-level ridge maps.
//!
//! Overview
//! - The unpadded image is tiled into `block_size` blocks; the last block of
//!   each row and column is shifted to sit flush with the image edge, so the
//!   grid is `ceil(w / bs) × ceil(h / bs)`.
//! - Each block is analysed through a `window_size` window starting
//!   `window_offset` pixels before the block origin. Low-contrast windows are
//!   skipped; the others get a direction from a DFT power analysis over the
//!   rotated window.
//! - The raw direction map is cleaned up (inconsistent directions removed,
//!   directions smoothed, holes interpolated) and high-curvature blocks are
//!   flagged from the cleaned map.
//!
//! Modules
//! - `blocks` – block grid layout inside the padded image.
//! - `contrast` – low-contrast window test.
//! - `dft` – directional DFT power analysis.
//! - `direction` – direction map clean-up passes.
//! - `curvature` – vorticity/curvature flags.
//! - `generate` – [`generate_block_maps`], tying the passes together.

mod blocks;
mod contrast;
mod curvature;
mod dft;
mod direction;
mod generate;

pub use blocks::{block_grid_dims, BlockLayout};
pub use generate::generate_block_maps;

use crate::error::StageError;
use serde::Serialize;

/// Direction value of blocks without a reliable direction.
pub const INVALID_DIR: i32 = -1;

/// Row-major grid of per-block integer codes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockMap {
    pub w: usize,
    pub h: usize,
    pub data: Vec<i32>,
}

impl BlockMap {
    pub fn filled(w: usize, h: usize, value: i32) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: i32) {
        self.data[y * self.w + x] = v;
    }

    /// Value at a signed position, `None` outside the grid.
    #[inline]
    pub fn get_signed(&self, x: isize, y: isize) -> Option<i32> {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return None;
        }
        Some(self.get(x as usize, y as usize))
    }

    /// Number of entries that are non-zero.
    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// The four maps produced together by [`generate_block_maps`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMaps {
    pub direction: BlockMap,
    pub low_contrast: BlockMap,
    pub low_flow: BlockMap,
    pub high_curve: BlockMap,
}

impl BlockMaps {
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        self.direction.dims()
    }

    /// Fails unless all four maps share the direction map's dimensions.
    pub fn check_consistent(&self) -> Result<(), StageError> {
        let (w, h) = self.dims();
        for map in [&self.low_contrast, &self.low_flow, &self.high_curve] {
            if map.dims() != (w, h) {
                return Err(StageError::DimensionMismatch {
                    expected_w: w,
                    expected_h: h,
                    actual_w: map.w,
                    actual_h: map.h,
                });
            }
        }
        Ok(())
    }
}

/// 8-neighbourhood in clockwise ring order starting at the upper-left.
pub(crate) const RING: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];
