//! Parameters controlling map generation and binarization.
//!
//! Defaults reproduce the standard 500 ppi settings: 8×8 blocks analysed with
//! a 24×24 rotated window, 16 quantized directions starting at vertical, and a
//! 7×9 directional-binarization grid.

use crate::tables::padding::max_padding;
use serde::{Deserialize, Serialize};

/// Configuration shared by every stage of the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LfsParams {
    /// Fill value for the image margin added before analysis.
    pub pad_value: u8,
    /// Side of one block of the output maps (pixels).
    pub block_size: usize,
    /// Side of the rotated DFT analysis window (pixels).
    pub window_size: usize,
    /// Distance the analysis window starts before the block origin.
    pub window_offset: usize,
    /// Number of quantized directions over a half circle.
    pub num_directions: usize,
    /// Angle of direction 0 in radians.
    pub start_dir_angle: f64,
    /// Number of DFT waveforms tried per window.
    pub num_dft_waves: usize,
    /// Minimum peak power for a direction to be accepted.
    pub powmax_min: f64,
    /// Minimum peak-to-mean power ratio for a direction to be accepted.
    pub pownorm_min: f64,
    /// Peak powers above this are treated as saturated and rejected.
    pub powmax_max: f64,
    /// Minimum number of agreeing neighbours a direction needs to survive.
    pub rmv_valid_nbr_min: usize,
    /// Largest direction difference counted as agreement.
    pub dir_distance_max: usize,
    /// Valid 3×3 neighbours required before a direction is smoothed.
    pub smth_valid_nbr_min: usize,
    /// Minimum mean vector length for a smoothed direction.
    pub dir_strength_min: f64,
    /// Valid neighbours required to interpolate a missing direction.
    pub min_interpolate_nbrs: usize,
    /// Valid neighbours required to measure vorticity.
    pub vort_valid_nbr_min: usize,
    pub highcurv_vorticity_min: usize,
    pub highcurv_curvature_min: usize,
    /// Percentile (0..50) used for the low/high intensity of a window.
    pub percentile_min_max: usize,
    /// Minimum 6-bit intensity spread for a block to have contrast.
    pub min_contrast_delta: u8,
    /// Directional-binarization grid width (along the ridge).
    pub dirbin_grid_w: usize,
    /// Directional-binarization grid height (across the ridge).
    pub dirbin_grid_h: usize,
}

impl Default for LfsParams {
    fn default() -> Self {
        Self {
            pad_value: 128,
            block_size: 8,
            window_size: 24,
            window_offset: 8,
            num_directions: 16,
            start_dir_angle: std::f64::consts::FRAC_PI_2,
            num_dft_waves: 4,
            powmax_min: 100_000.0,
            pownorm_min: 3.8,
            powmax_max: 50_000_000.0,
            rmv_valid_nbr_min: 3,
            dir_distance_max: 3,
            smth_valid_nbr_min: 7,
            dir_strength_min: 0.2,
            min_interpolate_nbrs: 2,
            vort_valid_nbr_min: 3,
            highcurv_vorticity_min: 5,
            highcurv_curvature_min: 5,
            percentile_min_max: 10,
            min_contrast_delta: 5,
            dirbin_grid_w: 7,
            dirbin_grid_h: 9,
        }
    }
}

impl LfsParams {
    /// Margin that satisfies both the DFT window and the binarization grid.
    ///
    /// Always covers the binarization geometry, even for runs that only
    /// generate maps, so block-grid sizing does not depend on the flag.
    pub fn max_padding(&self) -> usize {
        max_padding(
            self.window_size,
            self.window_offset,
            self.dirbin_grid_w,
            self.dirbin_grid_h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_margin_covers_rotated_window() {
        assert_eq!(LfsParams::default().max_padding(), 13);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: LfsParams =
            serde_json::from_str(r#"{ "block_size": 16, "pad_value": 0 }"#).unwrap();
        assert_eq!(params.block_size, 16);
        assert_eq!(params.pad_value, 0);
        assert_eq!(params.window_size, 24);
        assert_eq!(params.num_directions, 16);
    }
}
