//! Margins required by rotated sampling grids.
//!
//! A grid rotated about its center sweeps a disc whose diameter is the grid
//! diagonal; the working image must be padded so every rotated sample stays
//! inside the buffer.

const TRUNC_SCALE: f64 = 16384.0;

/// Truncates `v` to a fixed number of fractional bits so rounding of the
/// result is identical on every platform.
#[inline]
pub fn truncate_precision(v: f64) -> f64 {
    (v * TRUNC_SCALE).round() / TRUNC_SCALE
}

#[inline]
fn diagonal(grid_w: usize, grid_h: usize) -> f64 {
    ((grid_w * grid_w + grid_h * grid_h) as f64).sqrt()
}

/// Margin needed around a window addressed from its upper-left corner.
pub fn origin_grid_pad(grid_w: usize, grid_h: usize) -> usize {
    let min_dim = grid_w.min(grid_h) as f64;
    let pad = truncate_precision((diagonal(grid_w, grid_h) - min_dim) / 2.0);
    pad.max(0.0).round() as usize
}

/// Margin needed around a grid addressed from its center pixel.
pub fn center_grid_pad(grid_w: usize, grid_h: usize) -> usize {
    let pad = truncate_precision((diagonal(grid_w, grid_h) - 1.0) / 2.0);
    pad.max(0.0).round() as usize
}

/// Largest margin required by the DFT window and the binarization grid.
pub fn max_padding(
    window_size: usize,
    window_offset: usize,
    dirbin_grid_w: usize,
    dirbin_grid_h: usize,
) -> usize {
    let dft_pad = origin_grid_pad(window_size, window_size) + window_offset;
    let dirbin_pad = center_grid_pad(dirbin_grid_w, dirbin_grid_h);
    dft_pad.max(dirbin_pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_geometry_margins() {
        assert_eq!(origin_grid_pad(24, 24), 5);
        assert_eq!(center_grid_pad(7, 9), 5);
        assert_eq!(max_padding(24, 8, 7, 9), 13);
    }

    #[test]
    fn binarization_grid_can_dominate() {
        assert_eq!(max_padding(8, 0, 31, 31), 21);
    }

    #[test]
    fn unit_geometry_needs_no_margin() {
        assert_eq!(max_padding(1, 0, 1, 1), 0);
        assert_eq!(center_grid_pad(0, 0), 0);
    }
}
