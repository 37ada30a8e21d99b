//! Rotated sampling grids expressed as linear offsets into the padded image.
//!
//! For each quantized direction the `grid_w × grid_h` grid is rotated about
//! its center so its rows run along that direction. Offsets are computed once
//! per image width, so sampling a rotated window is a table lookup.

use super::padding::{center_grid_pad, origin_grid_pad};
use crate::error::StageError;
use crate::params::LfsParams;
use nalgebra::{Rotation2, Vector2};
use serde::Serialize;

/// Reference point the offsets are measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GridOrigin {
    /// Upper-left corner of the unrotated window (DFT analysis).
    RelativeToOrigin,
    /// Center pixel of the grid (directional binarization).
    RelativeToCenter,
}

/// Geometry of one rotated-grid table.
#[derive(Clone, Debug, PartialEq)]
pub struct GridGeometry {
    /// Unpadded image width.
    pub image_w: usize,
    /// Unpadded image height.
    pub image_h: usize,
    /// Margin of the padded image the offsets index into.
    pub pad: usize,
    pub start_angle: f64,
    pub num_directions: usize,
    pub grid_w: usize,
    pub grid_h: usize,
    pub origin: GridOrigin,
}

impl GridGeometry {
    /// Square DFT analysis window addressed from its corner.
    pub fn dft_window(image_w: usize, image_h: usize, pad: usize, params: &LfsParams) -> Self {
        Self {
            image_w,
            image_h,
            pad,
            start_angle: params.start_dir_angle,
            num_directions: params.num_directions,
            grid_w: params.window_size,
            grid_h: params.window_size,
            origin: GridOrigin::RelativeToOrigin,
        }
    }

    /// Directional-binarization neighbourhood addressed from its center.
    pub fn binarization(image_w: usize, image_h: usize, pad: usize, params: &LfsParams) -> Self {
        Self {
            image_w,
            image_h,
            pad,
            start_angle: params.start_dir_angle,
            num_directions: params.num_directions,
            grid_w: params.dirbin_grid_w,
            grid_h: params.dirbin_grid_h,
            origin: GridOrigin::RelativeToCenter,
        }
    }

    /// Smallest margin that keeps every rotated sample inside the image.
    pub fn required_pad(&self) -> usize {
        match self.origin {
            GridOrigin::RelativeToOrigin => origin_grid_pad(self.grid_w, self.grid_h),
            GridOrigin::RelativeToCenter => center_grid_pad(self.grid_w, self.grid_h),
        }
    }

    #[inline]
    pub fn padded_width(&self) -> usize {
        self.image_w + 2 * self.pad
    }
}

/// Per-direction offset tables for one grid geometry.
#[derive(Clone, Debug)]
pub struct GridOffsets {
    pub pad: usize,
    pub padded_w: usize,
    pub grid_w: usize,
    pub grid_h: usize,
    pub origin: GridOrigin,
    /// `grids[dir][gy * grid_w + gx]`, rows along the direction.
    pub grids: Vec<Vec<isize>>,
}

impl GridOffsets {
    pub fn new(geometry: &GridGeometry) -> Result<Self, StageError> {
        if geometry.num_directions == 0 {
            return Err(StageError::invalid_parameter(
                "num_directions",
                geometry.num_directions,
            ));
        }
        if geometry.grid_w == 0 || geometry.grid_h == 0 {
            return Err(StageError::invalid_parameter(
                "grid",
                format!("{}x{}", geometry.grid_w, geometry.grid_h),
            ));
        }
        if geometry.image_w == 0 || geometry.image_h == 0 {
            return Err(StageError::InvalidDimensions {
                width: geometry.image_w,
                height: geometry.image_h,
            });
        }
        let required = geometry.required_pad();
        if geometry.pad < required {
            return Err(StageError::InsufficientPadding {
                required,
                available: geometry.pad,
            });
        }

        let pw = geometry.padded_width() as isize;
        let cx = (geometry.grid_w - 1) as f64 / 2.0;
        let cy = (geometry.grid_h - 1) as f64 / 2.0;
        let (ox, oy) = match geometry.origin {
            GridOrigin::RelativeToOrigin => (cx, cy),
            GridOrigin::RelativeToCenter => (0.0, 0.0),
        };
        let dir_step = std::f64::consts::PI / geometry.num_directions as f64;

        let grids = (0..geometry.num_directions)
            .map(|dir| {
                let rot = Rotation2::new(geometry.start_angle + dir as f64 * dir_step);
                let mut grid = Vec::with_capacity(geometry.grid_w * geometry.grid_h);
                for gy in 0..geometry.grid_h {
                    for gx in 0..geometry.grid_w {
                        let p = rot * Vector2::new(gx as f64 - cx, gy as f64 - cy);
                        let x = (p.x + ox).round() as isize;
                        let y = (p.y + oy).round() as isize;
                        grid.push(x + y * pw);
                    }
                }
                grid
            })
            .collect();

        Ok(Self {
            pad: geometry.pad,
            padded_w: geometry.padded_width(),
            grid_w: geometry.grid_w,
            grid_h: geometry.grid_h,
            origin: geometry.origin,
            grids,
        })
    }

    #[inline]
    pub fn num_directions(&self) -> usize {
        self.grids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(origin: GridOrigin, grid: usize, pad: usize) -> GridGeometry {
        GridGeometry {
            image_w: 32,
            image_h: 32,
            pad,
            start_angle: std::f64::consts::FRAC_PI_2,
            num_directions: 16,
            grid_w: grid,
            grid_h: grid,
            origin,
        }
    }

    #[test]
    fn rejects_narrow_margin() {
        let err = GridOffsets::new(&geometry(GridOrigin::RelativeToOrigin, 24, 4)).unwrap_err();
        assert_eq!(
            err,
            StageError::InsufficientPadding {
                required: 5,
                available: 4
            }
        );
    }

    #[test]
    fn vertical_direction_rows_run_down_columns() {
        let offsets = GridOffsets::new(&geometry(GridOrigin::RelativeToCenter, 3, 2)).unwrap();
        let pw = offsets.padded_w as isize;
        let grid = &offsets.grids[0];
        // Row 0 of a grid rotated to vertical is one column.
        let row0 = &grid[0..3];
        assert_eq!(row0[1] - row0[0], pw);
        assert_eq!(row0[2] - row0[1], pw);
        // Center cell maps onto the center pixel.
        assert_eq!(grid[4], 0);
    }

    #[test]
    fn origin_offsets_stay_inside_padded_window() {
        let params = LfsParams::default();
        let geom = GridGeometry::dft_window(64, 64, params.max_padding(), &params);
        let offsets = GridOffsets::new(&geom).unwrap();
        let pw = offsets.padded_w as isize;
        let rot_pad = geom.required_pad() as isize;
        let ws = params.window_size as isize;
        for grid in &offsets.grids {
            for &off in grid {
                let y = (off + rot_pad * (pw + 1)).div_euclid(pw) - rot_pad;
                let x = off - y * pw;
                assert!(x >= -rot_pad && x < ws + rot_pad, "x={x}");
                assert!(y >= -rot_pad && y < ws + rot_pad, "y={y}");
            }
        }
    }
}
