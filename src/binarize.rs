//! Directional binarization of the padded image.
//!
//! Each pixel is compared against the rotated neighbourhood of its block's
//! ridge direction: the row through the pixel runs along the ridge, so a
//! center row darker than the neighbourhood average marks a ridge pixel.
//! Pixels of blocks without a direction, and the margin, come out white.

use crate::error::StageError;
use crate::image::ImageBufU8;
use crate::maps::{BlockLayout, BlockMap, INVALID_DIR};
use crate::params::LfsParams;
use crate::tables::{GridOffsets, GridOrigin};

pub const WHITE_PIXEL: u8 = 255;
pub const BLACK_PIXEL: u8 = 0;

/// Binarizes `image` (padded, 6-bit) against `direction_map`.
///
/// Returns an image of the same padded dimensions with pixels set to
/// [`BLACK_PIXEL`] or [`WHITE_PIXEL`].
pub fn binarize_directional(
    image: &ImageBufU8,
    direction_map: &BlockMap,
    grids: &GridOffsets,
    params: &LfsParams,
) -> Result<ImageBufU8, StageError> {
    if grids.origin != GridOrigin::RelativeToCenter {
        return Err(StageError::invalid_parameter("grid_origin", format!("{:?}", grids.origin)));
    }
    if grids.padded_w != image.w {
        return Err(StageError::DimensionMismatch {
            expected_w: grids.padded_w,
            expected_h: image.h,
            actual_w: image.w,
            actual_h: image.h,
        });
    }
    let layout = BlockLayout::new(image.w, image.h, grids.pad, params.block_size)?;
    if direction_map.dims() != (layout.blocks_w, layout.blocks_h) {
        return Err(StageError::DimensionMismatch {
            expected_w: layout.blocks_w,
            expected_h: layout.blocks_h,
            actual_w: direction_map.w,
            actual_h: direction_map.h,
        });
    }
    if grids.grids.len() < params.num_directions {
        return Err(StageError::invalid_parameter(
            "num_directions",
            format!("{} (grid has {})", params.num_directions, grids.grids.len()),
        ));
    }

    let mut out = ImageBufU8::filled(image.w, image.h, WHITE_PIXEL);
    let center_row = grids.grid_h / 2;
    let gh = grids.grid_h as u32;
    for y in 0..layout.image_h {
        for x in 0..layout.image_w {
            let (bx, by) = layout.block_of_pixel(x, y);
            let dir = direction_map.get(bx, by);
            if dir == INVALID_DIR || dir as usize >= grids.grids.len() {
                continue;
            }
            let (px, py) = (x + grids.pad, y + grids.pad);
            let center = image.idx(px, py) as isize;
            let grid = &grids.grids[dir as usize];
            let mut gsum = 0u32;
            let mut csum = 0u32;
            for (gy, row) in grid.chunks_exact(grids.grid_w).enumerate() {
                let sum: u32 = row
                    .iter()
                    .map(|&off| image.data[(center + off) as usize] as u32)
                    .sum();
                gsum += sum;
                if gy == center_row {
                    csum = sum;
                }
            }
            if csum * gh < gsum {
                out.set(px, py, BLACK_PIXEL);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::GridGeometry;

    fn params() -> LfsParams {
        LfsParams::default()
    }

    /// 6-bit image with a dark vertical ridge at column `ridge_x`.
    fn ridge_image(w: usize, h: usize, pad: usize, ridge_x: usize) -> ImageBufU8 {
        let mut img = ImageBufU8::filled(w + 2 * pad, h + 2 * pad, 40);
        for y in 0..h + 2 * pad {
            img.set(ridge_x + pad, y, 5);
        }
        img
    }

    #[test]
    fn ridge_pixels_turn_black() {
        let p = params();
        let (w, h, pad) = (32, 32, 6);
        let img = ridge_image(w, h, pad, 16);
        let grids = GridOffsets::new(&GridGeometry::binarization(w, h, pad, &p)).unwrap();
        let dirs = BlockMap::filled(4, 4, 0);
        let bin = binarize_directional(&img, &dirs, &grids, &p).unwrap();
        assert_eq!(bin.get(16 + pad, 10 + pad), BLACK_PIXEL);
        assert_eq!(bin.get(12 + pad, 10 + pad), WHITE_PIXEL);
        assert_eq!(bin.get(0, 0), WHITE_PIXEL, "margin stays white");
    }

    #[test]
    fn blocks_without_direction_are_white() {
        let p = params();
        let (w, h, pad) = (32, 32, 6);
        let img = ridge_image(w, h, pad, 16);
        let grids = GridOffsets::new(&GridGeometry::binarization(w, h, pad, &p)).unwrap();
        let dirs = BlockMap::filled(4, 4, INVALID_DIR);
        let bin = binarize_directional(&img, &dirs, &grids, &p).unwrap();
        assert!(bin.data.iter().all(|&v| v == WHITE_PIXEL));
    }

    #[test]
    fn direction_map_must_match_block_grid() {
        let p = params();
        let img = ImageBufU8::filled(44, 44, 40);
        let grids = GridOffsets::new(&GridGeometry::binarization(32, 32, 6, &p)).unwrap();
        let err = binarize_directional(&img, &BlockMap::filled(3, 4, 0), &grids, &p).unwrap_err();
        assert_eq!(
            err,
            StageError::DimensionMismatch {
                expected_w: 4,
                expected_h: 4,
                actual_w: 3,
                actual_h: 4
            }
        );
    }

    #[test]
    fn dft_grids_are_rejected() {
        let p = params();
        let img = ImageBufU8::filled(58, 58, 40);
        let grids = GridOffsets::new(&GridGeometry::dft_window(32, 32, 13, &p)).unwrap();
        let err = binarize_directional(&img, &BlockMap::filled(4, 4, 0), &grids, &p).unwrap_err();
        assert!(matches!(err, StageError::InvalidParameter { name: "grid_origin", .. }));
    }
}
