use super::blocks::BlockLayout;
use super::contrast::is_low_contrast;
use super::curvature::high_curvature_map;
use super::dft::{direction_powers, primary_direction, wave_stats};
use super::direction::{
    interpolate_direction_map, remove_inconsistent_directions, smooth_direction_map,
};
use super::{BlockMap, BlockMaps, INVALID_DIR};
use crate::error::StageError;
use crate::image::ImageBufU8;
use crate::params::LfsParams;
use crate::tables::padding::origin_grid_pad;
use crate::tables::{AngleTable, GridOffsets, GridOrigin, WaveTable};
use log::debug;

fn check_tables(
    angles: &AngleTable,
    waves: &WaveTable,
    grids: &GridOffsets,
    params: &LfsParams,
) -> Result<(), StageError> {
    if grids.origin != GridOrigin::RelativeToOrigin {
        return Err(StageError::invalid_parameter("grid_origin", format!("{:?}", grids.origin)));
    }
    if grids.grid_w != params.window_size || grids.grid_h != params.window_size {
        return Err(StageError::invalid_parameter(
            "window_size",
            format!("{} (grid is {}x{})", params.window_size, grids.grid_w, grids.grid_h),
        ));
    }
    if waves.window_size != grids.grid_h {
        return Err(StageError::invalid_parameter("wave_window", waves.window_size));
    }
    if angles.num_directions() != grids.num_directions() {
        return Err(StageError::invalid_parameter(
            "num_directions",
            format!("{} (grid has {})", angles.num_directions(), grids.num_directions()),
        ));
    }
    Ok(())
}

/// Produces the direction, low-contrast, low-flow and high-curvature maps of
/// a padded 6-bit image.
///
/// The image margin is taken from `grids`; the block grid covers the
/// unpadded extent only.
pub fn generate_block_maps(
    image: &ImageBufU8,
    angles: &AngleTable,
    waves: &WaveTable,
    grids: &GridOffsets,
    params: &LfsParams,
) -> Result<BlockMaps, StageError> {
    check_tables(angles, waves, grids, params)?;
    if grids.padded_w != image.w {
        return Err(StageError::DimensionMismatch {
            expected_w: grids.padded_w,
            expected_h: image.h,
            actual_w: image.w,
            actual_h: image.h,
        });
    }
    let layout = BlockLayout::new(image.w, image.h, grids.pad, params.block_size)?;

    let ws = params.window_size;
    let wo = params.window_offset;
    let reach = wo.max(ws.saturating_sub(wo + params.block_size));
    let required = reach + origin_grid_pad(ws, ws);
    if grids.pad < required {
        return Err(StageError::InsufficientPadding {
            required,
            available: grids.pad,
        });
    }

    let (mw, mh) = (layout.blocks_w, layout.blocks_h);
    let mut direction = BlockMap::filled(mw, mh, INVALID_DIR);
    let mut low_contrast = BlockMap::filled(mw, mh, 0);
    let mut low_flow = BlockMap::filled(mw, mh, 0);

    let mut rowsums = Vec::with_capacity(ws);
    for by in 0..mh {
        for bx in 0..mw {
            let (ox, oy) = layout.origin(bx, by);
            let (wx, wy) = (ox - wo, oy - wo);
            if is_low_contrast(
                image,
                wx,
                wy,
                ws,
                params.percentile_min_max,
                params.min_contrast_delta,
            ) {
                low_contrast.set(bx, by, 1);
                continue;
            }
            let origin = image.idx(wx, wy);
            let powers = direction_powers(&image.data, origin, grids, waves, &mut rowsums);
            let stats = wave_stats(&powers);
            if let Some(dir) = primary_direction(&stats, params) {
                direction.set(bx, by, dir as i32);
            }
        }
    }
    let initial_valid = direction.data.iter().filter(|&&d| d != INVALID_DIR).count();

    let removed = remove_inconsistent_directions(&mut direction, params);
    smooth_direction_map(&mut direction, angles, params);
    interpolate_direction_map(&mut direction, &low_contrast, &mut low_flow, angles, params);
    let high_curve = high_curvature_map(&direction, params);

    debug!(
        "generate_block_maps {}x{}: low_contrast={} dirs={} removed={} low_flow={} high_curve={}",
        mw,
        mh,
        low_contrast.count_set(),
        initial_valid,
        removed,
        low_flow.count_set(),
        high_curve.count_set()
    );

    Ok(BlockMaps {
        direction,
        low_contrast,
        low_flow,
        high_curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ops::{pad_image, rescale_depth_8_to_6};
    use crate::image::ImageU8;
    use crate::tables::{GridGeometry, DFT_COEFS};

    struct Fixture {
        angles: AngleTable,
        waves: WaveTable,
        grids: GridOffsets,
        image: ImageBufU8,
    }

    fn prepare(raw: &[u8], w: usize, h: usize, params: &LfsParams) -> Fixture {
        let pad = params.max_padding();
        let mut image = pad_image(ImageU8::new(w, h, raw), pad, params.pad_value).unwrap();
        rescale_depth_8_to_6(&mut image);
        Fixture {
            angles: AngleTable::new(params.num_directions).unwrap(),
            waves: WaveTable::new(&DFT_COEFS, params.num_dft_waves, params.window_size).unwrap(),
            grids: GridOffsets::new(&GridGeometry::dft_window(w, h, pad, params)).unwrap(),
            image,
        }
    }

    fn vertical_ridges(w: usize, h: usize) -> Vec<u8> {
        (0..h)
            .flat_map(|_| {
                (0..w).map(|x| {
                    let phase = 2.0 * std::f64::consts::PI * x as f64 / 8.0;
                    (128.0 + 60.0 * phase.cos()).round() as u8
                })
            })
            .collect()
    }

    #[test]
    fn flat_image_is_all_low_contrast() {
        let params = LfsParams::default();
        let raw = vec![128u8; 64 * 48];
        let f = prepare(&raw, 64, 48, &params);
        let maps = generate_block_maps(&f.image, &f.angles, &f.waves, &f.grids, &params).unwrap();
        assert_eq!(maps.dims(), (8, 6));
        assert_eq!(maps.low_contrast.count_set(), 48);
        assert!(maps.direction.data.iter().all(|&d| d == INVALID_DIR));
        assert_eq!(maps.low_flow.count_set(), 0);
    }

    #[test]
    fn vertical_ridges_yield_direction_zero() {
        let params = LfsParams::default();
        let raw = vertical_ridges(96, 96);
        let f = prepare(&raw, 96, 96, &params);
        let maps = generate_block_maps(&f.image, &f.angles, &f.waves, &f.grids, &params).unwrap();
        maps.check_consistent().unwrap();
        assert_eq!(maps.low_contrast.count_set(), 0);
        let zero = maps.direction.data.iter().filter(|&&d| d == 0).count();
        assert!(zero * 4 >= maps.direction.data.len() * 3, "only {zero} blocks vertical");
        assert_eq!(maps.direction.get(6, 6), 0);
        assert_eq!(maps.high_curve.count_set(), 0);
    }

    #[test]
    fn mismatched_grid_width_is_rejected() {
        let params = LfsParams::default();
        let raw = vec![128u8; 64 * 64];
        let f = prepare(&raw, 64, 64, &params);
        let geometry = GridGeometry::dft_window(70, 64, params.max_padding(), &params);
        let other = GridOffsets::new(&geometry).unwrap();
        let err = generate_block_maps(&f.image, &f.angles, &f.waves, &other, &params).unwrap_err();
        assert!(matches!(err, StageError::DimensionMismatch { .. }));
    }

    #[test]
    fn window_reaching_past_margin_is_rejected() {
        let params = LfsParams {
            window_offset: 2,
            ..LfsParams::default()
        };
        // Margin 7 covers the left reach (2 + 5) but not the right one (14 + 5).
        let raw = vec![128u8; 64 * 64];
        let f = prepare(&raw, 64, 64, &params);
        let err =
            generate_block_maps(&f.image, &f.angles, &f.waves, &f.grids, &params).unwrap_err();
        assert!(matches!(err, StageError::InsufficientPadding { required: 19, .. }));
    }
}
