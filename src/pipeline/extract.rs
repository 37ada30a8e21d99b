use super::stages::{LfsStages, MapStages};
use crate::error::{MapsError, StageError};
use crate::image::ImageU8;
use crate::params::LfsParams;
use crate::tables::{GridGeometry, DFT_COEFS};
use crate::types::{MapBundle, MapSet};
use log::debug;

/// Pixel depth the pipeline accepts.
pub const SUPPORTED_DEPTH: u32 = 8;

/// Angle, wave and DFT grid tables for one invocation.
///
/// Built in that order; a failure drops the tables already built.
/// Fields drop in declaration order.
struct LookupTables<S: MapStages> {
    angles: S::AngleTable,
    waves: S::WaveTable,
    grids: S::GridOffsets,
}

impl<S: MapStages> LookupTables<S> {
    fn provision(
        stages: &S,
        image_w: usize,
        image_h: usize,
        pad: usize,
        params: &LfsParams,
    ) -> Result<Self, MapsError> {
        let angles = stages
            .build_angle_table(params.num_directions)
            .map_err(MapsError::AngleTable)?;
        let waves = stages
            .build_wave_table(&DFT_COEFS, params.num_dft_waves, params.window_size)
            .map_err(MapsError::WaveTable)?;
        let grids = stages
            .build_grid_offsets(&GridGeometry::dft_window(image_w, image_h, pad, params))
            .map_err(MapsError::GridOffsets)?;
        Ok(Self {
            angles,
            waves,
            grids,
        })
    }
}

/// Padded (or, without margin, duplicated) 6-bit working copy of `image`.
fn prepare_working_image<S: MapStages>(
    stages: &S,
    image: ImageU8<'_>,
    pad: usize,
    params: &LfsParams,
) -> Result<S::Image, MapsError> {
    let mut work = if pad == 0 {
        stages
            .duplicate_image(image)
            .map_err(|source| MapsError::Allocation {
                width: image.w,
                height: image.h,
                source,
            })?
    } else {
        stages
            .pad_image(image, pad, params.pad_value)
            .map_err(MapsError::Padding)?
    };
    stages.rescale_depth_8_to_6(&mut work);
    Ok(work)
}

/// Block maps and, when `binarize` is set, the binarized image of `image`.
///
/// The input depth is not checked; see [`get_maps`] for the validated entry
/// point. No partial result is returned on failure.
pub fn extract_block_maps<S: MapStages>(
    stages: &S,
    image: ImageU8<'_>,
    params: &LfsParams,
    binarize: bool,
) -> Result<MapSet, MapsError> {
    run_extraction(stages, image, params, binarize).inspect_err(|err| {
        debug!("extract_block_maps {}x{} failed: {err}", image.w, image.h);
    })
}

fn run_extraction<S: MapStages>(
    stages: &S,
    image: ImageU8<'_>,
    params: &LfsParams,
    binarize: bool,
) -> Result<MapSet, MapsError> {
    let (iw, ih) = (image.w, image.h);
    // The margin always covers the binarization grid, requested or not.
    let max_pad = params.max_padding();
    debug!("extract_block_maps {iw}x{ih} max_pad={max_pad} binarize={binarize}");

    let tables = LookupTables::provision(stages, iw, ih, max_pad, params)?;
    let work = prepare_working_image(stages, image, max_pad, params)?;
    debug!("working image ready ({}x{})", iw + 2 * max_pad, ih + 2 * max_pad);

    let maps = stages.generate_block_maps(
        &work,
        &tables.angles,
        &tables.waves,
        &tables.grids,
        params,
    );
    drop(tables);
    let maps = maps
        .and_then(|maps| maps.check_consistent().map(|()| maps))
        .map_err(MapsError::BlockMaps)?;
    let (bw, bh) = maps.dims();
    debug!("block maps {bw}x{bh}");

    if !binarize {
        drop(work);
        return Ok(MapSet {
            maps,
            binarized: None,
        });
    }

    let grids = stages
        .build_grid_offsets(&GridGeometry::binarization(iw, ih, max_pad, params))
        .map_err(MapsError::BinarizationGrid)?;
    let padded = stages.binarize(&work, &maps.direction, &grids, params);
    drop(grids);
    drop(work);
    let padded = padded.map_err(MapsError::Binarization)?;

    let mut binarized = padded.crop(max_pad, max_pad, iw, ih).ok_or_else(|| {
        MapsError::Binarization(StageError::DimensionMismatch {
            expected_w: iw + 2 * max_pad,
            expected_h: ih + 2 * max_pad,
            actual_w: padded.w,
            actual_h: padded.h,
        })
    })?;
    drop(padded);
    stages.invert_binary_polarity(&mut binarized);
    debug!("binarized image {}x{}", binarized.w, binarized.h);

    Ok(MapSet {
        maps,
        binarized: Some(binarized),
    })
}

/// Quality, direction, low-contrast, low-flow and high-curvature maps of an
/// 8-bit grayscale image, plus the binarized image when `binarize` is set.
pub fn get_maps(
    image: ImageU8<'_>,
    depth: u32,
    params: &LfsParams,
    binarize: bool,
) -> Result<MapBundle, MapsError> {
    get_maps_with(&LfsStages, image, depth, params, binarize)
}

/// [`get_maps`] over caller-supplied stages.
pub fn get_maps_with<S: MapStages>(
    stages: &S,
    image: ImageU8<'_>,
    depth: u32,
    params: &LfsParams,
    binarize: bool,
) -> Result<MapBundle, MapsError> {
    if depth != SUPPORTED_DEPTH {
        debug!("get_maps rejected input depth {depth}");
        return Err(MapsError::InvalidDepth { depth });
    }
    let set = extract_block_maps(stages, image, params, binarize)?;
    let quality = stages
        .synthesize_quality_map(&set.maps)
        .and_then(|quality| {
            let (w, h) = set.maps.dims();
            if quality.dims() != (w, h) {
                return Err(StageError::DimensionMismatch {
                    expected_w: w,
                    expected_h: h,
                    actual_w: quality.w,
                    actual_h: quality.h,
                });
            }
            Ok(quality)
        })
        .map_err(MapsError::QualityMap)
        .inspect_err(|err| debug!("get_maps failed: {err}"))?;
    Ok(MapBundle::new(quality, set))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_checked_first() {
        let raw = [0u8; 4];
        let err = get_maps(ImageU8::new(2, 2, &raw), 16, &LfsParams::default(), true).unwrap_err();
        assert!(matches!(err, MapsError::InvalidDepth { depth: 16 }));
    }

    #[test]
    fn tiny_image_fails_in_block_map_generation() {
        let raw = [100u8; 16];
        let err = get_maps(ImageU8::new(4, 4, &raw), 8, &LfsParams::default(), false).unwrap_err();
        assert!(matches!(
            err,
            MapsError::BlockMaps(StageError::InvalidDimensions { width: 4, height: 4 })
        ));
    }

    #[test]
    fn zero_directions_fail_in_angle_table() {
        let raw = [100u8; 64 * 64];
        let params = LfsParams {
            num_directions: 0,
            ..LfsParams::default()
        };
        let err = get_maps(ImageU8::new(64, 64, &raw), 8, &params, false).unwrap_err();
        assert!(matches!(err, MapsError::AngleTable(_)));
    }
}
