//! Collaborator seam of the extraction pipeline.

use crate::binarize::binarize_directional;
use crate::error::StageError;
use crate::image::ops;
use crate::image::{ImageBufU8, ImageU8};
use crate::maps::{self, BlockMap, BlockMaps};
use crate::params::LfsParams;
use crate::quality::quality_map;
use crate::tables::{AngleTable, GridGeometry, GridOffsets, WaveTable};
use std::collections::TryReserveError;

/// The stages the pipeline drives, in call order.
///
/// Resources are associated types so the orchestrator only ever moves,
/// borrows and drops them. Every `build_*`/`pad_image`/`duplicate_image`
/// success is an acquisition released by dropping the returned value.
pub trait MapStages {
    type AngleTable;
    type WaveTable;
    type GridOffsets;
    type Image;

    fn build_angle_table(&self, num_directions: usize) -> Result<Self::AngleTable, StageError>;

    fn build_wave_table(
        &self,
        coefs: &[f64],
        num_waves: usize,
        window_size: usize,
    ) -> Result<Self::WaveTable, StageError>;

    fn build_grid_offsets(&self, geometry: &GridGeometry) -> Result<Self::GridOffsets, StageError>;

    fn pad_image(
        &self,
        input: ImageU8<'_>,
        pad: usize,
        pad_value: u8,
    ) -> Result<Self::Image, StageError>;

    fn duplicate_image(&self, input: ImageU8<'_>) -> Result<Self::Image, TryReserveError>;

    fn rescale_depth_8_to_6(&self, image: &mut Self::Image);

    fn generate_block_maps(
        &self,
        image: &Self::Image,
        angles: &Self::AngleTable,
        waves: &Self::WaveTable,
        grids: &Self::GridOffsets,
        params: &LfsParams,
    ) -> Result<BlockMaps, StageError>;

    /// Binary image at the padded resolution of `image`.
    fn binarize(
        &self,
        image: &Self::Image,
        direction_map: &BlockMap,
        grids: &Self::GridOffsets,
        params: &LfsParams,
    ) -> Result<ImageBufU8, StageError>;

    fn synthesize_quality_map(&self, maps: &BlockMaps) -> Result<BlockMap, StageError>;

    fn invert_binary_polarity(&self, image: &mut ImageBufU8);
}

/// The crate's own stage implementations.
#[derive(Clone, Copy, Debug, Default)]
pub struct LfsStages;

impl MapStages for LfsStages {
    type AngleTable = AngleTable;
    type WaveTable = WaveTable;
    type GridOffsets = GridOffsets;
    type Image = ImageBufU8;

    fn build_angle_table(&self, num_directions: usize) -> Result<AngleTable, StageError> {
        AngleTable::new(num_directions)
    }

    fn build_wave_table(
        &self,
        coefs: &[f64],
        num_waves: usize,
        window_size: usize,
    ) -> Result<WaveTable, StageError> {
        WaveTable::new(coefs, num_waves, window_size)
    }

    fn build_grid_offsets(&self, geometry: &GridGeometry) -> Result<GridOffsets, StageError> {
        GridOffsets::new(geometry)
    }

    fn pad_image(
        &self,
        input: ImageU8<'_>,
        pad: usize,
        pad_value: u8,
    ) -> Result<ImageBufU8, StageError> {
        ops::pad_image(input, pad, pad_value)
    }

    fn duplicate_image(&self, input: ImageU8<'_>) -> Result<ImageBufU8, TryReserveError> {
        ImageBufU8::try_from_view(input)
    }

    fn rescale_depth_8_to_6(&self, image: &mut ImageBufU8) {
        ops::rescale_depth_8_to_6(image)
    }

    fn generate_block_maps(
        &self,
        image: &ImageBufU8,
        angles: &AngleTable,
        waves: &WaveTable,
        grids: &GridOffsets,
        params: &LfsParams,
    ) -> Result<BlockMaps, StageError> {
        maps::generate_block_maps(image, angles, waves, grids, params)
    }

    fn binarize(
        &self,
        image: &ImageBufU8,
        direction_map: &BlockMap,
        grids: &GridOffsets,
        params: &LfsParams,
    ) -> Result<ImageBufU8, StageError> {
        binarize_directional(image, direction_map, grids, params)
    }

    fn synthesize_quality_map(&self, maps: &BlockMaps) -> Result<BlockMap, StageError> {
        quality_map(maps)
    }

    fn invert_binary_polarity(&self, image: &mut ImageBufU8) {
        ops::invert_binary_polarity(image)
    }
}
