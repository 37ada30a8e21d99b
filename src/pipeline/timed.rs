use super::stages::MapStages;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::TimingBreakdown;
use crate::error::StageError;
use crate::image::{ImageBufU8, ImageU8};
use crate::maps::{BlockMap, BlockMaps};
use crate::params::LfsParams;
use crate::tables::{GridGeometry, GridOrigin};
use std::cell::RefCell;
use std::collections::TryReserveError;
use std::time::Instant;

/// Stage wrapper that records the duration of every call.
pub(crate) struct TimedStages<'a, S> {
    inner: &'a S,
    timings: RefCell<TimingBreakdown>,
}

impl<'a, S: MapStages> TimedStages<'a, S> {
    pub(crate) fn new(inner: &'a S) -> Self {
        Self {
            inner,
            timings: RefCell::new(TimingBreakdown::default()),
        }
    }

    pub(crate) fn into_timings(self) -> TimingBreakdown {
        self.timings.into_inner()
    }

    fn timed<T>(&self, label: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.timings.borrow_mut().push(label, elapsed_ms(start));
        out
    }
}

impl<S: MapStages> MapStages for TimedStages<'_, S> {
    type AngleTable = S::AngleTable;
    type WaveTable = S::WaveTable;
    type GridOffsets = S::GridOffsets;
    type Image = S::Image;

    fn build_angle_table(&self, num_directions: usize) -> Result<Self::AngleTable, StageError> {
        self.timed("angle_table", || self.inner.build_angle_table(num_directions))
    }

    fn build_wave_table(
        &self,
        coefs: &[f64],
        num_waves: usize,
        window_size: usize,
    ) -> Result<Self::WaveTable, StageError> {
        self.timed("wave_table", || {
            self.inner.build_wave_table(coefs, num_waves, window_size)
        })
    }

    fn build_grid_offsets(&self, geometry: &GridGeometry) -> Result<Self::GridOffsets, StageError> {
        let label = match geometry.origin {
            GridOrigin::RelativeToOrigin => "dft_grids",
            GridOrigin::RelativeToCenter => "binarization_grids",
        };
        self.timed(label, || self.inner.build_grid_offsets(geometry))
    }

    fn pad_image(
        &self,
        input: ImageU8<'_>,
        pad: usize,
        pad_value: u8,
    ) -> Result<Self::Image, StageError> {
        self.timed("pad_image", || self.inner.pad_image(input, pad, pad_value))
    }

    fn duplicate_image(&self, input: ImageU8<'_>) -> Result<Self::Image, TryReserveError> {
        self.timed("duplicate_image", || self.inner.duplicate_image(input))
    }

    fn rescale_depth_8_to_6(&self, image: &mut Self::Image) {
        self.timed("rescale", || self.inner.rescale_depth_8_to_6(image))
    }

    fn generate_block_maps(
        &self,
        image: &Self::Image,
        angles: &Self::AngleTable,
        waves: &Self::WaveTable,
        grids: &Self::GridOffsets,
        params: &LfsParams,
    ) -> Result<BlockMaps, StageError> {
        self.timed("block_maps", || {
            self.inner
                .generate_block_maps(image, angles, waves, grids, params)
        })
    }

    fn binarize(
        &self,
        image: &Self::Image,
        direction_map: &BlockMap,
        grids: &Self::GridOffsets,
        params: &LfsParams,
    ) -> Result<ImageBufU8, StageError> {
        self.timed("binarize", || {
            self.inner.binarize(image, direction_map, grids, params)
        })
    }

    fn synthesize_quality_map(&self, maps: &BlockMaps) -> Result<BlockMap, StageError> {
        self.timed("quality_map", || self.inner.synthesize_quality_map(maps))
    }

    fn invert_binary_polarity(&self, image: &mut ImageBufU8) {
        self.timed("invert", || self.inner.invert_binary_polarity(image))
    }
}
