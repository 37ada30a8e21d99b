use super::extract::get_maps_with;
use super::stages::{LfsStages, MapStages};
use super::timed::TimedStages;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{InputDescriptor, MapSummary, MapsReport, MapsTrace};
use crate::error::MapsError;
use crate::image::ImageU8;
use crate::params::LfsParams;
use crate::types::MapBundle;
use log::debug;
use std::time::Instant;

/// Reusable map extractor holding its parameters and stages.
#[derive(Clone, Debug)]
pub struct MapExtractor<S = LfsStages> {
    params: LfsParams,
    stages: S,
    binarize: bool,
}

impl MapExtractor<LfsStages> {
    /// Extractor with the built-in stages; binarization is on.
    pub fn new(params: LfsParams) -> Self {
        Self::with_stages(params, LfsStages)
    }
}

impl<S: MapStages> MapExtractor<S> {
    pub fn with_stages(params: LfsParams, stages: S) -> Self {
        Self {
            params,
            stages,
            binarize: true,
        }
    }

    pub fn params(&self) -> &LfsParams {
        &self.params
    }

    pub fn set_params(&mut self, params: LfsParams) {
        self.params = params;
    }

    /// Toggle production of the binarized image.
    pub fn set_binarize(&mut self, binarize: bool) {
        self.binarize = binarize;
    }

    pub fn binarize(&self) -> bool {
        self.binarize
    }

    pub fn process(&self, image: ImageU8<'_>, depth: u32) -> Result<MapBundle, MapsError> {
        get_maps_with(&self.stages, image, depth, &self.params, self.binarize)
    }

    /// Like [`process`](Self::process), also reporting geometry, block
    /// counts and per-stage timings.
    pub fn process_with_diagnostics(
        &self,
        image: ImageU8<'_>,
        depth: u32,
    ) -> Result<MapsReport, MapsError> {
        let total_start = Instant::now();
        let timed = TimedStages::new(&self.stages);
        let bundle = get_maps_with(&timed, image, depth, &self.params, self.binarize)?;
        let mut timings = timed.into_timings();
        timings.total_ms = elapsed_ms(total_start);

        let max_pad = self.params.max_padding();
        let trace = MapsTrace {
            input: InputDescriptor {
                width: image.w,
                height: image.h,
                depth,
                binarize: self.binarize,
            },
            max_pad,
            padded_w: image.w + 2 * max_pad,
            padded_h: image.h + 2 * max_pad,
            blocks_w: bundle.block_w,
            blocks_h: bundle.block_h,
            summary: MapSummary::from_bundle(&bundle),
            timings,
        };
        debug!(
            "process_with_diagnostics {}x{} -> {}x{} blocks in {:.3} ms",
            image.w, image.h, trace.blocks_w, trace.blocks_h, trace.timings.total_ms
        );
        Ok(MapsReport { bundle, trace })
    }
}
