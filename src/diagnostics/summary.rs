use crate::maps::INVALID_DIR;
use crate::quality::{quality_histogram, QUALITY_LEVELS};
use crate::types::MapBundle;
use serde::Serialize;

/// Block counts of a [`MapBundle`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSummary {
    pub total_blocks: usize,
    pub valid_directions: usize,
    pub low_contrast_blocks: usize,
    pub low_flow_blocks: usize,
    pub high_curve_blocks: usize,
    /// Blocks per quality level 0..=4.
    pub quality_histogram: [usize; QUALITY_LEVELS],
    /// Ridge pixels of the binarized image, if one was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ridge_pixels: Option<usize>,
}

impl MapSummary {
    pub fn from_bundle(bundle: &MapBundle) -> Self {
        Self {
            total_blocks: bundle.block_w * bundle.block_h,
            valid_directions: bundle
                .direction
                .data
                .iter()
                .filter(|&&d| d != INVALID_DIR)
                .count(),
            low_contrast_blocks: bundle.low_contrast.count_set(),
            low_flow_blocks: bundle.low_flow.count_set(),
            high_curve_blocks: bundle.high_curve.count_set(),
            quality_histogram: quality_histogram(&bundle.quality),
            ridge_pixels: bundle
                .binarized
                .as_ref()
                .map(|b| b.data.iter().filter(|&&v| v != 0).count()),
        }
    }
}
