use crate::image::ImageBufU8;
use crate::maps::{BlockMap, BlockMaps};
use serde::Serialize;

/// Output of [`extract_block_maps`](crate::pipeline::extract_block_maps):
/// the four block maps and, when requested, the binarized image at the
/// input resolution (ridge = 1, valley = 0).
#[derive(Clone, Debug)]
pub struct MapSet {
    pub maps: BlockMaps,
    pub binarized: Option<ImageBufU8>,
}

/// Everything [`get_maps`](crate::pipeline::get_maps) hands back to the caller.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapBundle {
    pub quality: BlockMap,
    pub direction: BlockMap,
    pub low_contrast: BlockMap,
    pub low_flow: BlockMap,
    pub high_curve: BlockMap,
    pub block_w: usize,
    pub block_h: usize,
    #[serde(skip)]
    pub binarized: Option<ImageBufU8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binarized_dims: Option<(usize, usize)>,
}

impl MapBundle {
    pub fn new(quality: BlockMap, set: MapSet) -> Self {
        let MapSet { maps, binarized } = set;
        let (block_w, block_h) = maps.dims();
        let binarized_dims = binarized.as_ref().map(|b| (b.w, b.h));
        Self {
            quality,
            direction: maps.direction,
            low_contrast: maps.low_contrast,
            low_flow: maps.low_flow,
            high_curve: maps.high_curve,
            block_w,
            block_h,
            binarized,
            binarized_dims,
        }
    }

    /// The five block maps in output order: quality, direction, low
    /// contrast, low flow, high curvature.
    pub fn block_maps(&self) -> [&BlockMap; 5] {
        [
            &self.quality,
            &self.direction,
            &self.low_contrast,
            &self.low_flow,
            &self.high_curve,
        ]
    }
}
