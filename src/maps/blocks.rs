use crate::error::StageError;

/// Block grid dimensions for a padded image.
///
/// The margin is stripped before tiling, so padding never adds blocks.
pub fn block_grid_dims(
    padded_w: usize,
    padded_h: usize,
    pad: usize,
    block_size: usize,
) -> (usize, usize) {
    let iw = padded_w.saturating_sub(2 * pad);
    let ih = padded_h.saturating_sub(2 * pad);
    let bs = block_size.max(1);
    (iw.div_ceil(bs), ih.div_ceil(bs))
}

/// Placement of the block grid inside a padded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    pub image_w: usize,
    pub image_h: usize,
    pub pad: usize,
    pub padded_w: usize,
    pub block_size: usize,
    pub blocks_w: usize,
    pub blocks_h: usize,
}

impl BlockLayout {
    pub fn new(
        padded_w: usize,
        padded_h: usize,
        pad: usize,
        block_size: usize,
    ) -> Result<Self, StageError> {
        if block_size == 0 {
            return Err(StageError::invalid_parameter("block_size", block_size));
        }
        let image_w = padded_w.saturating_sub(2 * pad);
        let image_h = padded_h.saturating_sub(2 * pad);
        if image_w < block_size || image_h < block_size {
            return Err(StageError::InvalidDimensions {
                width: image_w,
                height: image_h,
            });
        }
        let (blocks_w, blocks_h) = block_grid_dims(padded_w, padded_h, pad, block_size);
        Ok(Self {
            image_w,
            image_h,
            pad,
            padded_w,
            block_size,
            blocks_w,
            blocks_h,
        })
    }

    #[inline]
    fn axis_origin(&self, b: usize, extent: usize) -> usize {
        (b * self.block_size).min(extent - self.block_size)
    }

    /// Upper-left corner of block `(bx, by)` in padded coordinates.
    #[inline]
    pub fn origin(&self, bx: usize, by: usize) -> (usize, usize) {
        (
            self.pad + self.axis_origin(bx, self.image_w),
            self.pad + self.axis_origin(by, self.image_h),
        )
    }

    /// Block containing unpadded pixel `(x, y)`.
    #[inline]
    pub fn block_of_pixel(&self, x: usize, y: usize) -> (usize, usize) {
        (
            (x / self.block_size).min(self.blocks_w - 1),
            (y / self.block_size).min(self.blocks_h - 1),
        )
    }
}
