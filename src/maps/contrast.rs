//! Low-contrast window detection on the 6-bit working image.

use crate::image::ImageBufU8;

const NUM_BINS: usize = 64;

/// Returns true when the spread between the low and high
/// `percentile`-th intensities of the window is below `min_delta`.
///
/// `(wx, wy)` is the window's upper-left corner in padded coordinates.
pub(crate) fn is_low_contrast(
    image: &ImageBufU8,
    wx: usize,
    wy: usize,
    window_size: usize,
    percentile: usize,
    min_delta: u8,
) -> bool {
    let mut hist = [0usize; NUM_BINS];
    for y in wy..wy + window_size {
        let start = image.idx(wx, y);
        for &v in &image.data[start..start + window_size] {
            hist[(v as usize).min(NUM_BINS - 1)] += 1;
        }
    }
    let threshold = window_size * window_size * percentile.min(50) / 100;

    let mut acc = 0;
    let mut pmin = 0;
    for (i, &n) in hist.iter().enumerate() {
        acc += n;
        if acc > threshold {
            pmin = i;
            break;
        }
    }
    acc = 0;
    let mut pmax = NUM_BINS - 1;
    for (i, &n) in hist.iter().enumerate().rev() {
        acc += n;
        if acc > threshold {
            pmax = i;
            break;
        }
    }
    pmax.saturating_sub(pmin) < min_delta as usize
}
