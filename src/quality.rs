//! Integrated per-block quality (0 = unusable … 4 = best).
//!
//! Blocks without contrast or direction score 0. Usable blocks start at 4,
//! drop to 3 when flagged low-flow or high-curvature, and are capped by their
//! distance to the nearest unusable block (or the grid edge): 1 when adjacent,
//! 2 at distance two.

use crate::error::StageError;
use crate::maps::{BlockMap, BlockMaps, INVALID_DIR};

pub const QUALITY_LEVELS: usize = 5;

const NEIGHBOUR_RADIUS: isize = 2;

fn unusable(maps: &BlockMaps, x: isize, y: isize) -> bool {
    match (
        maps.direction.get_signed(x, y),
        maps.low_contrast.get_signed(x, y),
    ) {
        (Some(dir), Some(lc)) => dir == INVALID_DIR || lc != 0,
        _ => true,
    }
}

/// Combines the four block maps into one quality map of the same shape.
pub fn quality_map(maps: &BlockMaps) -> Result<BlockMap, StageError> {
    maps.check_consistent()?;
    let (w, h) = maps.dims();
    let mut out = BlockMap::filled(w, h, 0);
    for y in 0..h as isize {
        for x in 0..w as isize {
            if unusable(maps, x, y) {
                continue;
            }
            let (ux, uy) = (x as usize, y as usize);
            let mut q = if maps.low_flow.get(ux, uy) != 0 || maps.high_curve.get(ux, uy) != 0 {
                3
            } else {
                4
            };
            for dy in -NEIGHBOUR_RADIUS..=NEIGHBOUR_RADIUS {
                for dx in -NEIGHBOUR_RADIUS..=NEIGHBOUR_RADIUS {
                    if (dx, dy) == (0, 0) || !unusable(maps, x + dx, y + dy) {
                        continue;
                    }
                    let cap = if dx.abs().max(dy.abs()) == 1 { 1 } else { 2 };
                    q = q.min(cap);
                }
            }
            out.set(ux, uy, q);
        }
    }
    Ok(out)
}

/// Number of blocks at each quality level.
pub fn quality_histogram(quality: &BlockMap) -> [usize; QUALITY_LEVELS] {
    let mut hist = [0; QUALITY_LEVELS];
    for &q in &quality.data {
        hist[(q.max(0) as usize).min(QUALITY_LEVELS - 1)] += 1;
    }
    hist
}
