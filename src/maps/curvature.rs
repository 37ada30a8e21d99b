//! High-curvature block detection (cores, deltas, sharp bends).

use super::{BlockMap, INVALID_DIR, RING};
use crate::params::LfsParams;
use crate::tables::{direction_change, direction_distance};

/// Absolute net direction change walking once around the 8-ring of
/// `(x, y)`. Around a singular point this is half a turn; in smooth flow it
/// is zero. `None` when fewer than `min_valid` neighbours have a direction.
fn vorticity(
    map: &BlockMap,
    x: usize,
    y: usize,
    num_directions: usize,
    min_valid: usize,
) -> Option<usize> {
    let ring: Vec<i32> = RING
        .iter()
        .filter_map(|&(dx, dy)| map.get_signed(x as isize + dx, y as isize + dy))
        .filter(|&d| d != INVALID_DIR)
        .collect();
    if ring.len() < min_valid.max(2) {
        return None;
    }
    let mut total = 0i32;
    for (i, &from) in ring.iter().enumerate() {
        let to = ring[(i + 1) % ring.len()];
        total += direction_change(from, to, num_directions);
    }
    Some(total.unsigned_abs() as usize)
}

/// Number of valid neighbours whose direction departs from the center block
/// by more than `max_distance`.
fn curvature(
    map: &BlockMap,
    x: usize,
    y: usize,
    num_directions: usize,
    max_distance: usize,
) -> usize {
    let center = map.get(x, y);
    RING.iter()
        .filter_map(|&(dx, dy)| map.get_signed(x as isize + dx, y as isize + dy))
        .filter(|&d| d != INVALID_DIR)
        .filter(|&d| direction_distance(center, d, num_directions) > max_distance)
        .count()
}

/// Flags interior blocks with high vorticity or, for blocks with a
/// direction, high curvature.
pub(crate) fn high_curvature_map(direction: &BlockMap, params: &LfsParams) -> BlockMap {
    let mut out = BlockMap::filled(direction.w, direction.h, 0);
    if direction.w < 3 || direction.h < 3 {
        return out;
    }
    for y in 1..direction.h - 1 {
        for x in 1..direction.w - 1 {
            let vort = vorticity(direction, x, y, params.num_directions, params.vort_valid_nbr_min);
            if vort.is_some_and(|v| v >= params.highcurv_vorticity_min) {
                out.set(x, y, 1);
                continue;
            }
            if direction.get(x, y) == INVALID_DIR {
                continue;
            }
            if curvature(direction, x, y, params.num_directions, params.dir_distance_max)
                >= params.highcurv_curvature_min
            {
                out.set(x, y, 1);
            }
        }
    }
    out
}
