//! Clean-up passes over the raw direction map.
//!
//! Each pass reads from a snapshot of its input so results do not depend on
//! scan order.

use super::{BlockMap, INVALID_DIR, RING};
use crate::params::LfsParams;
use crate::tables::{direction_distance, AngleTable};

fn valid_neighbours(map: &BlockMap, x: usize, y: usize) -> impl Iterator<Item = i32> + '_ {
    RING.iter().filter_map(move |&(dx, dy)| {
        map.get_signed(x as isize + dx, y as isize + dy)
            .filter(|&d| d != INVALID_DIR)
    })
}

/// Invalidates directions supported by fewer than `rmv_valid_nbr_min`
/// neighbours within `dir_distance_max`. Returns the number removed.
pub(crate) fn remove_inconsistent_directions(
    direction: &mut BlockMap,
    params: &LfsParams,
) -> usize {
    let snapshot = direction.clone();
    let mut removed = 0;
    for y in 0..snapshot.h {
        for x in 0..snapshot.w {
            let dir = snapshot.get(x, y);
            if dir == INVALID_DIR {
                continue;
            }
            let agreeing = valid_neighbours(&snapshot, x, y)
                .filter(|&n| {
                    direction_distance(dir, n, params.num_directions) <= params.dir_distance_max
                })
                .count();
            if agreeing < params.rmv_valid_nbr_min {
                direction.set(x, y, INVALID_DIR);
                removed += 1;
            }
        }
    }
    removed
}

/// Fills invalid blocks that have contrast from the vector mean of their
/// valid neighbours. Every such block is flagged in `low_flow`, filled or not.
pub(crate) fn interpolate_direction_map(
    direction: &mut BlockMap,
    low_contrast: &BlockMap,
    low_flow: &mut BlockMap,
    angles: &AngleTable,
    params: &LfsParams,
) {
    let snapshot = direction.clone();
    for y in 0..snapshot.h {
        for x in 0..snapshot.w {
            if snapshot.get(x, y) != INVALID_DIR || low_contrast.get(x, y) != 0 {
                continue;
            }
            low_flow.set(x, y, 1);
            let (mut c, mut s, mut n) = (0.0, 0.0, 0usize);
            for d in valid_neighbours(&snapshot, x, y) {
                c += angles.cos[d as usize];
                s += angles.sin[d as usize];
                n += 1;
            }
            if n >= params.min_interpolate_nbrs.max(1) {
                direction.set(x, y, angles.direction_of(c, s));
            }
        }
    }
}

/// Replaces each valid direction by the mean of its 3×3 neighbourhood when
/// enough neighbours are valid and they agree strongly enough.
pub(crate) fn smooth_direction_map(
    direction: &mut BlockMap,
    angles: &AngleTable,
    params: &LfsParams,
) {
    let snapshot = direction.clone();
    for y in 0..snapshot.h {
        for x in 0..snapshot.w {
            let dir = snapshot.get(x, y);
            if dir == INVALID_DIR {
                continue;
            }
            let (mut c, mut s) = (angles.cos[dir as usize], angles.sin[dir as usize]);
            let mut n = 1usize;
            for d in valid_neighbours(&snapshot, x, y) {
                c += angles.cos[d as usize];
                s += angles.sin[d as usize];
                n += 1;
            }
            if n < params.smth_valid_nbr_min {
                continue;
            }
            let strength = (c * c + s * s).sqrt() / n as f64;
            if strength >= params.dir_strength_min {
                direction.set(x, y, angles.direction_of(c, s));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(w: usize, h: usize, dir: i32) -> BlockMap {
        BlockMap::filled(w, h, dir)
    }

    #[test]
    fn isolated_outlier_is_removed() {
        let params = LfsParams::default();
        let mut map = uniform(5, 5, 4);
        map.set(2, 2, 12);
        let removed = remove_inconsistent_directions(&mut map, &params);
        assert_eq!(removed, 1);
        assert_eq!(map.get(2, 2), INVALID_DIR);
        assert_eq!(map.get(1, 1), 4);
    }

    #[test]
    fn hole_is_interpolated_and_flagged_low_flow() {
        let params = LfsParams::default();
        let angles = AngleTable::new(16).unwrap();
        let mut map = uniform(3, 3, 6);
        map.set(1, 1, INVALID_DIR);
        let low_contrast = BlockMap::filled(3, 3, 0);
        let mut low_flow = BlockMap::filled(3, 3, 0);
        interpolate_direction_map(&mut map, &low_contrast, &mut low_flow, &angles, &params);
        assert_eq!(map.get(1, 1), 6);
        assert_eq!(low_flow.get(1, 1), 1);
        assert_eq!(low_flow.count_set(), 1);
    }

    #[test]
    fn low_contrast_blocks_stay_invalid() {
        let params = LfsParams::default();
        let angles = AngleTable::new(16).unwrap();
        let mut map = uniform(3, 3, 6);
        map.set(1, 1, INVALID_DIR);
        let mut low_contrast = BlockMap::filled(3, 3, 0);
        low_contrast.set(1, 1, 1);
        let mut low_flow = BlockMap::filled(3, 3, 0);
        interpolate_direction_map(&mut map, &low_contrast, &mut low_flow, &angles, &params);
        assert_eq!(map.get(1, 1), INVALID_DIR);
        assert_eq!(low_flow.count_set(), 0);
    }

    #[test]
    fn smoothing_pulls_toward_neighbourhood_mean() {
        let params = LfsParams::default();
        let angles = AngleTable::new(16).unwrap();
        let mut map = uniform(3, 3, 8);
        map.set(1, 1, 9);
        smooth_direction_map(&mut map, &angles, &params);
        assert_eq!(map.get(1, 1), 8);
        // Corners see only four valid blocks and are left alone.
        assert_eq!(map.get(0, 0), 8);
    }
}
