//! Directional DFT power analysis of one analysis window.
//!
//! For every direction the rotated window is reduced to row sums (rows run
//! along the direction). When the direction follows the ridges those sums
//! alternate ridge/valley, which shows up as power at the ridge frequency.

use crate::params::LfsParams;
use crate::tables::{GridOffsets, WaveTable};

/// Peak statistics of one waveform across all directions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct WaveStat {
    pub powmax: f64,
    pub powmax_dir: usize,
    pub pownorm: f64,
}

/// `powers[wave][dir]` for the window whose upper-left corner sits at linear
/// index `window_origin` of `data`.
pub(crate) fn direction_powers(
    data: &[u8],
    window_origin: usize,
    grids: &GridOffsets,
    waves: &WaveTable,
    rowsums: &mut Vec<f64>,
) -> Vec<Vec<f64>> {
    let mut powers = vec![vec![0.0; grids.num_directions()]; waves.waves.len()];
    let origin = window_origin as isize;
    for (dir, grid) in grids.grids.iter().enumerate() {
        rowsums.clear();
        for row in grid.chunks_exact(grids.grid_w) {
            let sum: u32 = row
                .iter()
                .map(|&off| data[(origin + off) as usize] as u32)
                .sum();
            rowsums.push(sum as f64);
        }
        for (w, wave) in waves.waves.iter().enumerate() {
            powers[w][dir] = waves.power(wave, &rowsums[..]);
        }
    }
    powers
}

pub(crate) fn wave_stats(powers: &[Vec<f64>]) -> Vec<WaveStat> {
    powers
        .iter()
        .map(|per_dir| {
            let mut powmax = 0.0;
            let mut powmax_dir = 0;
            let mut sum = 0.0;
            for (dir, &p) in per_dir.iter().enumerate() {
                sum += p;
                if p > powmax {
                    powmax = p;
                    powmax_dir = dir;
                }
            }
            let mean = sum / per_dir.len().max(1) as f64;
            let pownorm = if mean > 0.0 { powmax / mean } else { 0.0 };
            WaveStat {
                powmax,
                powmax_dir,
                pownorm,
            }
        })
        .collect()
}

/// Direction of the strongest waveform that passes the power thresholds.
pub(crate) fn primary_direction(stats: &[WaveStat], params: &LfsParams) -> Option<usize> {
    let mut order: Vec<&WaveStat> = stats.iter().collect();
    order.sort_by(|a, b| b.pownorm.total_cmp(&a.pownorm));
    order
        .into_iter()
        .find(|s| {
            s.powmax > params.powmax_min
                && s.pownorm > params.pownorm_min
                && s.powmax <= params.powmax_max
        })
        .map(|s| s.powmax_dir)
}
