//! Lookup tables used by map generation and binarization.
//!
//! - [`angle`] – doubled-angle unit vectors per quantized direction.
//! - [`waves`] – DFT waveforms sampled over the analysis window.
//! - [`grids`] – rotated sampling grids as offsets into the padded image.
//! - [`padding`] – margins the rotated grids require.

pub mod angle;
pub mod grids;
pub mod padding;
pub mod waves;

pub use angle::{direction_change, direction_distance, AngleTable};
pub use grids::{GridGeometry, GridOffsets, GridOrigin};
pub use padding::max_padding;
pub use waves::{Wave, WaveTable, DFT_COEFS};
