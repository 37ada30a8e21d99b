//! Map extraction pipeline.
//!
//! Stages
//! - Provision: angle table, DFT wave table, DFT grid offsets.
//! - Prepare: pad the input by the combined margin (or duplicate it when the
//!   margin is zero) and rescale to 6 bits.
//! - Maps: direction, low-contrast, low-flow and high-curvature block maps.
//! - Binarize (optional): binarization grid offsets, directional
//!   binarization, crop back to the input size, invert to ridge = 1.
//! - Quality: integrate the four maps into the quality map.
//!
//! Every stage is reached through [`MapStages`]; [`LfsStages`] is the
//! built-in implementation. Resources are owned by the function that
//! acquired them, so each failure path drops exactly what was built before
//! it.

mod batch;
mod extract;
mod extractor;
mod stages;
mod timed;

pub use batch::extract_maps_batch;
pub use extract::{extract_block_maps, get_maps, get_maps_with, SUPPORTED_DEPTH};
pub use extractor::MapExtractor;
pub use stages::{LfsStages, MapStages};
