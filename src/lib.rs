#![doc = include_str!("../README.md")]

// Public modules
pub mod binarize;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod maps;
pub mod params;
pub mod pipeline;
pub mod quality;
pub mod tables;
pub mod types;

// --- High-level re-exports -------------------------------------------------

// Entry points and results.
pub use crate::error::{MapsError, StageError};
pub use crate::params::LfsParams;
pub use crate::pipeline::{
    extract_block_maps, extract_maps_batch, get_maps, get_maps_with, LfsStages, MapExtractor,
    MapStages,
};
pub use crate::types::{MapBundle, MapSet};

// Diagnostics returned by the extractor.
pub use crate::diagnostics::{MapsReport, MapsTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use ridge_maps::prelude::*;
///
/// # fn main() {
/// let (w, h) = (256usize, 256usize);
/// let gray = vec![128u8; w * h];
/// let img = ImageU8::new(w, h, &gray);
///
/// let extractor = MapExtractor::new(LfsParams::default());
/// match extractor.process(img, 8) {
///     Ok(maps) => println!("{}x{} blocks", maps.block_w, maps.block_h),
///     Err(err) => eprintln!("{err}"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageBufU8, ImageU8};
    pub use crate::maps::BlockMap;
    pub use crate::{get_maps, LfsParams, MapBundle, MapExtractor, MapsError};
}
