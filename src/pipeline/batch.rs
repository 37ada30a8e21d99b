use super::extract::get_maps;
use crate::error::MapsError;
use crate::image::ImageU8;
use crate::params::LfsParams;
use crate::types::MapBundle;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs [`get_maps`] over independent images, in parallel with the
/// `parallel` feature. Results keep the order of `images`.
pub fn extract_maps_batch(
    images: &[ImageU8<'_>],
    depth: u32,
    params: &LfsParams,
    binarize: bool,
) -> Vec<Result<MapBundle, MapsError>> {
    #[cfg(feature = "parallel")]
    {
        images
            .par_iter()
            .map(|&image| get_maps(image, depth, params, binarize))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        images
            .iter()
            .map(|&image| get_maps(image, depth, params, binarize))
            .collect()
    }
}
