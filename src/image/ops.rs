//! Whole-image sample operations used when preparing and finishing images.
use super::traits::{ImageView, ImageViewMut};
use super::{ImageBufU8, ImageU8};
use crate::error::StageError;

/// Copy `image` into the center of a buffer with a `pad`-pixel margin filled
/// with `pad_value`.
pub fn pad_image(image: ImageU8<'_>, pad: usize, pad_value: u8) -> Result<ImageBufU8, StageError> {
    if image.w == 0 || image.h == 0 {
        return Err(StageError::InvalidDimensions {
            width: image.w,
            height: image.h,
        });
    }
    let pw = image.w + 2 * pad;
    let ph = image.h + 2 * pad;
    let mut data = Vec::new();
    data.try_reserve_exact(pw * ph)
        .map_err(|_| StageError::OutOfMemory(pw * ph))?;
    data.resize(pw * ph, pad_value);
    let mut out = ImageBufU8 {
        w: pw,
        h: ph,
        stride: pw,
        data,
    };
    for (y, src) in image.rows().enumerate() {
        out.row_mut(y + pad)[pad..pad + image.w].copy_from_slice(src);
    }
    Ok(out)
}

/// Rescale 8-bit samples to the 6-bit range `[0, 63]` in place.
pub fn rescale_depth_8_to_6<I: ImageViewMut<Pixel = u8>>(image: &mut I) {
    image.map_in_place(|v| v >> 2);
}

/// Map every sample to `below` when it is under `threshold`, else `above`.
pub fn gray_to_binary<I: ImageViewMut<Pixel = u8>>(
    image: &mut I,
    threshold: u8,
    below: u8,
    above: u8,
) {
    image.map_in_place(|v| if v < threshold { below } else { above });
}

/// Convert black-on-white analysis output (ridge = 0, valley = 255) to
/// caller samples (ridge = 1, valley = 0).
pub fn invert_binary_polarity<I: ImageViewMut<Pixel = u8>>(image: &mut I) {
    gray_to_binary(image, 1, 1, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_surrounds_image_with_fill() {
        let raw = [10u8, 20, 30, 40];
        let padded = pad_image(ImageU8::new(2, 2, &raw), 1, 7).unwrap();
        assert_eq!((padded.w, padded.h), (4, 4));
        #[rustfmt::skip]
        let expected = vec![
            7, 7, 7, 7,
            7, 10, 20, 7,
            7, 30, 40, 7,
            7, 7, 7, 7,
        ];
        assert_eq!(padded.data, expected);
    }

    #[test]
    fn pad_rejects_empty_image() {
        let err = pad_image(ImageU8::new(0, 3, &[]), 2, 0).unwrap_err();
        assert_eq!(
            err,
            StageError::InvalidDimensions {
                width: 0,
                height: 3
            }
        );
    }

    #[test]
    fn rescale_maps_full_range_to_six_bits() {
        let mut img = ImageBufU8::from_raw(4, 1, vec![0, 3, 128, 255]).unwrap();
        rescale_depth_8_to_6(&mut img);
        assert_eq!(img.data, vec![0, 0, 32, 63]);
    }

    #[test]
    fn inversion_marks_black_as_ridge() {
        let mut img = ImageBufU8::from_raw(3, 1, vec![0, 255, 0]).unwrap();
        invert_binary_polarity(&mut img);
        assert_eq!(img.data, vec![1, 0, 1]);
    }
}
