//! Owned 8-bit image in row-major layout (stride == width).
//!
//! Used for the padded working image and the binarized output. Unlike the
//! borrowed [`ImageU8`], construction from a view can fail gracefully when
//! memory cannot be reserved.
use super::traits::{ImageView, ImageViewMut};
use super::ImageU8;
use std::collections::TryReserveError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBufU8 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Bytes between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
}

impl ImageBufU8 {
    /// Buffer of size `w × h` with every sample set to `value`.
    pub fn filled(w: usize, h: usize, value: u8) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Wrap raw row-major bytes; `None` if the length does not match.
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Independent contiguous copy of `view`.
    pub fn try_from_view(view: ImageU8<'_>) -> Result<Self, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(view.w * view.h)?;
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Ok(Self {
            w: view.w,
            h: view.h,
            stride: view.w,
            data,
        })
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.w,
            h: self.h,
            stride: self.stride,
            data: &self.data,
        }
    }

    /// Copy of the `w × h` region starting at `(x0, y0)`, or `None` if the
    /// region does not fit.
    pub fn crop(&self, x0: usize, y0: usize, w: usize, h: usize) -> Option<Self> {
        if x0 + w > self.w || y0 + h > self.h {
            return None;
        }
        let mut data = Vec::with_capacity(w * h);
        for y in y0..y0 + h {
            let start = self.idx(x0, y);
            data.extend_from_slice(&self.data[start..start + w]);
        }
        Some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }
}

impl ImageView for ImageBufU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for ImageBufU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        let len = self.w * self.h;
        Some(&mut self.data[..len])
    }
}
