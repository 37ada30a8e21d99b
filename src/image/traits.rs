//! Read/write access shared by the borrowed input view and owned buffers.

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    /// The `width()` samples of row `y`, without stride padding.
    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    fn as_mut_slice(&mut self) -> Option<&mut [Self::Pixel]> {
        None
    }

    /// Apply `f` to every sample in place.
    fn map_in_place(&mut self, mut f: impl FnMut(Self::Pixel) -> Self::Pixel)
    where
        Self: Sized,
    {
        if let Some(all) = self.as_mut_slice() {
            all.iter_mut().for_each(|v| *v = f(*v));
            return;
        }
        for y in 0..self.height() {
            self.row_mut(y).iter_mut().for_each(|v| *v = f(*v));
        }
    }
}

/// Row iterator returned by [`ImageView::rows`].
pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
