pub mod buf;
pub mod io;
pub mod ops;
pub mod traits;
pub mod u8;

pub use self::buf::ImageBufU8;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
