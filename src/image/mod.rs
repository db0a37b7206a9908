pub mod f32;
pub mod io;
pub mod rgb;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::rgb::RgbImageF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
