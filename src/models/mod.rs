pub mod generation;
pub mod image;
pub mod style;

pub use generation::*;
pub use image::*;
pub use style::*;
