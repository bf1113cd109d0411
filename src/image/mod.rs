//! Image buffers used by the pipeline.
//!
//! - [`RgbaFrame`] / [`FrameBuffer`]: validated 4-channel camera frames.
//! - [`GrayImage`]: owned 8-bit intensity images and binary maps.
//! - [`ImageF32`]: float buffers for gradient computation.
//! - [`io`]: file helpers for the demo binary.

pub mod f32;
pub mod gray;
pub mod io;
pub mod rgba;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::gray::GrayImage;
pub use self::rgba::{FrameBuffer, FrameError, RgbaFrame};
pub use self::traits::{ImageView, ImageViewMut};
