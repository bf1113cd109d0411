//! Edge processing: Sobel gradients and Canny edge maps.
//!
//! - Gradient computation returning `gx`, `gy` and magnitude, used both by
//!   the Canny stage and by the segment detector.
//! - Canny with L1 magnitude, direction-quantized non-maximum suppression
//!   and 8-connected hysteresis, producing a binary `0/255` map.
//!
//! Borders are handled by clamping indices (replicate).

pub mod canny;
pub mod grad;

pub use canny::canny;
pub use grad::{sobel_gradients, Grad};
