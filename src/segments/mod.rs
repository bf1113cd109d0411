//! Line extraction from binary emphasis maps.
//!
//! Two extractors feed the geometric stages:
//!
//! - [`hough_segments`]: progressive probabilistic Hough transform, used on
//!   the horizontal-emphasis map to find string candidates.
//! - [`lsd_segments`]: a lightweight LSD-like detector, used on the
//!   vertical-emphasis map to find fret candidates. It performs:
//!   - Sobel gradients on the map rescaled to `{0, 1}`.
//!   - Region growing from seeds using orientation consistency: neighbours
//!     whose gradient orientation is within a tolerance of the seed
//!     orientation (π-periodic unless polarity is enforced) join the region.
//!   - PCA line fitting on the region's pixel moments; endpoints are the
//!     extreme projections onto the principal axis.
//!   - Significance checks on region size, length and aligned fraction.
//!
//!   A thin stroke produces a gradient ridge on each side, so one drawn line
//!   usually yields two parallel segments about two pixels apart. The fret
//!   stage merges these ridges.
//!
//! Neither extractor orders its output; callers see detector order.

mod extractor;
pub mod hough;
mod options;
mod region_accumulator;
mod segment;

pub use hough::{hough_segments, HoughOptions};
pub use options::LsdOptions;
pub use segment::{Line, Segment};

use crate::image::{GrayImage, ImageF32};

/// Run the LSD-like detector on a float image.
pub fn lsd_extract_segments(l: &ImageF32, options: LsdOptions) -> Vec<Segment> {
    extractor::LsdExtractor::new(l, options).extract()
}

/// Run the LSD-like detector on a binary `0/255` map.
pub fn lsd_segments(map: &GrayImage, options: LsdOptions) -> Vec<Segment> {
    lsd_extract_segments(&ImageF32::from_gray(map, 1.0 / 255.0), options)
}

#[cfg(test)]
mod tests;
