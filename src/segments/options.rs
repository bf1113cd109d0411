use serde::{Deserialize, Serialize};

/// Region-growing thresholds of the LSD-like segment detector.
///
/// Magnitudes are in Sobel units of the input image; binary maps are fed in
/// as `{0, 1}`, so a clean step responds with magnitude 4.
///
/// - `enforce_polarity`: compare signed angles during growth so opposite
///   edges of a thin stroke form separate regions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LsdOptions {
    /// Minimum gradient magnitude for seed and grown pixels.
    pub magnitude_threshold: f32,
    /// Orientation tolerance around the seed normal in degrees.
    pub angle_tolerance_deg: f32,
    /// Minimum accepted segment length in pixels.
    pub min_length_px: f32,
    /// Minimum number of pixels in a region.
    pub min_region_px: usize,
    /// Fraction of region pixels within half the tolerance of the seed.
    pub min_aligned_fraction: f32,
    pub enforce_polarity: bool,
}

impl Default for LsdOptions {
    fn default() -> Self {
        Self {
            magnitude_threshold: 1.0,
            angle_tolerance_deg: 22.5,
            min_length_px: 8.0,
            min_region_px: 12,
            min_aligned_fraction: 0.6,
            enforce_polarity: false,
        }
    }
}
