//! Frame preprocessing: intensity, denoising, local contrast, edges and
//! directional emphasis maps.
//!
//! Stage order per frame:
//! 1. RGBA → luma (`RgbaFrame::to_gray`).
//! 2. Gaussian blur to suppress wood grain and sensor noise.
//! 3. CLAHE to even out lighting across the neck.
//! 4. Canny edges, then the top band and side margins are cleared.
//! 5. Horizontal emphasis: a wide/short erosion removes vertical strokes,
//!    a tall/narrow closing reconnects broken string edges.
//!
//! The vertical emphasis map depends on the detected strings, so it is
//! produced separately by [`vertical_emphasis`] once string lines exist.
//!
//! An all-black input gives all-black maps; nothing here can fail.

pub mod blur;
pub mod clahe;
pub mod mask;
pub mod morph;

pub use morph::Kernel;

use crate::image::{GrayImage, RgbaFrame};
use crate::segments::Line;
use log::debug;
use serde::{Deserialize, Serialize};

/// Knobs for the preprocessing stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Gaussian kernel size (odd).
    pub blur_kernel: usize,
    pub blur_sigma: f32,
    /// CLAHE tile grid `(columns, rows)`.
    pub clahe_tiles: (usize, usize),
    pub clahe_clip_limit: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Masked top band as a fraction `(numerator, denominator)` of the height.
    pub top_band: (usize, usize),
    pub left_margin_px: usize,
    pub right_margin_px: usize,
    pub horizontal_erode: Kernel,
    pub horizontal_close: Kernel,
    pub vertical_erode: Kernel,
    pub vertical_close: Kernel,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            blur_sigma: 1.6,
            clahe_tiles: (16, 16),
            clahe_clip_limit: 0.75,
            canny_low: 50.0,
            canny_high: 100.0,
            top_band: (3, 7),
            left_margin_px: 3,
            right_margin_px: 2,
            horizontal_erode: Kernel::new(2, 1),
            horizontal_close: Kernel::new(1, 4),
            vertical_erode: Kernel::new(1, 2),
            vertical_close: Kernel::new(8, 5),
        }
    }
}

/// Maps produced from one frame before any line is known.
#[derive(Clone, Debug)]
pub struct PreprocessedFrame {
    /// Masked binary Canny edges.
    pub edges: GrayImage,
    /// Binary map emphasising near-horizontal structure (strings).
    pub horizontal: GrayImage,
}

/// Contrast-enhanced intensity image (steps 1–3).
pub fn enhance(frame: &RgbaFrame<'_>, opts: &PreprocessOptions) -> GrayImage {
    let gray = frame.to_gray();
    let blurred = blur::gaussian_blur(&gray, opts.blur_kernel, opts.blur_sigma);
    clahe::clahe(
        &blurred,
        opts.clahe_tiles.0,
        opts.clahe_tiles.1,
        opts.clahe_clip_limit,
    )
}

/// Masked edge map of an enhanced intensity image (step 4).
pub fn masked_edges(enhanced: &GrayImage, opts: &PreprocessOptions) -> GrayImage {
    let mut edges = crate::edges::canny(enhanced, opts.canny_low, opts.canny_high);
    mask::mask_borders(
        &mut edges,
        opts.top_band,
        opts.left_margin_px,
        opts.right_margin_px,
    );
    edges
}

/// Horizontal emphasis of an edge map (step 5).
pub fn horizontal_emphasis(edges: &GrayImage, opts: &PreprocessOptions) -> GrayImage {
    let eroded = morph::erode(edges, opts.horizontal_erode);
    morph::close(&eroded, opts.horizontal_close)
}

/// Run steps 1–5 on one frame.
pub fn preprocess(frame: &RgbaFrame<'_>, opts: &PreprocessOptions) -> PreprocessedFrame {
    let enhanced = enhance(frame, opts);
    let edges = masked_edges(&enhanced, opts);
    let horizontal = horizontal_emphasis(&edges, opts);
    debug!(
        "preprocess w={} h={} edge_px={} horizontal_px={}",
        frame.width(),
        frame.height(),
        edges.count_nonzero(),
        horizontal.count_nonzero()
    );
    PreprocessedFrame { edges, horizontal }
}

/// Vertical emphasis map for fret detection.
///
/// When the outermost string lines are given, edges outside the
/// quadrilateral `(top.start, top.end, bottom.end, bottom.start)` are
/// dropped before a tall/narrow erosion and a wide closing.
pub fn vertical_emphasis(
    edges: &GrayImage,
    bounds: Option<(&Line, &Line)>,
    opts: &PreprocessOptions,
) -> GrayImage {
    let restricted;
    let src = match bounds {
        Some((top, bottom)) => {
            let quad = [top.start, top.end, bottom.end, bottom.start];
            let roi = mask::polygon_mask(edges.width(), edges.height(), &quad);
            restricted = edges.and(&roi);
            &restricted
        }
        None => edges,
    };
    let eroded = morph::erode(src, opts.vertical_erode);
    morph::close(&eroded, opts.vertical_close)
}
