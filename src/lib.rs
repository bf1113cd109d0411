#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod image;
pub mod snapshot;
pub mod stabilizer;
pub mod types;

// Stage modules – public for tools and tests, considered unstable internals.
pub mod angle;
pub mod edges;
pub mod grid;
pub mod preprocess;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{
    detect_frame, DetectorParams, FrameDetection, FrameMaps, FrameWorker, FretboardDetector,
};
pub use crate::types::{FretboardResult, Grid, Point};

pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use fretboard_detector::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let frame = FrameBuffer::new(w, h, vec![0u8; w * h * 4]).unwrap();
///
/// let mut det = FretboardDetector::new(DetectorParams::default());
/// let result = det.process(&frame.as_view());
/// println!("filled={} latency_ms={:.3}", result.grid.filled(), result.latency_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{FrameBuffer, RgbaFrame};
    pub use crate::{DetectorParams, FretboardDetector, FretboardResult, Grid, Point};
}
