//! Fretboard detector orchestrating the per-frame line pipeline.
//!
//! Overview
//! - Preprocess the RGBA frame into a masked edge map and a horizontal
//!   emphasis map.
//! - Extract string segments with a probabilistic Hough transform, select,
//!   chain, extend and deduplicate them, then complete the set to six
//!   strings.
//! - Build the vertical emphasis map inside the outer strings, extract fret
//!   segments with the LSD-like detector, filter them by endpoint
//!   regression, merge ridges and extrapolate the fret positions with the
//!   equal-tempered ratio.
//! - Intersect strings and fret columns into a 6×5 grid and average it over
//!   the recent frames.
//!
//! Modules
//! - [`params`] – configuration types for every stage.
//! - `pipeline` – [`detect_frame`] and the stateful [`FretboardDetector`].
//! - `worker` – [`FrameWorker`], the dedicated processing thread.

pub mod params;
mod pipeline;
mod worker;

pub use params::DetectorParams;
pub use pipeline::{detect_frame, FrameDetection, FrameMaps, FretboardDetector};
pub use worker::FrameWorker;
