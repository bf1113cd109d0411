//! Parameter types configuring the detector stages.
//!
//! Every threshold of the pipeline lives in one of the per-stage structs
//! grouped here. Defaults reproduce the tuned constants for 640×480-class
//! camera frames; a JSON config may override any subset of fields.

use crate::grid::{FretParams, MergeParams, SelectionParams};
use crate::preprocess::PreprocessOptions;
use crate::segments::{HoughOptions, LsdOptions};
use crate::stabilizer::DEFAULT_HISTORY_LEN;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Blur, contrast, edge, mask and morphology settings.
    pub preprocess: PreprocessOptions,
    /// Probabilistic Hough transform for string segments.
    pub hough: HoughOptions,
    /// LSD-like detector for fret segments.
    pub lsd: LsdOptions,
    /// Per-orientation candidate caps.
    pub selection: SelectionParams,
    /// Chaining and deduplication thresholds.
    pub merge: MergeParams,
    /// Fret selection and extrapolation policy.
    pub frets: FretParams,
    /// Number of frames averaged by the stabilizer.
    pub history_len: usize,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            preprocess: PreprocessOptions::default(),
            hough: HoughOptions::default(),
            lsd: LsdOptions::default(),
            selection: SelectionParams::default(),
            merge: MergeParams::default(),
            frets: FretParams::default(),
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}
