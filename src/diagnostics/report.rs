use super::TimingBreakdown;
use crate::grid::Correction;
use crate::segments::Line;
use crate::types::{FretboardResult, Grid};
use serde::Serialize;

/// Result of [`FretboardDetector::process_with_diagnostics`](crate::FretboardDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub result: FretboardResult,
    pub trace: PipelineTrace,
}

/// What the pipeline did with one frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub counts: StageCounts,
    /// Final string lines, top first; empty when string detection failed.
    pub strings: Vec<Line>,
    /// Final fret lines, nut-most first.
    pub frets: Vec<Line>,
    pub fret_correction: Correction,
    /// Grid of this frame alone, before temporal averaging.
    pub frame_grid: Grid,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Number of lines alive after each geometric stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCounts {
    pub string_segments: usize,
    pub string_candidates: usize,
    pub merged_strings: usize,
    pub deduplicated_strings: usize,
    pub fret_segments: usize,
    pub fret_candidates: usize,
    pub merged_frets: usize,
    pub selected_frets: usize,
    pub fret_ridges: usize,
}
