//! Per-frame pipeline and the stateful detector around it.
//!
//! [`detect_frame`] is a pure function of one frame: preprocessing, line
//! extraction, string and fret geometry and grid composition. The
//! [`FretboardDetector`] adds the only cross-frame state, the temporal
//! stabilizer.
//!
//! Typical usage:
//! ```no_run
//! use fretboard_detector::{DetectorParams, FretboardDetector};
//! use fretboard_detector::image::RgbaFrame;
//!
//! # fn example(pixels: &[u8]) {
//! let frame = RgbaFrame::packed(640, 480, pixels).unwrap();
//! let mut detector = FretboardDetector::new(DetectorParams::default());
//! let result = detector.process(&frame);
//! println!("filled={} latency_ms={:.3}", result.grid.filled(), result.latency_ms);
//! # }
//! ```
use super::params::DetectorParams;
use crate::diagnostics::{
    elapsed_ms, DetectionReport, InputDescriptor, PipelineTrace, StageCounts, TimingBreakdown,
};
use crate::grid::{
    chain_segments, compose_grid, dedup_by_intercept, extend_to_common_span,
    extrapolate_frets, extrapolate_strings, merge_ridges, select_candidates, select_frets,
    FretSet, Orientation, StringSet,
};
use crate::image::{GrayImage, RgbaFrame};
use crate::preprocess::{preprocess, vertical_emphasis, PreprocessedFrame};
use crate::segments::{hough_segments, lsd_segments, Line};
use crate::stabilizer::TemporalStabilizer;
use crate::types::{FretboardResult, Grid};
use log::debug;
use std::time::Instant;

/// Binary maps built while processing a frame.
#[derive(Clone, Debug)]
pub struct FrameMaps {
    pub edges: GrayImage,
    pub horizontal: GrayImage,
    pub vertical: GrayImage,
}

/// Everything derived from a single frame, before temporal averaging.
#[derive(Clone, Debug)]
pub struct FrameDetection {
    pub grid: Grid,
    pub strings: StringSet,
    pub frets: FretSet,
    pub counts: StageCounts,
    pub timings: TimingBreakdown,
    pub maps: FrameMaps,
}

/// Run every per-frame stage on `frame`.
pub fn detect_frame(frame: &RgbaFrame<'_>, params: &DetectorParams) -> FrameDetection {
    let (width, height) = (frame.width(), frame.height());
    let total_start = Instant::now();
    let mut timings = TimingBreakdown::default();
    let mut counts = StageCounts::default();

    let PreprocessedFrame { edges, horizontal } =
        timings.time("preprocess", || preprocess(frame, &params.preprocess));

    let strings = timings.time("strings", || {
        let raw = hough_segments(&horizontal, &params.hough);
        let cap = params.selection.cap(Orientation::Horizontal);
        let candidates = select_candidates(&raw, Orientation::Horizontal, cap);
        let adjacency = params.merge.adjacency(Orientation::Horizontal);
        let mut merged = chain_segments(&candidates, adjacency);
        counts.merged_strings = merged.len();
        if params.merge.extend_strings && !merged.is_empty() {
            merged = extend_to_common_span(&merged);
        }
        let deduplicated = dedup_by_intercept(&merged, params.merge.intercept_bin_px);
        counts.string_segments = raw.len();
        counts.string_candidates = candidates.len();
        counts.deduplicated_strings = deduplicated.len();
        let strings = extrapolate_strings(deduplicated);
        if strings.is_empty() {
            debug!(
                "detect_frame: {} string lines after dedup, no string set",
                counts.deduplicated_strings
            );
        }
        strings
    });

    let vertical = timings.time("vertical_emphasis", || {
        vertical_emphasis(&edges, strings.bounds(), &params.preprocess)
    });

    let frets = timings.time("frets", || {
        let raw = lsd_segments(&vertical, params.lsd);
        let cap = params.selection.cap(Orientation::Vertical);
        let candidates = select_candidates(&raw, Orientation::Vertical, cap);
        let adjacency = params.merge.adjacency(Orientation::Vertical);
        let merged: Vec<Line> = chain_segments(&candidates, adjacency);
        let selected = select_frets(&merged, params.frets.regression_tolerance_px);
        let ridges = merge_ridges(&selected, params.frets.ridge_distance_px);
        counts.fret_segments = raw.len();
        counts.fret_candidates = candidates.len();
        counts.merged_frets = merged.len();
        counts.selected_frets = selected.len();
        counts.fret_ridges = ridges.len();
        extrapolate_frets(&ridges, &params.frets)
    });

    let grid = timings.time("compose", || compose_grid(&strings, &frets, width, height));
    timings.total_ms = elapsed_ms(total_start);

    debug!(
        "detect_frame w={} h={} strings={} frets={} filled={} latency_ms={:.3}",
        width,
        height,
        strings.len(),
        frets.len(),
        grid.filled(),
        timings.total_ms
    );

    FrameDetection {
        grid,
        strings,
        frets,
        counts,
        timings,
        maps: FrameMaps {
            edges,
            horizontal,
            vertical,
        },
    }
}

/// Detector holding parameters and the temporal stabilizer.
pub struct FretboardDetector {
    params: DetectorParams,
    stabilizer: TemporalStabilizer,
}

impl FretboardDetector {
    pub fn new(params: DetectorParams) -> Self {
        let stabilizer = TemporalStabilizer::new(params.history_len);
        Self { params, stabilizer }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Process one frame and return the averaged grid.
    pub fn process(&mut self, frame: &RgbaFrame<'_>) -> FretboardResult {
        self.process_with_diagnostics(frame).result
    }

    /// Process one frame and return the averaged grid with a stage trace.
    pub fn process_with_diagnostics(&mut self, frame: &RgbaFrame<'_>) -> DetectionReport {
        self.process_detailed(frame).0
    }

    /// Like [`process_with_diagnostics`](Self::process_with_diagnostics) but
    /// also hands back the intermediate binary maps.
    pub fn process_detailed(&mut self, frame: &RgbaFrame<'_>) -> (DetectionReport, FrameMaps) {
        let start = Instant::now();
        let detection = detect_frame(frame, &self.params);
        let grid = self.stabilizer.push(detection.grid.clone()).clone();
        let latency_ms = elapsed_ms(start);

        let FrameDetection {
            grid: frame_grid,
            strings,
            frets,
            counts,
            mut timings,
            maps,
        } = detection;
        timings.total_ms = latency_ms;

        let report = DetectionReport {
            result: FretboardResult {
                grid,
                frame_width: frame.width(),
                frame_height: frame.height(),
                latency_ms,
            },
            trace: PipelineTrace {
                input: InputDescriptor {
                    width: frame.width(),
                    height: frame.height(),
                },
                timings,
                counts,
                strings: strings.lines().to_vec(),
                frets: frets.lines().to_vec(),
                fret_correction: frets.correction(),
                frame_grid,
            },
        };
        (report, maps)
    }

    /// Current averaged grid without processing a frame.
    pub fn current(&self) -> &Grid {
        self.stabilizer.current()
    }

    /// Drop the frame history, e.g. after the camera was repositioned.
    pub fn reset(&mut self) {
        self.stabilizer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::FrameBuffer;

    #[test]
    fn blank_frame_gives_null_grid_and_full_trace() {
        let frame = FrameBuffer::new(160, 120, vec![0; 160 * 120 * 4]).unwrap();
        let mut detector = FretboardDetector::new(DetectorParams::default());
        let report = detector.process_with_diagnostics(&frame.as_view());
        assert!(report.result.grid.is_empty());
        assert_eq!(report.result.frame_width, 160);
        assert_eq!(report.result.frame_height, 120);
        assert!(report.trace.strings.is_empty());
        assert!(report.trace.frets.is_empty());
        assert_eq!(report.trace.counts, StageCounts::default());
        let labels: Vec<&str> = report
            .trace
            .timings
            .stages
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(
            labels,
            ["preprocess", "strings", "vertical_emphasis", "frets", "compose"]
        );
    }

    #[test]
    fn reset_clears_history() {
        let frame = FrameBuffer::new(32, 32, vec![0; 32 * 32 * 4]).unwrap();
        let mut detector = FretboardDetector::new(DetectorParams::default());
        detector.process(&frame.as_view());
        detector.reset();
        assert!(detector.current().is_empty());
    }
}
