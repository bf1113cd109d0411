//! Diagnostics returned alongside detection results.
//!
//! [`DetectionReport`] pairs the published [`FretboardResult`] with a
//! [`PipelineTrace`] of stage timings, line counts and the final string and
//! fret lines of the frame.
//!
//! [`FretboardResult`]: crate::types::FretboardResult

pub mod report;
pub mod timing;

pub use report::{DetectionReport, InputDescriptor, PipelineTrace, StageCounts};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
