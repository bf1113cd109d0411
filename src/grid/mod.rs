//! Geometry stages from raw segments to the landmark grid.
//!
//! - [`classify`]: orient raw segments and keep the first few per orientation.
//! - [`merge`]: chain adjacent segments, extend strings to a common span and
//!   drop intercept duplicates.
//! - [`strings`]: complete a partial string observation to six lines.
//! - [`frets`]: regression-based fret selection, ridge merging and
//!   equal-tempered extrapolation.
//! - [`compose`]: intersect strings with fret columns into a [`Grid`].
//!
//! [`Grid`]: crate::types::Grid

pub mod classify;
pub mod compose;
pub mod frets;
pub mod merge;
pub mod regression;
pub mod strings;

pub use classify::{select_candidates, Orientation, SelectionParams};
pub use compose::{column_positions, compose_grid};
pub use frets::{
    correct_spacing, extrapolate_frets, merge_ridges, select_frets, Correction, FretParams,
    FretSet, EQUAL_TEMPERED_RATIO,
};
pub use merge::{chain_segments, dedup_by_intercept, extend_to_common_span, MergeParams};
pub use regression::LinearFit;
pub use strings::{extrapolate_strings, StringSet, MIN_STRING_LINES};
