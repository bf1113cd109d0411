//! Greedy endpoint chaining, common-span extension and intercept dedup.
use crate::segments::{Line, Segment};
use crate::types::Point;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::Orientation;

/// Merge stage thresholds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeParams {
    /// Max end→start distance for chaining string segments (px).
    pub string_adjacency_px: f32,
    /// Max end→start distance for chaining fret segments (px).
    pub fret_adjacency_px: f32,
    /// Intercept bin width used to group duplicate string lines (px).
    pub intercept_bin_px: f32,
    /// Redraw merged string lines over their common horizontal extent
    /// before deduplication.
    pub extend_strings: bool,
}

impl Default for MergeParams {
    fn default() -> Self {
        Self {
            string_adjacency_px: 10.0,
            fret_adjacency_px: 8.0,
            intercept_bin_px: 10.0,
            extend_strings: true,
        }
    }
}

impl MergeParams {
    pub fn adjacency(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.string_adjacency_px,
            Orientation::Vertical => self.fret_adjacency_px,
        }
    }
}

/// Chain segments whose start lies within `adjacency_px` of the current
/// head's end.
///
/// The head is taken from the front of the working list and every
/// remaining segment is visited once, in order. An absorbed segment moves
/// the head's end, so later segments are tested against the new end.
pub fn chain_segments(segments: &[Segment], adjacency_px: f32) -> Vec<Line> {
    let mut pending: VecDeque<Line> = segments.iter().copied().map(Line::from).collect();
    let mut merged = Vec::with_capacity(pending.len());
    while let Some(mut head) = pending.pop_front() {
        pending.retain(|next| {
            if head.end.distance(&next.start) < adjacency_px {
                head.end = next.end;
                false
            } else {
                true
            }
        });
        merged.push(head);
    }
    merged
}

/// Redraw every line between the smallest start x and the largest end x of
/// the set. Vertical lines have no y(x) and are returned unchanged.
pub fn extend_to_common_span(lines: &[Line]) -> Vec<Line> {
    let left = lines.iter().map(|l| l.start.x).fold(f32::INFINITY, f32::min);
    let right = lines
        .iter()
        .map(|l| l.end.x)
        .fold(f32::NEG_INFINITY, f32::max);
    lines
        .iter()
        .map(|l| l.with_extent(left, right).unwrap_or(*l))
        .collect()
}

/// Collapse lines whose intercepts round to the same multiple of `bin_px`.
///
/// Groups keep first-seen order. A group with several members becomes one
/// line from the leftmost to the rightmost endpoint found among all of its
/// members' endpoints.
pub fn dedup_by_intercept(lines: &[Line], bin_px: f32) -> Vec<Line> {
    let mut groups: Vec<(i64, Vec<Line>)> = Vec::new();
    for line in lines {
        let key = (line.intercept() / bin_px).round_ties_even() as i64;
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(*line),
            None => groups.push((key, vec![*line])),
        }
    }

    groups
        .into_iter()
        .map(|(_, members)| match members.as_slice() {
            [single] => *single,
            _ => span_of(&members),
        })
        .collect()
}

fn span_of(members: &[Line]) -> Line {
    let mut left = Point::new(f32::INFINITY, 0.0);
    let mut right = Point::new(f32::NEG_INFINITY, 0.0);
    for p in members.iter().flat_map(|l| [l.start, l.end]) {
        if p.x < left.x {
            left = p;
        }
        if p.x > right.x {
            right = p;
        }
    }
    Line::new(left, right)
}
