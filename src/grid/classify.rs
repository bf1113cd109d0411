//! Orientation filtering of raw extractor output.
//!
//! Candidates are taken in detector order until the per-orientation cap is
//! reached. This is a bounded first-come selection, not a top-K by score.
use crate::segments::Segment;
use serde::{Deserialize, Serialize};

/// Which emphasis map a segment list came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// String candidates: `|Δy/Δx| < 1`, endpoints ordered left to right.
    Horizontal,
    /// Fret candidates: `|Δy/Δx| > 1`, endpoints ordered top to bottom.
    Vertical,
}

impl Orientation {
    fn orient(self, s: Segment) -> Segment {
        match self {
            Orientation::Horizontal => s.left_to_right(),
            Orientation::Vertical => s.top_to_bottom(),
        }
    }

    fn accepts(self, s: &Segment) -> bool {
        let g = s.abs_gradient();
        match self {
            Orientation::Horizontal => g < 1.0,
            Orientation::Vertical => g > 1.0,
        }
    }
}

/// Caps on the number of accepted candidates per orientation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionParams {
    pub max_strings: usize,
    pub max_frets: usize,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            max_strings: 6,
            max_frets: 50,
        }
    }
}

impl SelectionParams {
    pub fn cap(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Horizontal => self.max_strings,
            Orientation::Vertical => self.max_frets,
        }
    }
}

/// Orient each segment and keep the first `cap` that match `orientation`.
pub fn select_candidates(raw: &[Segment], orientation: Orientation, cap: usize) -> Vec<Segment> {
    raw.iter()
        .map(|&s| orientation.orient(s))
        .filter(|s| orientation.accepts(s))
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn horizontal_selection_orients_and_caps_in_order() {
        let raw: Vec<Segment> = (0..10)
            .map(|i| Segment::from_coords(200.0, i as f32 * 10.0, 0.0, i as f32 * 10.0 + 5.0))
            .collect();
        let picked = select_candidates(&raw, Orientation::Horizontal, 6);
        assert_eq!(picked.len(), 6);
        for (i, s) in picked.iter().enumerate() {
            assert_eq!(s.start, Point::new(0.0, i as f32 * 10.0 + 5.0));
            assert_eq!(s.end.x, 200.0);
        }
    }

    #[test]
    fn steep_and_flat_segments_are_split() {
        let raw = vec![
            Segment::from_coords(10.0, 100.0, 12.0, 10.0),
            Segment::from_coords(0.0, 0.0, 100.0, 20.0),
            Segment::from_coords(5.0, 0.0, 5.0, 50.0),
            Segment::from_coords(0.0, 0.0, 10.0, 10.0),
        ];
        let frets = select_candidates(&raw, Orientation::Vertical, 50);
        assert_eq!(frets.len(), 2);
        assert_eq!(frets[0].start, Point::new(12.0, 10.0));
        assert_eq!(frets[1].start, Point::new(5.0, 0.0));

        let strings = select_candidates(&raw, Orientation::Horizontal, 6);
        assert_eq!(strings, vec![raw[1]]);
    }

    #[test]
    fn empty_input_and_zero_cap() {
        assert!(select_candidates(&[], Orientation::Horizontal, 6).is_empty());
        let raw = [Segment::from_coords(0.0, 0.0, 100.0, 0.0)];
        assert!(select_candidates(&raw, Orientation::Horizontal, 0).is_empty());
    }
}
