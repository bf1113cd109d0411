use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Raw line segment as reported by an extractor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Same segment with endpoints ordered by increasing x.
    pub fn left_to_right(self) -> Self {
        if self.start.x > self.end.x {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }

    /// Same segment with endpoints ordered by increasing y.
    pub fn top_to_bottom(self) -> Self {
        if self.start.y > self.end.y {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }

    /// `|Δy / Δx|`, infinite for a vertical segment.
    pub fn abs_gradient(&self) -> f32 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        if dx == 0.0 {
            f32::INFINITY
        } else {
            (dy / dx).abs()
        }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }
}

/// Merged or synthesised line: an infinite line restricted to the extent
/// between `start` and `end`. Gradient and intercept are derived on demand.
///
/// For string lines `start` is the left end; for fret lines `start` is the
/// top end (towards the upper edge of the fretboard).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[inline]
    fn is_vertical(&self) -> bool {
        self.end.x == self.start.x
    }

    /// `Δy / Δx`; `f32::INFINITY` when `Δx == 0`.
    pub fn gradient(&self) -> f32 {
        if self.is_vertical() {
            f32::INFINITY
        } else {
            (self.end.y - self.start.y) / (self.end.x - self.start.x)
        }
    }

    /// y at `x = 0`. Vertical lines report `start.y`.
    pub fn intercept(&self) -> f32 {
        let g = self.gradient();
        if !g.is_finite() || self.start.x == 0.0 || g == 0.0 {
            self.start.y
        } else {
            self.start.y - g * self.start.x
        }
    }

    /// y on the infinite line through this segment, `None` for vertical lines.
    pub fn y_at(&self, x: f32) -> Option<f32> {
        if self.is_vertical() {
            return None;
        }
        let y = self.gradient() * x + self.intercept();
        y.is_finite().then_some(y)
    }

    /// Redraw along the same gradient/intercept between `x0` and `x1`.
    pub fn with_extent(&self, x0: f32, x1: f32) -> Option<Line> {
        Some(Line::from_coords(x0, self.y_at(x0)?, x1, self.y_at(x1)?))
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Line {
        Line::from_coords(
            self.start.x + dx,
            self.start.y + dy,
            self.end.x + dx,
            self.end.y + dy,
        )
    }
}

impl From<Segment> for Line {
    fn from(s: Segment) -> Self {
        Line::new(s.start, s.end)
    }
}
