use serde::{Deserialize, Serialize};

/// Number of guitar strings tracked by the grid (rows).
pub const STRING_COUNT: usize = 6;
/// Number of landmark columns: the nut boundary plus four fret midpoints.
pub const GRID_COLUMNS: usize = 5;

/// 2D coordinate, either in pixels or normalised to the unit square.
///
/// A single structure never mixes the two spaces: pipeline stages work in
/// pixels and only [`Grid`] holds normalised values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Fixed 6×5 matrix of optional landmark points in normalised space.
///
/// Row `i` is string `i` as drawn top to bottom; column 0 is the nut
/// boundary and columns 1–4 are successive fret midpoints. A cell is `None`
/// when the string/fret intersection could not be computed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Option<Point>; GRID_COLUMNS]; STRING_COUNT],
}

impl Grid {
    /// All-null grid.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Point> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .flatten()
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Option<Point>) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    pub fn rows(&self) -> &[[Option<Point>; GRID_COLUMNS]; STRING_COUNT] {
        &self.cells
    }

    /// Number of non-null cells.
    pub fn filled(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == STRING_COUNT * GRID_COLUMNS
    }
}

/// Per-frame output handed to the overlay layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardResult {
    /// Temporally averaged landmark grid.
    pub grid: Grid,
    pub frame_width: usize,
    pub frame_height: usize,
    /// Wall-clock processing time of the frame in milliseconds.
    pub latency_ms: f64,
}
