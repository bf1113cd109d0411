//! Cell-wise moving average over the most recent grids.
use crate::types::{Grid, Point, GRID_COLUMNS, STRING_COUNT};
use std::collections::VecDeque;

/// Default number of grids kept in the history window.
pub const DEFAULT_HISTORY_LEN: usize = 10;

/// Bounded FIFO of recent grids; the oldest entry is evicted first.
#[derive(Clone, Debug)]
pub struct HistoryWindow {
    grids: VecDeque<Grid>,
    capacity: usize,
}

impl HistoryWindow {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            grids: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, grid: Grid) {
        while self.grids.len() >= self.capacity {
            self.grids.pop_front();
        }
        self.grids.push_back(grid);
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.grids.clear();
    }

    /// Per-cell mean over the grids that have a value there. A cell is
    /// null only if every grid in the window is null at it.
    pub fn average(&self) -> Grid {
        let mut out = Grid::empty();
        for row in 0..STRING_COUNT {
            for col in 0..GRID_COLUMNS {
                let (mut sx, mut sy, mut n) = (0.0f64, 0.0f64, 0usize);
                for p in self.grids.iter().filter_map(|g| g.get(row, col)) {
                    sx += p.x as f64;
                    sy += p.y as f64;
                    n += 1;
                }
                if n > 0 {
                    let inv = 1.0 / n as f64;
                    out.set(row, col, Some(Point::new((sx * inv) as f32, (sy * inv) as f32)));
                }
            }
        }
        out
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}

/// Single owner of the history window. Every push recomputes the exposed
/// current grid.
#[derive(Clone, Debug, Default)]
pub struct TemporalStabilizer {
    window: HistoryWindow,
    current: Grid,
}

impl TemporalStabilizer {
    pub fn new(history_len: usize) -> Self {
        Self {
            window: HistoryWindow::new(history_len),
            current: Grid::empty(),
        }
    }

    /// Add a frame's grid and return the updated average.
    pub fn push(&mut self, grid: Grid) -> &Grid {
        self.window.push(grid);
        self.current = self.window.average();
        &self.current
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn history_len(&self) -> usize {
        self.window.len()
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.current = Grid::empty();
    }
}
