use super::{FretSet, StringSet};
use crate::types::{Grid, Point, GRID_COLUMNS, STRING_COUNT};

/// x positions of the five landmark columns: the nut-most fret, then the
/// midpoints between frets 1–2, 2–3, 3–4 and 4–5.
pub fn column_positions(frets: &FretSet) -> Option<[f32; GRID_COLUMNS]> {
    let xs: Vec<f32> = frets
        .lines()
        .iter()
        .take(GRID_COLUMNS + 1)
        .map(|l| l.start.x)
        .collect();
    if xs.len() < GRID_COLUMNS + 1 {
        return None;
    }
    let mut cols = [xs[0]; GRID_COLUMNS];
    for (j, col) in cols.iter_mut().enumerate().skip(1) {
        *col = xs[j] + (xs[j + 1] - xs[j]) / 2.0;
    }
    Some(cols)
}

/// Intersect every string with every column and normalise by the frame
/// size. Anything short of six strings and six frets gives an all-null
/// grid; a cell whose string has no y at that x stays null.
pub fn compose_grid(strings: &StringSet, frets: &FretSet, width: usize, height: usize) -> Grid {
    let mut grid = Grid::empty();
    if strings.len() != STRING_COUNT || width == 0 || height == 0 {
        return grid;
    }
    let Some(cols) = column_positions(frets) else {
        return grid;
    };
    let (w, h) = (width as f32, height as f32);
    for (row, line) in strings.lines().iter().enumerate() {
        for (col, &x) in cols.iter().enumerate() {
            let cell = line
                .y_at(x)
                .map(|y| Point::new(x / w, y / h))
                .filter(Point::is_finite);
            grid.set(row, col, cell);
        }
    }
    grid
}
