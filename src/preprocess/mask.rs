//! Region-of-interest masking for edge maps.
use crate::image::GrayImage;
use crate::types::Point;

/// Zero the top `(h / den) * num` rows, the `left` leftmost and `right`
/// rightmost columns.
pub fn mask_borders(map: &mut GrayImage, top: (usize, usize), left: usize, right: usize) {
    let w = map.width();
    let h = map.height();
    let (num, den) = top;
    let band = if den == 0 { 0 } else { ((h / den) * num).min(h) };
    let data = map.data_mut();
    data[..band * w].fill(0);
    for y in band..h {
        let row = &mut data[y * w..(y + 1) * w];
        let l = left.min(w);
        row[..l].fill(0);
        let r = w.saturating_sub(right);
        row[r.max(l)..].fill(0);
    }
}

/// Binary mask (`255` inside) of the polygon with the given vertices.
///
/// Rows are scanned at integer y; crossings are paired with the even-odd
/// rule and filled inclusively between rounded x positions.
pub fn polygon_mask(w: usize, h: usize, vertices: &[Point]) -> GrayImage {
    let mut mask = GrayImage::new(w, h);
    if vertices.len() < 3 || w == 0 || h == 0 || vertices.iter().any(|p| !p.is_finite()) {
        return mask;
    }
    let ymin = vertices.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let ymax = vertices.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    let y0 = ymin.ceil().max(0.0) as usize;
    let y1 = (ymax.floor() as isize).min(h as isize - 1);
    if y1 < 0 {
        return mask;
    }

    let mut xs = Vec::with_capacity(vertices.len());
    for y in y0..=y1 as usize {
        let yf = y as f32;
        xs.clear();
        for (i, a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            let (lo, hi) = if a.y <= b.y { (*a, b) } else { (b, *a) };
            // Half-open in y so shared vertices count once; the bottom
            // row is closed so a flat-bottomed polygon keeps its last row.
            let inside = (lo.y <= yf && yf < hi.y) || (yf == hi.y && yf == ymax && lo.y < hi.y);
            if inside {
                xs.push(lo.x + (yf - lo.y) * (hi.x - lo.x) / (hi.y - lo.y));
            }
        }
        xs.sort_by(|a, b| a.total_cmp(b));
        let row = &mut mask.data_mut()[y * w..(y + 1) * w];
        for pair in xs.chunks_exact(2) {
            let x0 = pair[0].round().max(0.0);
            let x1 = pair[1].round().min(w as f32 - 1.0);
            if x1 < x0 {
                continue;
            }
            row[x0 as usize..=x1 as usize].fill(255);
        }
    }
    mask
}
