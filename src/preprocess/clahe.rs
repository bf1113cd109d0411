//! Contrast-limited adaptive histogram equalisation (CLAHE).
//!
//! The image is split into `tiles_x × tiles_y` tiles. When the size is not
//! a multiple of the grid, the source is virtually padded on the bottom and
//! right with reflect-101 so every tile has the same size. Each tile gets
//! a clipped, redistributed histogram turned into a lookup table; output
//! pixels bilinearly blend the LUTs of the four nearest tile centres.
use super::blur::reflect101;
use crate::image::GrayImage;

const HIST_SIZE: usize = 256;

struct TileGrid {
    tiles_x: usize,
    tiles_y: usize,
    tile_w: usize,
    tile_h: usize,
}

impl TileGrid {
    fn new(w: usize, h: usize, tiles_x: usize, tiles_y: usize) -> Self {
        let tiles_x = tiles_x.max(1);
        let tiles_y = tiles_y.max(1);
        let (pw, ph) = if w % tiles_x == 0 && h % tiles_y == 0 {
            (w, h)
        } else {
            (w + tiles_x - w % tiles_x, h + tiles_y - h % tiles_y)
        };
        Self {
            tiles_x,
            tiles_y,
            tile_w: pw / tiles_x,
            tile_h: ph / tiles_y,
        }
    }

    fn area(&self) -> usize {
        self.tile_w * self.tile_h
    }
}

fn clip_histogram(hist: &mut [u32; HIST_SIZE], clip: u32) {
    let mut clipped = 0u32;
    for bin in hist.iter_mut() {
        if *bin > clip {
            clipped += *bin - clip;
            *bin = clip;
        }
    }
    let batch = clipped / HIST_SIZE as u32;
    let mut residual = clipped as usize - batch as usize * HIST_SIZE;
    for bin in hist.iter_mut() {
        *bin += batch;
    }
    if residual != 0 {
        let step = (HIST_SIZE / residual).max(1);
        let mut i = 0;
        while i < HIST_SIZE && residual > 0 {
            hist[i] += 1;
            i += step;
            residual -= 1;
        }
    }
}

fn tile_lut(src: &GrayImage, grid: &TileGrid, tx: usize, ty: usize, clip: u32) -> [u8; HIST_SIZE] {
    let mut hist = [0u32; HIST_SIZE];
    let (w, h) = (src.width(), src.height());
    for y in ty * grid.tile_h..(ty + 1) * grid.tile_h {
        let sy = reflect101(y as isize, h);
        for x in tx * grid.tile_w..(tx + 1) * grid.tile_w {
            let sx = reflect101(x as isize, w);
            hist[src.get(sx, sy) as usize] += 1;
        }
    }
    clip_histogram(&mut hist, clip);

    let scale = (HIST_SIZE - 1) as f32 / grid.area() as f32;
    let mut lut = [0u8; HIST_SIZE];
    let mut sum = 0u32;
    for (l, &bin) in lut.iter_mut().zip(hist.iter()) {
        sum += bin;
        *l = (sum as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Interpolation weights along one axis: `(lower tile, upper tile, upper weight)`.
fn axis_weights(len: usize, tile: usize, tiles: usize) -> Vec<(usize, usize, f32)> {
    let inv = 1.0 / tile as f32;
    (0..len)
        .map(|i| {
            let f = i as f32 * inv - 0.5;
            let lo = f.floor();
            let a = f - lo;
            let lo = lo as isize;
            let t1 = lo.max(0) as usize;
            let t2 = ((lo + 1) as usize).min(tiles - 1);
            (t1, t2, a)
        })
        .collect()
}

/// Equalise `src` with a `tiles_x × tiles_y` grid and the given clip limit
/// (relative to a uniform histogram; non-positive disables clipping).
pub fn clahe(src: &GrayImage, tiles_x: usize, tiles_y: usize, clip_limit: f32) -> GrayImage {
    let w = src.width();
    let h = src.height();
    if w == 0 || h == 0 {
        return src.clone();
    }
    let grid = TileGrid::new(w, h, tiles_x, tiles_y);
    let clip = if clip_limit > 0.0 {
        ((clip_limit * grid.area() as f32 / HIST_SIZE as f32) as u32).max(1)
    } else {
        u32::MAX
    };

    let mut luts = Vec::with_capacity(grid.tiles_x * grid.tiles_y);
    for ty in 0..grid.tiles_y {
        for tx in 0..grid.tiles_x {
            luts.push(tile_lut(src, &grid, tx, ty, clip));
        }
    }

    let xw = axis_weights(w, grid.tile_w, grid.tiles_x);
    let yw = axis_weights(h, grid.tile_h, grid.tiles_y);
    let mut out = GrayImage::new(w, h);
    for (y, &(ty1, ty2, ya)) in yw.iter().enumerate() {
        let row1 = &luts[ty1 * grid.tiles_x..(ty1 + 1) * grid.tiles_x];
        let row2 = &luts[ty2 * grid.tiles_x..(ty2 + 1) * grid.tiles_x];
        for (x, &(tx1, tx2, xa)) in xw.iter().enumerate() {
            let v = src.get(x, y) as usize;
            let top = row1[tx1][v] as f32 * (1.0 - xa) + row1[tx2][v] as f32 * xa;
            let bottom = row2[tx1][v] as f32 * (1.0 - xa) + row2[tx2][v] as f32 * xa;
            let res = top * (1.0 - ya) + bottom * ya;
            out.set(x, y, res.round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_redistributes_excess_evenly() {
        let mut hist = [0u32; HIST_SIZE];
        hist[10] = 300;
        clip_histogram(&mut hist, 20);
        assert_eq!(hist.iter().sum::<u32>(), 300);
        // 280 clipped: one per bin plus 24 residual spread every 10th bin.
        assert_eq!(hist[10], 22);
        assert_eq!(hist[0], 2);
        assert_eq!(hist[1], 1);
        assert_eq!(hist[230], 2);
        assert_eq!(hist[240], 1);
    }

    #[test]
    fn uniform_image_maps_to_cumulative_level() {
        let img = GrayImage::filled(32, 32, 100);
        let out = clahe(&img, 4, 4, 0.0);
        // Unclipped: every pixel sits at the top of its tile's CDF.
        assert!(out.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn clipping_limits_contrast_stretch() {
        let mut img = GrayImage::new(64, 64);
        for y in 0..64 {
            for x in 0..64 {
                img.set(x, y, if (x / 8 + y / 8) % 2 == 0 { 110 } else { 130 });
            }
        }
        let strong = clahe(&img, 4, 4, 40.0);
        let weak = clahe(&img, 4, 4, 0.75);
        let spread = |im: &GrayImage| {
            let lo = *im.data().iter().min().unwrap_or(&0) as i32;
            let hi = *im.data().iter().max().unwrap_or(&0) as i32;
            hi - lo
        };
        assert!(spread(&strong) > spread(&weak));
        assert!(spread(&weak) > 0);
    }

    #[test]
    fn non_divisible_size_is_padded() {
        let img = GrayImage::filled(30, 17, 50);
        let out = clahe(&img, 16, 16, 0.75);
        assert_eq!((out.width(), out.height()), (30, 17));
    }
}
