//! Grayscale morphology with rectangular structuring elements.
//!
//! A kernel of `width × height` has its anchor at `(width / 2, height / 2)`,
//! so output `(x, y)` covers `x - ax ..= x + width - 1 - ax` (same for y).
//! Samples outside the image are ignored rather than padded. Rectangular
//! windows are separable: a row pass followed by a column pass.
use crate::image::GrayImage;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Rectangular structuring element, sizes in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kernel {
    pub width: usize,
    pub height: usize,
}

impl Kernel {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Window offsets `(lo, hi)` along an axis of kernel length `len`.
    fn span(len: usize) -> (isize, isize) {
        let len = len.max(1) as isize;
        let anchor = len / 2;
        (-anchor, len - 1 - anchor)
    }
}

#[derive(Clone, Copy)]
enum Op {
    Min,
    Max,
}

impl Op {
    #[inline]
    fn identity(self) -> u8 {
        match self {
            Op::Min => u8::MAX,
            Op::Max => u8::MIN,
        }
    }

    #[inline]
    fn apply(self, a: u8, b: u8) -> u8 {
        match self {
            Op::Min => a.min(b),
            Op::Max => a.max(b),
        }
    }
}

fn row_pass(src: &[u8], lo: isize, hi: isize, op: Op, dst: &mut [u8]) {
    let w = src.len() as isize;
    for (x, d) in dst.iter_mut().enumerate() {
        let x0 = (x as isize + lo).max(0);
        let x1 = (x as isize + hi).min(w - 1);
        let mut acc = op.identity();
        for xi in x0..=x1 {
            acc = op.apply(acc, src[xi as usize]);
        }
        *d = acc;
    }
}

#[allow(clippy::too_many_arguments)]
fn column_pass(
    tmp: &[u8],
    w: usize,
    h: usize,
    y: usize,
    lo: isize,
    hi: isize,
    op: Op,
    dst: &mut [u8],
) {
    let y0 = (y as isize + lo).max(0) as usize;
    let y1 = (y as isize + hi).min(h as isize - 1) as usize;
    dst.fill(op.identity());
    for yy in y0..=y1 {
        let row = &tmp[yy * w..(yy + 1) * w];
        for (d, &v) in dst.iter_mut().zip(row) {
            *d = op.apply(*d, v);
        }
    }
}

fn rank_filter(src: &GrayImage, kernel: Kernel, op: Op) -> GrayImage {
    let w = src.width();
    let h = src.height();
    if w == 0 || h == 0 {
        return src.clone();
    }
    let (xlo, xhi) = Kernel::span(kernel.width);
    let (ylo, yhi) = Kernel::span(kernel.height);
    let mut tmp = vec![0u8; w * h];
    let mut out = GrayImage::new(w, h);

    #[cfg(feature = "parallel")]
    {
        tmp.par_chunks_mut(w)
            .zip(src.data().par_chunks(w))
            .for_each(|(dst, row)| row_pass(row, xlo, xhi, op, dst));
        out.data_mut()
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, dst)| column_pass(&tmp, w, h, y, ylo, yhi, op, dst));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (dst, row) in tmp.chunks_mut(w).zip(src.data().chunks(w)) {
            row_pass(row, xlo, xhi, op, dst);
        }
        for (y, dst) in out.data_mut().chunks_mut(w).enumerate() {
            column_pass(&tmp, w, h, y, ylo, yhi, op, dst);
        }
    }
    out
}

/// Minimum over the kernel window.
pub fn erode(src: &GrayImage, kernel: Kernel) -> GrayImage {
    rank_filter(src, kernel, Op::Min)
}

/// Maximum over the kernel window.
pub fn dilate(src: &GrayImage, kernel: Kernel) -> GrayImage {
    rank_filter(src, kernel, Op::Max)
}

/// Dilate then erode with the same kernel; bridges gaps shorter than the kernel.
pub fn close(src: &GrayImage, kernel: Kernel) -> GrayImage {
    erode(&dilate(src, kernel), kernel)
}
