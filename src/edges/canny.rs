//! Dual-threshold Canny edge detector producing a binary map.
//!
//! Steps:
//! - Sobel gradients on the 8-bit intensity (replicated border), L1 magnitude.
//! - Non-maximum suppression along the gradient direction quantized to
//!   0°/45°/90°/135°. Along the two axis-aligned directions a pixel must be
//!   strictly greater than the "before" neighbour and not smaller than the
//!   "after" neighbour, so a plateau of two equal responses keeps exactly one.
//!   Samples outside the image count as zero magnitude.
//! - Hysteresis: pixels above `high` seed edges which grow 8-connected
//!   through surviving pixels above `low`.
//!
//! Output pixels are `255` for edges and `0` elsewhere.
use super::grad::{sobel_gradients, Grad};
use crate::image::{GrayImage, ImageF32, ImageView};

const TAN_22_5_DEG: f32 = 0.414_213_57;
const TAN_67_5_DEG: f32 = 2.414_213_6;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Suppressed,
    Weak,
    Strong,
}

/// L1 gradient magnitude with a zero border for neighbour lookups.
fn l1_magnitude(grad: &Grad) -> (Vec<f32>, usize) {
    let w = grad.width();
    let h = grad.height();
    let pw = w + 2;
    let mut mag = vec![0.0f32; pw * (h + 2)];
    for y in 0..h {
        let gx = grad.gx.row(y);
        let gy = grad.gy.row(y);
        let dst = &mut mag[(y + 1) * pw + 1..(y + 1) * pw + 1 + w];
        for ((d, &ax), &ay) in dst.iter_mut().zip(gx).zip(gy) {
            *d = ax.abs() + ay.abs();
        }
    }
    (mag, pw)
}

fn suppress(grad: &Grad, low: f32, high: f32) -> Vec<Mark> {
    let w = grad.width();
    let h = grad.height();
    let (mag, pw) = l1_magnitude(grad);
    let mut marks = vec![Mark::Suppressed; w * h];

    for y in 0..h {
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let base = (y + 1) * pw + 1;
        for x in 0..w {
            let i = base + x;
            let m = mag[i];
            if m <= low {
                continue;
            }
            let gx = gx_row[x];
            let gy = gy_row[x];
            let ax = gx.abs();
            let ay = gy.abs();

            let is_max = if ay < ax * TAN_22_5_DEG {
                m > mag[i - 1] && m >= mag[i + 1]
            } else if ay > ax * TAN_67_5_DEG {
                m > mag[i - pw] && m >= mag[i + pw]
            } else if (gx < 0.0) != (gy < 0.0) {
                m > mag[i - pw + 1] && m > mag[i + pw - 1]
            } else {
                m > mag[i - pw - 1] && m > mag[i + pw + 1]
            };

            if is_max {
                marks[y * w + x] = if m > high { Mark::Strong } else { Mark::Weak };
            }
        }
    }
    marks
}

fn hysteresis(marks: &[Mark], w: usize, h: usize) -> GrayImage {
    let mut out = GrayImage::new(w, h);
    let mut stack: Vec<usize> = marks
        .iter()
        .enumerate()
        .filter(|(_, m)| **m == Mark::Strong)
        .map(|(i, _)| i)
        .collect();
    for &i in &stack {
        out.data_mut()[i] = 255;
    }

    while let Some(idx) = stack.pop() {
        let x = (idx % w) as isize;
        let y = (idx / w) as isize;
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                let xn = x + dx;
                let yn = y + dy;
                if xn < 0 || yn < 0 || xn >= w as isize || yn >= h as isize {
                    continue;
                }
                let n = yn as usize * w + xn as usize;
                if marks[n] == Mark::Weak && out.data()[n] == 0 {
                    out.data_mut()[n] = 255;
                    stack.push(n);
                }
            }
        }
    }
    out
}

/// Detect edges in an 8-bit intensity image.
pub fn canny(gray: &GrayImage, low: f32, high: f32) -> GrayImage {
    let w = gray.width();
    let h = gray.height();
    if w == 0 || h == 0 {
        return GrayImage::new(w, h);
    }
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    let grad = sobel_gradients(&ImageF32::from_gray(gray, 1.0));
    let marks = suppress(&grad, low, high);
    hysteresis(&marks, w, h)
}
