//! 3×3 Sobel gradients with replicated borders.
//!
//! Outputs per-pixel `gx`, `gy` and the Euclidean magnitude. The Canny stage
//! derives its own L1 magnitude from `gx`/`gy`; the segment detector uses
//! `mag` for seeding and orientation from `atan2(gy, gx)`.
use crate::image::{ImageF32, ImageView, ImageViewMut};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel gradient buffers.
#[derive(Clone, Debug, Default)]
pub struct Grad {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative
    pub gy: ImageF32,
    /// `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
}

impl Grad {
    pub fn width(&self) -> usize {
        self.gx.w
    }

    pub fn height(&self) -> usize {
        self.gx.h
    }

    /// Gradient direction at (x, y) in radians, range (−π, π].
    #[inline]
    pub fn direction(&self, x: usize, y: usize) -> f32 {
        self.gy.get(x, y).atan2(self.gx.get(x, y))
    }
}

/// Compute Sobel gradients on a single-channel float image.
pub fn sobel_gradients(l: &ImageF32) -> Grad {
    let w = l.w;
    let h = l.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let rows = [
            l.row(y.saturating_sub(1)),
            l.row(y),
            l.row((y + 1).min(h - 1)),
        ];
        let out_gx = gx.row_mut(y);
        let out_gy = gy.row_mut(y);
        let out_mag = mag.row_mut(y);
        for x in 0..w {
            let xs = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let mut sx = 0.0;
            let mut sy = 0.0;
            for (ky, row) in rows.iter().enumerate() {
                for (kx, &xi) in xs.iter().enumerate() {
                    let v = row[xi];
                    sx += v * SOBEL_KERNEL_X[ky][kx];
                    sy += v * SOBEL_KERNEL_Y[ky][kx];
                }
            }
            out_gx[x] = sx;
            out_gy[x] = sy;
            out_mag[x] = (sx * sx + sy * sy).sqrt();
        }
    }

    Grad { gx, gy, mag }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_step_has_horizontal_gradient() {
        let mut img = ImageF32::new(8, 4);
        for y in 0..4 {
            for x in 4..8 {
                img.set(x, y, 1.0);
            }
        }
        let g = sobel_gradients(&img);
        assert_eq!(g.gx.get(3, 1), 4.0);
        assert_eq!(g.gx.get(4, 1), 4.0);
        assert_eq!(g.gy.get(3, 1), 0.0);
        // Replicated border: no response at the image edge.
        assert_eq!(g.gx.get(0, 0), 0.0);
        assert_eq!(g.mag.get(7, 3), 0.0);
    }
}
