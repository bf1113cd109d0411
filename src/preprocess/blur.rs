//! Separable Gaussian blur on 8-bit images.
//!
//! The kernel is sampled from `exp(-d² / 2σ²)` and normalised to unit sum.
//! Borders use reflect-101 (`dcb|abcd|cba`), results are rounded to `u8`.
use crate::image::GrayImage;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Normalised 1D Gaussian taps of odd length `ksize`.
pub fn gaussian_kernel(ksize: usize, sigma: f32) -> Vec<f32> {
    let ksize = ksize.max(1) | 1;
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let center = (ksize / 2) as f32;
    let mut taps: Vec<f32> = (0..ksize)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Reflect-101 border index.
#[inline]
pub(crate) fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let mut i = i;
    while i < 0 || i >= n {
        i = if i < 0 { -i } else { 2 * n - 2 - i };
    }
    i as usize
}

fn blur_row(src: &[u8], taps: &[f32], dst: &mut [f32]) {
    let r = (taps.len() / 2) as isize;
    let w = src.len();
    for (x, d) in dst.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (k, &t) in taps.iter().enumerate() {
            let xi = reflect101(x as isize + k as isize - r, w);
            acc += t * src[xi] as f32;
        }
        *d = acc;
    }
}

fn blur_column(tmp: &[f32], w: usize, h: usize, y: usize, taps: &[f32], dst: &mut [u8]) {
    let r = (taps.len() / 2) as isize;
    let rows: Vec<usize> = (0..taps.len())
        .map(|k| reflect101(y as isize + k as isize - r, h))
        .collect();
    for (x, d) in dst.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (&t, &yy) in taps.iter().zip(&rows) {
            acc += t * tmp[yy * w + x];
        }
        *d = acc.round().clamp(0.0, 255.0) as u8;
    }
}

/// Blur with a square `ksize × ksize` Gaussian of standard deviation `sigma`.
pub fn gaussian_blur(src: &GrayImage, ksize: usize, sigma: f32) -> GrayImage {
    let w = src.width();
    let h = src.height();
    if w == 0 || h == 0 {
        return src.clone();
    }
    let taps = gaussian_kernel(ksize, sigma);
    let mut tmp = vec![0.0f32; w * h];
    let mut out = GrayImage::new(w, h);

    #[cfg(feature = "parallel")]
    {
        tmp.par_chunks_mut(w)
            .zip(src.data().par_chunks(w))
            .for_each(|(dst, row)| blur_row(row, &taps, dst));
        out.data_mut()
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, dst)| blur_column(&tmp, w, h, y, &taps, dst));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (dst, row) in tmp.chunks_mut(w).zip(src.data().chunks(w)) {
            blur_row(row, &taps, dst);
        }
        for (y, dst) in out.data_mut().chunks_mut(w).enumerate() {
            blur_column(&tmp, w, h, y, &taps, dst);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn kernel_matches_sampled_gaussian() {
        let k = gaussian_kernel(5, 1.6);
        assert_eq!(k.len(), 5);
        assert_abs_diff_eq!(k.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(k[0], 0.1286, epsilon = 1e-3);
        assert_abs_diff_eq!(k[2], 0.2808, epsilon = 1e-3);
        assert_abs_diff_eq!(k[1], k[3]);
    }

    #[test]
    fn reflect101_mirrors_without_repeating_edge() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(-2, 5), 2);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(6, 5), 2);
        assert_eq!(reflect101(3, 1), 0);
    }

    #[test]
    fn blur_preserves_constant_and_smooths_step() {
        let flat = GrayImage::filled(9, 7, 90);
        assert_eq!(gaussian_blur(&flat, 5, 1.6), flat);

        let mut step = GrayImage::new(10, 3);
        for y in 0..3 {
            for x in 5..10 {
                step.set(x, y, 200);
            }
        }
        let out = gaussian_blur(&step, 5, 1.6);
        assert_eq!(out.get(0, 1), 0);
        assert_eq!(out.get(9, 1), 200);
        assert!(out.get(4, 1) > 0 && out.get(4, 1) < 100);
        assert!(out.get(5, 1) > 100 && out.get(5, 1) < 200);
    }
}
