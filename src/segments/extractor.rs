use super::region_accumulator::RegionAccumulator;
use super::{LsdOptions, Segment};
use crate::angle::{
    angular_difference, normalize_half_pi, normalize_signed_pi, signed_angular_difference,
};
use crate::edges::{sobel_gradients, Grad};
use crate::image::ImageF32;
use crate::types::Point;
use nalgebra::{Matrix2, SymmetricEigen};

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub(super) struct LsdExtractor {
    grad: Grad,
    width: usize,
    height: usize,
    opts: LsdOptions,
    angle_tol: f32,
    used: Vec<bool>,
    angle_cache: Vec<f32>,
    stack: Vec<usize>,
    region: RegionAccumulator,
    segments: Vec<Segment>,
}

impl LsdExtractor {
    pub(super) fn new(l: &ImageF32, opts: LsdOptions) -> Self {
        let grad = sobel_gradients(l);
        let n = l.w * l.h;
        Self {
            grad,
            width: l.w,
            height: l.h,
            opts,
            angle_tol: opts.angle_tolerance_deg.to_radians(),
            used: vec![false; n],
            angle_cache: vec![f32::NAN; n],
            stack: Vec::with_capacity(64),
            region: RegionAccumulator::with_capacity(128),
            segments: Vec::new(),
        }
    }

    /// Seeds are visited in raster order, so segments come out roughly
    /// sorted by their topmost pixel.
    pub(super) fn extract(mut self) -> Vec<Segment> {
        for idx in 0..(self.width * self.height) {
            self.process_seed(idx);
        }
        self.segments
    }

    fn process_seed(&mut self, idx: usize) {
        if self.used[idx] {
            return;
        }
        let (x, y) = (idx % self.width, idx / self.width);
        if self.grad.mag.get(x, y) < self.opts.magnitude_threshold {
            return;
        }

        self.region.reset();
        self.stack.clear();
        let seed_angle = self.angle_at(idx);
        self.used[idx] = true;
        self.stack.push(idx);
        self.grow_region(seed_angle);

        match self.fit_segment() {
            Some(segment) => self.segments.push(segment),
            // Rejected regions go back to the seed pool.
            None => self.region.release(&mut self.used),
        }
    }

    fn grow_region(&mut self, seed_angle: f32) {
        let half_tol = self.angle_tol * 0.5;
        while let Some(idx) = self.stack.pop() {
            let x = idx % self.width;
            let y = idx / self.width;
            let here = self.angle_at(idx);
            let aligned = self.angle_difference(here, seed_angle) <= half_tol;
            self.region.push(idx, x, y, aligned);

            for (dx, dy) in NEIGH_OFFSETS {
                let xn = x as isize + dx;
                let yn = y as isize + dy;
                if xn < 0 || yn < 0 || xn >= self.width as isize || yn >= self.height as isize {
                    continue;
                }
                let (nx, ny) = (xn as usize, yn as usize);
                let nidx = ny * self.width + nx;
                if self.used[nidx] || self.grad.mag.get(nx, ny) < self.opts.magnitude_threshold {
                    continue;
                }
                let neighbor_angle = self.angle_at(nidx);
                if self.angle_difference(neighbor_angle, seed_angle) <= self.angle_tol {
                    self.used[nidx] = true;
                    self.stack.push(nidx);
                }
            }
        }
    }

    /// PCA line fit of the current region, `None` if it fails the size,
    /// length or alignment checks.
    fn fit_segment(&self) -> Option<Segment> {
        if self.region.len() < self.opts.min_region_px
            || self.region.aligned_fraction() < self.opts.min_aligned_fraction
        {
            return None;
        }
        let ([cx, cy], [cxx, cxy, cyy]) = self.region.moments()?;
        let eig = SymmetricEigen::new(Matrix2::new(cxx, cxy, cxy, cyy));
        let major = if eig.eigenvalues[0] >= eig.eigenvalues[1] { 0 } else { 1 };
        let lambda = eig.eigenvalues[major];
        if !lambda.is_finite() || lambda <= 0.0 {
            return None;
        }
        let v = eig.eigenvectors.column(major);
        let norm = v[0].hypot(v[1]);
        if !norm.is_finite() || norm < 1e-6 {
            return None;
        }
        let (tx, ty) = (v[0] / norm, v[1] / norm);

        let (smin, smax) = self
            .region
            .indices
            .iter()
            .map(|&idx| {
                let dx = (idx % self.width) as f32 - cx;
                let dy = (idx / self.width) as f32 - cy;
                dx * tx + dy * ty
            })
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s), hi.max(s))
            });
        let len = smax - smin;
        if !len.is_finite() || len < self.opts.min_length_px {
            return None;
        }

        Some(Segment::new(
            Point::new(cx + smin * tx, cy + smin * ty),
            Point::new(cx + smax * tx, cy + smax * ty),
        ))
    }

    fn angle_at(&mut self, idx: usize) -> f32 {
        let cached = self.angle_cache[idx];
        if !cached.is_nan() {
            return cached;
        }
        let raw = self.grad.direction(idx % self.width, idx / self.width);
        let angle = if self.opts.enforce_polarity {
            normalize_signed_pi(raw)
        } else {
            normalize_half_pi(raw)
        };
        self.angle_cache[idx] = angle;
        angle
    }

    fn angle_difference(&self, a: f32, b: f32) -> f32 {
        if self.opts.enforce_polarity {
            signed_angular_difference(a, b)
        } else {
            angular_difference(a, b)
        }
    }
}
