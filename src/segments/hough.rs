//! Progressive probabilistic Hough transform on binary maps.
//!
//! Non-zero pixels are visited in random order. Each pixel votes into a
//! `(θ, ρ)` accumulator; once a bin reaches `threshold` the corresponding
//! line is walked in both directions from the pixel (fixed-point stepping
//! along the dominant axis), tolerating runs of at most `max_line_gap`
//! empty pixels. Pixels on the walked corridor are removed from further
//! consideration; if the segment is long enough its votes are withdrawn and
//! it is reported.
//!
//! Output order is detection order, which downstream selection relies on.
//! The pixel sampling RNG is seeded so results are reproducible.
use super::Segment;
use crate::image::GrayImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const SHIFT: i32 = 16;

/// Parameters of the probabilistic Hough transform.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    /// Distance resolution in pixels.
    pub rho: f32,
    /// Angle resolution in radians.
    pub theta: f32,
    /// Minimum accumulator votes for a line.
    pub threshold: u32,
    /// Minimum extent along x or y for a reported segment.
    pub min_line_length: i32,
    /// Maximum run of empty pixels bridged while walking a line.
    pub max_line_gap: i32,
    /// Seed for the pixel sampling order.
    pub seed: u64,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: std::f32::consts::PI / 180.0,
            threshold: 100,
            min_line_length: 75,
            max_line_gap: 20,
            seed: 0x5eed_f00d,
        }
    }
}

struct Accumulator {
    votes: Vec<i32>,
    num_rho: usize,
    /// Interleaved `cos θ / ρ`, `sin θ / ρ` per angle bin.
    trig: Vec<f32>,
}

impl Accumulator {
    fn new(w: usize, h: usize, rho: f32, theta: f32) -> Self {
        let irho = 1.0 / rho;
        let num_angle = ((std::f32::consts::PI / theta).round() as usize).max(1);
        let num_rho = ((((w + h) * 2 + 1) as f32 / rho).round() as usize).max(1);
        let mut trig = Vec::with_capacity(num_angle * 2);
        for n in 0..num_angle {
            let ang = n as f32 * theta;
            trig.push(ang.cos() * irho);
            trig.push(ang.sin() * irho);
        }
        Self {
            votes: vec![0; num_angle * num_rho],
            num_rho,
            trig,
        }
    }

    fn num_angle(&self) -> usize {
        self.trig.len() / 2
    }

    #[inline]
    fn bin(&self, n: usize, x: i32, y: i32) -> usize {
        let r = (x as f32 * self.trig[n * 2] + y as f32 * self.trig[n * 2 + 1]).round_ties_even()
            as isize
            + ((self.num_rho - 1) / 2) as isize;
        n * self.num_rho + r.clamp(0, self.num_rho as isize - 1) as usize
    }

    /// Vote for every angle; returns the best `(votes, angle bin)`.
    fn vote(&mut self, x: i32, y: i32) -> (i32, usize) {
        let mut best = (i32::MIN, 0);
        for n in 0..self.num_angle() {
            let i = self.bin(n, x, y);
            self.votes[i] += 1;
            if self.votes[i] > best.0 {
                best = (self.votes[i], n);
            }
        }
        best
    }

    fn unvote(&mut self, x: i32, y: i32) {
        for n in 0..self.num_angle() {
            let i = self.bin(n, x, y);
            self.votes[i] -= 1;
        }
    }
}

/// Fixed-point walker along a line direction. Positions are 48.16 fixed
/// point in `i64`, so any frame size representable as `i32` is safe.
#[derive(Clone, Copy)]
struct Walk {
    x0: i64,
    y0: i64,
    dx: i64,
    dy: i64,
    x_major: bool,
}

impl Walk {
    fn new(px: i32, py: i32, a: f32, b: f32) -> Self {
        let one = (1i64 << SHIFT) as f32;
        let half = 1i64 << (SHIFT - 1);
        let (px, py) = (i64::from(px), i64::from(py));
        if a.abs() > b.abs() {
            Self {
                x0: px,
                y0: (py << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round_ties_even() as i64,
                x_major: true,
            }
        } else {
            Self {
                x0: (px << SHIFT) + half,
                y0: py,
                dx: (a * one / b.abs()).round_ties_even() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    /// Pixel positions stepping forward (`k == 0`) or backward.
    fn pixels(self, k: usize) -> impl Iterator<Item = (i32, i32)> {
        let (dx, dy) = if k == 0 {
            (self.dx, self.dy)
        } else {
            (-self.dx, -self.dy)
        };
        let x_major = self.x_major;
        (0i64..).map(move |step| {
            let x = self.x0 + dx * step;
            let y = self.y0 + dy * step;
            if x_major {
                (x as i32, (y >> SHIFT) as i32)
            } else {
                ((x >> SHIFT) as i32, y as i32)
            }
        })
    }
}

/// Detect line segments in a binary map (non-zero = foreground).
pub fn hough_segments(map: &GrayImage, opts: &HoughOptions) -> Vec<Segment> {
    let w = map.width();
    let h = map.height();
    if w == 0 || h == 0 || opts.rho <= 0.0 || opts.theta <= 0.0 {
        return Vec::new();
    }
    let (wi, hi) = (w as i32, h as i32);
    let in_bounds = |x: i32, y: i32| x >= 0 && y >= 0 && x < wi && y < hi;

    let mut acc = Accumulator::new(w, h, opts.rho, opts.theta);
    let mut mask: Vec<bool> = map.data().iter().map(|&v| v != 0).collect();
    let mut points: Vec<(i32, i32)> = mask
        .iter()
        .enumerate()
        .filter(|&(_, &m)| m)
        .map(|(i, _)| ((i % w) as i32, (i / w) as i32))
        .collect();
    let threshold = opts.threshold.max(1) as i32;
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut lines = Vec::new();

    let mut count = points.len();
    while count > 0 {
        let idx = rng.gen_range(0..count);
        let (px, py) = points[idx];
        points[idx] = points[count - 1];
        count -= 1;

        if !mask[py as usize * w + px as usize] {
            continue;
        }
        let (max_val, max_n) = acc.vote(px, py);
        if max_val < threshold {
            continue;
        }

        let a = -acc.trig[max_n * 2 + 1];
        let b = acc.trig[max_n * 2];
        let walk = Walk::new(px, py, a, b);

        let mut ends = [(px, py); 2];
        for (k, end) in ends.iter_mut().enumerate() {
            let mut gap = 0;
            for (x, y) in walk.pixels(k) {
                if !in_bounds(x, y) {
                    break;
                }
                if mask[y as usize * w + x as usize] {
                    gap = 0;
                    *end = (x, y);
                } else {
                    gap += 1;
                    if gap > opts.max_line_gap {
                        break;
                    }
                }
            }
        }

        let good = (ends[1].0 - ends[0].0).abs() >= opts.min_line_length
            || (ends[1].1 - ends[0].1).abs() >= opts.min_line_length;

        for (k, &end) in ends.iter().enumerate() {
            for (x, y) in walk.pixels(k) {
                if !in_bounds(x, y) {
                    break;
                }
                let i = y as usize * w + x as usize;
                if mask[i] {
                    if good {
                        acc.unvote(x, y);
                    }
                    mask[i] = false;
                }
                if (x, y) == end {
                    break;
                }
            }
        }

        if good {
            lines.push(Segment::from_coords(
                ends[0].0 as f32,
                ends[0].1 as f32,
                ends[1].0 as f32,
                ends[1].1 as f32,
            ));
        }
    }
    lines
}
