use crate::types::Point;

/// Ordinary least-squares fit `y = gradient·x + intercept`.
///
/// Sums are accumulated in `f64`. A fit through fewer than two points, or
/// through points that all share one x, is `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    pub gradient: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn fit<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let (mut n, mut sx, mut sy, mut sxx, mut sxy) = (0.0f64, 0.0, 0.0, 0.0, 0.0);
        for p in points {
            let (x, y) = (p.x as f64, p.y as f64);
            n += 1.0;
            sx += x;
            sy += y;
            sxx += x * x;
            sxy += x * y;
        }
        if n < 2.0 {
            return None;
        }
        let denom = n * sxx - sx * sx;
        if !denom.is_finite() || denom.abs() <= f64::EPSILON * n * sxx {
            return None;
        }
        let gradient = (n * sxy - sx * sy) / denom;
        let intercept = (sy - gradient * sx) / n;
        (gradient.is_finite() && intercept.is_finite()).then_some(Self {
            gradient,
            intercept,
        })
    }

    #[inline]
    pub fn y_at(&self, x: f32) -> f32 {
        (self.gradient * x as f64 + self.intercept) as f32
    }

    /// Signed vertical offset of `p` from the fitted line.
    #[inline]
    pub fn residual(&self, p: Point) -> f32 {
        p.y - self.y_at(p.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_line() {
        let pts = (0..5).map(|i| Point::new(i as f32 * 10.0, 3.0 + 0.5 * i as f32 * 10.0));
        let fit = LinearFit::fit(pts).unwrap();
        assert_relative_eq!(fit.gradient, 0.5, epsilon = 1e-9);
        assert_relative_eq!(fit.intercept, 3.0, epsilon = 1e-9);
        assert_relative_eq!(fit.y_at(100.0), 53.0, epsilon = 1e-4);
        assert_relative_eq!(fit.residual(Point::new(20.0, 20.0)), 7.0, epsilon = 1e-4);
    }

    #[test]
    fn degenerate_inputs_have_no_fit() {
        assert_eq!(LinearFit::fit(std::iter::empty()), None);
        assert_eq!(LinearFit::fit([Point::new(1.0, 2.0)]), None);
        assert_eq!(
            LinearFit::fit([Point::new(4.0, 0.0), Point::new(4.0, 9.0), Point::new(4.0, 3.0)]),
            None
        );
    }
}
