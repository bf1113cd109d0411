/// Running moments of a grown pixel region.
pub(crate) struct RegionAccumulator {
    pub indices: Vec<usize>,
    pub sum_x: f32,
    pub sum_y: f32,
    pub sum_xx: f32,
    pub sum_yy: f32,
    pub sum_xy: f32,
    pub aligned: usize,
}

impl RegionAccumulator {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            sum_x: 0.0,
            sum_y: 0.0,
            sum_xx: 0.0,
            sum_yy: 0.0,
            sum_xy: 0.0,
            aligned: 0,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.indices.clear();
        self.sum_x = 0.0;
        self.sum_y = 0.0;
        self.sum_xx = 0.0;
        self.sum_yy = 0.0;
        self.sum_xy = 0.0;
        self.aligned = 0;
    }

    pub(crate) fn push(&mut self, idx: usize, x: usize, y: usize, aligned: bool) {
        self.indices.push(idx);
        let (xf, yf) = (x as f32, y as f32);
        self.sum_x += xf;
        self.sum_y += yf;
        self.sum_xx += xf * xf;
        self.sum_yy += yf * yf;
        self.sum_xy += xf * yf;
        self.aligned += aligned as usize;
    }

    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    pub(crate) fn aligned_fraction(&self) -> f32 {
        if self.indices.is_empty() {
            0.0
        } else {
            self.aligned as f32 / self.indices.len() as f32
        }
    }

    /// Centroid and 2×2 covariance `(cxx, cxy, cyy)`.
    pub(crate) fn moments(&self) -> Option<([f32; 2], [f32; 3])> {
        if self.indices.is_empty() {
            return None;
        }
        let n = self.indices.len() as f32;
        let cx = self.sum_x / n;
        let cy = self.sum_y / n;
        let cov = [
            self.sum_xx / n - cx * cx,
            self.sum_xy / n - cx * cy,
            self.sum_yy / n - cy * cy,
        ];
        (cx.is_finite() && cy.is_finite()).then_some(([cx, cy], cov))
    }

    /// Return the region's pixels to the pool of unused seeds.
    pub(crate) fn release(&self, used: &mut [bool]) {
        for &idx in &self.indices {
            used[idx] = false;
        }
    }
}
