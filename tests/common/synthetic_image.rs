use fretboard_detector::grid::EQUAL_TEMPERED_RATIO;

/// Checkerboard-like fretboard: string and fret positions are boundaries
/// between dark and bright cells. Boundary rows and columns are drawn at
/// the mid intensity so every edge has a single-pixel maximum.
pub struct FretboardScene {
    pub width: usize,
    pub height: usize,
    pub string_ys: Vec<usize>,
    pub fret_xs: Vec<usize>,
    pub dark: u8,
    pub bright: u8,
}

impl Default for FretboardScene {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            string_ys: vec![260, 290, 320, 350, 380, 410],
            fret_xs: ratio_fret_positions(600.0, 40.0, 8),
            dark: 40,
            bright: 200,
        }
    }
}

impl FretboardScene {
    fn level(&self, x: usize, y: usize) -> u8 {
        if self.string_ys.contains(&y) || self.fret_xs.contains(&x) {
            return ((self.dark as u16 + self.bright as u16) / 2) as u8;
        }
        let row_band = self.string_ys.iter().filter(|&&s| s < y).count();
        let col_band = self.fret_xs.iter().filter(|&&f| f < x).count();
        if (row_band + col_band) % 2 == 0 {
            self.dark
        } else {
            self.bright
        }
    }

    /// Packed RGBA pixels with equal colour channels.
    pub fn render_rgba(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.width * self.height * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                let v = self.level(x, y);
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        data
    }
}

/// Rounded fret x positions from `bridge_x` towards the nut, with gaps
/// growing by the equal-tempered ratio.
pub fn ratio_fret_positions(bridge_x: f32, first_gap: f32, count: usize) -> Vec<usize> {
    let mut xs = Vec::with_capacity(count);
    let mut x = bridge_x;
    let mut gap = first_gap;
    for _ in 0..count {
        xs.push(x.round() as usize);
        x -= gap;
        gap /= EQUAL_TEMPERED_RATIO;
    }
    xs
}

pub fn blank_rgba(width: usize, height: usize) -> Vec<u8> {
    vec![0u8; width * height * 4]
}
