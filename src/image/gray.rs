//! Owned 8-bit single-channel buffer.
//!
//! Intermediate intensity images and the binary maps produced by the
//! preprocessor (values `0` or `255`) share this type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImage {
    /// Zero-filled image.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0)
    }

    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap raw row-major bytes. Returns `None` when the length does not
    /// match `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }

    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Pixel-wise AND of two binary maps of identical size.
    pub fn and(&self, mask: &GrayImage) -> GrayImage {
        debug_assert_eq!(self.width, mask.width);
        debug_assert_eq!(self.height, mask.height);
        let data = self
            .data
            .iter()
            .zip(&mask.data)
            .map(|(&a, &m)| if m != 0 { a } else { 0 })
            .collect();
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }
}
