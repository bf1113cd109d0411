//! 4-channel 8-bit camera frames.
//!
//! [`RgbaFrame`] borrows pixel memory handed over by the frame source;
//! [`FrameBuffer`] owns it so a frame can cross a thread boundary.
use super::GrayImage;
use std::fmt;

const CHANNELS: usize = 4;

/// Frame validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Pixel buffer is shorter than `stride * (height - 1) + width * 4`.
    SizeMismatch { expected: usize, actual: usize },
    /// Row stride smaller than `width * 4` bytes.
    InvalidStride { width: usize, stride: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::SizeMismatch { expected, actual } => {
                write!(f, "frame buffer too small: expected {expected} bytes, got {actual}")
            }
            FrameError::InvalidStride { width, stride } => {
                write!(f, "row stride {stride} too small for width {width}")
            }
        }
    }
}

impl std::error::Error for FrameError {}

fn required_len(w: usize, h: usize, stride: usize) -> usize {
    if w == 0 || h == 0 {
        0
    } else {
        stride * (h - 1) + w * CHANNELS
    }
}

/// Borrowed RGBA frame; `stride` is in bytes.
#[derive(Clone, Copy, Debug)]
pub struct RgbaFrame<'a> {
    w: usize,
    h: usize,
    stride: usize,
    data: &'a [u8],
}

impl<'a> RgbaFrame<'a> {
    pub fn new(w: usize, h: usize, stride: usize, data: &'a [u8]) -> Result<Self, FrameError> {
        if stride < w * CHANNELS {
            return Err(FrameError::InvalidStride { width: w, stride });
        }
        let expected = required_len(w, h, stride);
        if data.len() < expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, stride, data })
    }

    /// Tightly packed frame (`stride == width * 4`).
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Result<Self, FrameError> {
        Self::new(w, h, w * CHANNELS, data)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Pixel at (x, y) as `[r, g, b, a]`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = y * self.stride + x * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Luma conversion with BT.601 weights; alpha is ignored.
    pub fn to_gray(&self) -> GrayImage {
        let mut out = GrayImage::new(self.w, self.h);
        for y in 0..self.h {
            let src = &self.data[y * self.stride..y * self.stride + self.w * CHANNELS];
            let dst = &mut out.data_mut()[y * self.w..(y + 1) * self.w];
            for (d, px) in dst.iter_mut().zip(src.chunks_exact(CHANNELS)) {
                let l = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                *d = l.round().clamp(0.0, 255.0) as u8;
            }
        }
        out
    }
}

/// Owned, tightly packed RGBA frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameBuffer {
    w: usize,
    h: usize,
    data: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(w: usize, h: usize, data: Vec<u8>) -> Result<Self, FrameError> {
        let expected = w * h * CHANNELS;
        if data.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    /// Copy a borrowed frame, dropping any row padding.
    pub fn from_frame(frame: &RgbaFrame<'_>) -> Self {
        let mut data = Vec::with_capacity(frame.w * frame.h * CHANNELS);
        for y in 0..frame.h {
            let start = y * frame.stride;
            data.extend_from_slice(&frame.data[start..start + frame.w * CHANNELS]);
        }
        Self {
            w: frame.w,
            h: frame.h,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_view(&self) -> RgbaFrame<'_> {
        RgbaFrame {
            w: self.w,
            h: self.h,
            stride: self.w * CHANNELS,
            data: &self.data,
        }
    }
}
