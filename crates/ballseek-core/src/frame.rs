use image::GrayImage;

use crate::error::FrameError;

/// Borrowed view of a raw camera frame.
///
/// Accepted layouts mirror what the capture side produces: a tightly packed
/// single-channel H×W buffer (monochrome global-shutter sensor), the same
/// data carrying an explicit ×1 channel axis, or interleaved H×W×3 RGB.
/// The view never owns or mutates the buffer; shape validation happens at
/// conversion time so that a mis-shaped buffer surfaces from the detection
/// call itself.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: &'a [u8], // row-major, len = w*h*channels
}

impl<'a> FrameView<'a> {
    /// View over a single-channel intensity buffer (H×W or H×W×1).
    pub fn gray(width: usize, height: usize, data: &'a [u8]) -> Self {
        Self::with_channels(width, height, 1, data)
    }

    /// View over an interleaved RGB buffer (H×W×3).
    pub fn rgb(width: usize, height: usize, data: &'a [u8]) -> Self {
        Self::with_channels(width, height, 3, data)
    }

    /// View over a packed buffer with an arbitrary channel count.
    pub fn with_channels(width: usize, height: usize, channels: usize, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    fn validate(&self) -> Result<(), FrameError> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.channels != 1 && self.channels != 3 {
            return Err(FrameError::InvalidFormat {
                channels: self.channels,
            });
        }
        let expected = self.width * self.height * self.channels;
        if self.data.len() != expected {
            return Err(FrameError::BufferLength {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }

    /// Collapse the view to a single-channel intensity image.
    ///
    /// Three-channel input is converted with the BT.601 luminance weights
    /// (0.299 R + 0.587 G + 0.114 B, rounded); single-channel input is
    /// copied through unchanged.
    pub fn to_intensity(&self) -> Result<GrayImage, FrameError> {
        self.validate()?;
        let (w, h) = (self.width as u32, self.height as u32);
        let gray = match self.channels {
            1 => GrayImage::from_raw(w, h, self.data.to_vec()),
            _ => {
                let mut out = Vec::with_capacity(self.width * self.height);
                for px in self.data.chunks_exact(3) {
                    let luma =
                        (299 * px[0] as u32 + 587 * px[1] as u32 + 114 * px[2] as u32 + 500) / 1000;
                    out.push(luma as u8);
                }
                GrayImage::from_raw(w, h, out)
            }
        };
        gray.ok_or(FrameError::BufferLength {
            expected: self.width * self.height,
            got: self.data.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_view_copies_through() {
        let data = [10u8, 20, 30, 40, 50, 60];
        let view = FrameView::gray(3, 2, &data);
        let gray = view.to_intensity().unwrap();
        assert_eq!(gray.dimensions(), (3, 2));
        assert_eq!(gray.as_raw().as_slice(), &data);
    }

    #[test]
    fn rgb_view_uses_luminance_weights() {
        // Pure red, pure green, pure blue, mid gray.
        let data = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 128, 128, 128];
        let view = FrameView::rgb(2, 2, &data);
        let gray = view.to_intensity().unwrap();
        assert_eq!(gray.as_raw().as_slice(), &[76, 150, 29, 128]);
    }

    #[test]
    fn unsupported_channel_count_is_invalid_format() {
        let data = [0u8; 8];
        let view = FrameView::with_channels(2, 2, 2, &data);
        assert_eq!(
            view.to_intensity(),
            Err(FrameError::InvalidFormat { channels: 2 })
        );
    }

    #[test]
    fn short_buffer_is_rejected() {
        let data = [0u8; 5];
        let view = FrameView::gray(3, 2, &data);
        assert_eq!(
            view.to_intensity(),
            Err(FrameError::BufferLength {
                expected: 6,
                got: 5
            })
        );
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        let view = FrameView::gray(0, 4, &[]);
        assert_eq!(
            view.to_intensity(),
            Err(FrameError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
    }
}
