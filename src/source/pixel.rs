//! Pixel buffers returned by slide backends.
//!
//! Backends disagree on channel packing: OpenSlide-style readers emit packed
//! 32-bit premultiplied ARGB (which on a little-endian host lays out as
//! B, G, R, A in memory), others hand back plain interleaved RGB. The layout
//! is part of the backend contract and is declared explicitly on every
//! buffer, so normalization to RGB happens in exactly one place.

use crate::error::EncodeError;

/// Channel packing of a backend's pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Packed 32-bit premultiplied ARGB, little-endian word order.
    ///
    /// In memory each pixel is the byte sequence `B, G, R, A`. Alpha is
    /// already multiplied into the color channels, so dropping it yields
    /// the correct flattened color.
    Bgra8Premultiplied,

    /// Interleaved 8-bit RGB, three bytes per pixel.
    Rgb8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Bgra8Premultiplied => 4,
            PixelLayout::Rgb8 => 3,
        }
    }
}

/// A rectangular block of pixels read from a source level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw backend data, checking it against the declared dimensions.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> Result<Self, EncodeError> {
        let expected = width as usize * height as usize * layout.bytes_per_pixel();
        if data.len() != expected {
            return Err(EncodeError::InvalidBuffer {
                message: format!(
                    "{}x{} {:?} buffer needs {} bytes, got {}",
                    width,
                    height,
                    layout,
                    expected,
                    data.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Declared channel packing.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Raw bytes in the declared layout.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Normalize to interleaved RGB, dropping any alpha channel.
    ///
    /// Premultiplied alpha is truncated, never un-multiplied: the color
    /// channels already carry the composited value.
    pub fn to_rgb(&self) -> Vec<u8> {
        match self.layout {
            PixelLayout::Rgb8 => self.data.clone(),
            PixelLayout::Bgra8Premultiplied => {
                let mut rgb = Vec::with_capacity(self.pixel_count() * 3);
                for px in self.data.chunks_exact(4) {
                    rgb.push(px[2]);
                    rgb.push(px[1]);
                    rgb.push(px[0]);
                }
                rgb
            }
        }
    }

    /// Normalize to interleaved RGBA.
    ///
    /// RGB sources gain an opaque alpha channel.
    pub fn to_rgba(&self) -> Vec<u8> {
        match self.layout {
            PixelLayout::Rgb8 => {
                let mut rgba = Vec::with_capacity(self.pixel_count() * 4);
                for px in self.data.chunks_exact(3) {
                    rgba.extend_from_slice(px);
                    rgba.push(0xFF);
                }
                rgba
            }
            PixelLayout::Bgra8Premultiplied => {
                let mut rgba = Vec::with_capacity(self.pixel_count() * 4);
                for px in self.data.chunks_exact(4) {
                    rgba.push(px[2]);
                    rgba.push(px[1]);
                    rgba.push(px[0]);
                    rgba.push(px[3]);
                }
                rgba
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
