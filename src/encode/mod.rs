//! Tile encoding.
//!
//! Turns a normalized pixel buffer into transport bytes. Two paths exist:
//! baseline JPEG (with optional embedded ICC profile in APP2 marker
//! segments) and 8-bit RGB PNG (with the profile attached through the
//! encoder's optional metadata support). The encoders never resize; the
//! buffer's dimensions are the tile's dimensions.
//!
//! ICC embedding is best-effort: a profile too large for the JPEG marker
//! budget, or unsupported by the PNG encoder, is dropped, and the drop is
//! reported on [`EncodedTile::profile_embedded`] rather than swallowed.

mod jpeg;
mod png;

use bytes::Bytes;

use crate::error::EncodeError;
use crate::options::{GeneratorOptions, TileFormat};
use crate::source::PixelBuffer;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// An encoded tile ready for transport.
#[derive(Debug, Clone)]
pub struct EncodedTile {
    /// Encoded image bytes.
    pub data: Bytes,

    /// Declared MIME type (`image/jpeg` or `image/png`).
    pub mime_type: &'static str,

    /// Whether the ICC profile made it into the output.
    ///
    /// `false` when no profile was supplied, or when embedding degraded
    /// (profile too large for JPEG markers, PNG encoder without profile
    /// support).
    pub profile_embedded: bool,
}

/// Encode a pixel buffer using the generator's format and quality options.
pub fn encode_tile(
    pixels: &PixelBuffer,
    options: &GeneratorOptions,
    icc_profile: Option<&[u8]>,
) -> Result<EncodedTile, EncodeError> {
    let rgb = pixels.to_rgb();
    let (width, height) = (pixels.width(), pixels.height());

    let (data, profile_embedded) = match options.format {
        TileFormat::Jpeg => {
            encode_jpeg(&rgb, width, height, options.jpeg_quality(), icc_profile)?
        }
        TileFormat::Png => {
            encode_png(&rgb, width, height, options.png_compression(), icc_profile)?
        }
    };

    Ok(EncodedTile {
        data,
        mime_type: options.format.mime_type(),
        profile_embedded,
    })
}

/// Check a raw RGB slice against its declared dimensions.
fn check_rgb_buffer(rgb: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(EncodeError::InvalidBuffer {
            message: format!(
                "{}x{} RGB tile needs {} bytes, got {}",
                width,
                height,
                expected,
                rgb.len()
            ),
        });
    }
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidBuffer {
            message: format!("empty tile: {}x{}", width, height),
        });
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
