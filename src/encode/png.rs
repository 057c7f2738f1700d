//! PNG tile encoding.
//!
//! Tiles are written as 8-bit RGB without an alpha channel, at the zlib
//! compression level derived from the quality option (0 = store, 9 =
//! smallest). An ICC profile, when present, is attached through the
//! encoder's optional metadata support; encoders or consumers without
//! profile support drop it, which is reported rather than swallowed.

use bytes::Bytes;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use tracing::warn;

use crate::error::EncodeError;

use super::check_rgb_buffer;

/// Encode an RGB buffer as PNG.
///
/// Returns the encoded bytes and whether the ICC profile was attached.
/// The PNG path is lossless at the RGB level regardless of the compression
/// tier.
pub fn encode_png(
    rgb: &[u8],
    width: u32,
    height: u32,
    compression: u8,
    icc_profile: Option<&[u8]>,
) -> Result<(Bytes, bool), EncodeError> {
    check_rgb_buffer(rgb, width, height)?;

    let mut out = Vec::new();
    let mut encoder = PngEncoder::new_with_quality(
        &mut out,
        compression_type(compression),
        FilterType::Adaptive,
    );

    let mut profile_embedded = false;
    if let Some(profile) = icc_profile.filter(|p| !p.is_empty()) {
        match encoder.set_icc_profile(profile.to_vec()) {
            Ok(()) => profile_embedded = true,
            Err(_) => {
                warn!("PNG encoder does not support ICC profiles, attaching skipped");
            }
        }
    }

    encoder
        .write_image(rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::Codec {
            format: "png",
            message: e.to_string(),
        })?;

    Ok((Bytes::from(out), profile_embedded))
}

/// Map a zlib level (0-9) onto the encoder's compression setting.
fn compression_type(level: u8) -> CompressionType {
    if level == 0 {
        CompressionType::Uncompressed
    } else {
        CompressionType::Level(level.min(9))
    }
}

// =============================================================================
// Tests
// =============================================================================
