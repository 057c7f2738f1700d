//! Baseline JPEG tile encoding.
//!
//! Quality maps directly onto the encoder's 0-100 scale. Above quality 90
//! chroma subsampling is disabled (4:4:4) to avoid color bleed at
//! near-lossless settings. An ICC profile is embedded as a train of APP2
//! marker segments, each carrying the standard 12-byte `ICC_PROFILE\0`
//! signature, a 1-based sequence number and the total chunk count.

use bytes::Bytes;
use jpeg_encoder::{ColorType, Encoder, SamplingFactor};
use tracing::warn;

use crate::error::EncodeError;

use super::check_rgb_buffer;

/// Marker signature identifying an APP2 segment as ICC profile data.
const ICC_MARKER_SIGNATURE: &[u8; 12] = b"ICC_PROFILE\0";

/// Largest payload a single marker segment can carry.
const MAX_MARKER_DATA: usize = 65533;

/// Profile bytes per chunk once the signature and sequence bytes are paid.
const MAX_ICC_CHUNK: usize = MAX_MARKER_DATA - ICC_MARKER_SIGNATURE.len() - 2;

/// The chunk counter is a single byte, so 255 chunks is the ceiling.
const MAX_ICC_CHUNKS: usize = 255;

/// Encode an RGB buffer as baseline JPEG.
///
/// Returns the encoded bytes and whether the ICC profile was embedded. A
/// profile needing more than 255 chunks is skipped, not an error: the tile
/// is still served, just untagged.
pub fn encode_jpeg(
    rgb: &[u8],
    width: u32,
    height: u32,
    quality: u8,
    icc_profile: Option<&[u8]>,
) -> Result<(Bytes, bool), EncodeError> {
    check_rgb_buffer(rgb, width, height)?;
    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(EncodeError::DimensionsTooLarge {
            width: u64::from(width),
            height: u64::from(height),
            format: "jpeg",
        });
    }

    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, quality.min(100));
    encoder.set_optimized_huffman_tables(true);
    if quality > 90 {
        encoder.set_sampling_factor(SamplingFactor::F_1_1);
    }

    let mut profile_embedded = false;
    if let Some(profile) = icc_profile.filter(|p| !p.is_empty()) {
        let chunks: Vec<&[u8]> = profile.chunks(MAX_ICC_CHUNK).collect();
        if chunks.len() > MAX_ICC_CHUNKS {
            warn!(
                profile_len = profile.len(),
                chunks = chunks.len(),
                "ICC profile exceeds the JPEG marker budget, embedding skipped"
            );
        } else {
            let total = chunks.len() as u8;
            for (index, chunk) in chunks.iter().enumerate() {
                let mut segment =
                    Vec::with_capacity(ICC_MARKER_SIGNATURE.len() + 2 + chunk.len());
                segment.extend_from_slice(ICC_MARKER_SIGNATURE);
                segment.push(index as u8 + 1);
                segment.push(total);
                segment.extend_from_slice(chunk);
                encoder
                    .add_app_segment(2, &segment)
                    .map_err(|e| EncodeError::Codec {
                        format: "jpeg",
                        message: e.to_string(),
                    })?;
            }
            profile_embedded = true;
        }
    }

    encoder
        .encode(rgb, width as u16, height as u16, ColorType::Rgb)
        .map_err(|e| EncodeError::Codec {
            format: "jpeg",
            message: e.to_string(),
        })?;

    Ok((Bytes::from(out), profile_embedded))
}

// =============================================================================
// Tests
// =============================================================================
