//! The `RegionFetcher` trait and the metadata a backend reports at open time.

use bytes::Bytes;

use crate::error::RegionError;

use super::pixel::{PixelBuffer, PixelLayout};

// =============================================================================
// Source Geometry
// =============================================================================

/// One physical resolution level of the source pyramid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceLevel {
    /// Width of this level in pixels.
    pub width: u64,

    /// Height of this level in pixels.
    pub height: u64,

    /// Downsample factor relative to level 0.
    ///
    /// Level 0 has downsample 1.0; factors never decrease with the level
    /// index. Source levels are rarely exact powers of two of each other.
    pub downsample: f64,
}

/// Backend-declared non-empty scan region, in level-0 pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceBounds {
    /// Left edge of the region.
    pub x: i64,

    /// Top edge of the region.
    pub y: i64,

    /// Region width.
    pub width: u64,

    /// Region height.
    pub height: u64,
}

/// Snapshot of everything a backend reports about an open slide.
///
/// Read once at open; the generator never queries the backend for geometry
/// again.
#[derive(Debug, Clone, Default)]
pub struct SlideMetadata {
    /// Physical resolution levels, finest (level 0) first.
    pub levels: Vec<SourceLevel>,

    /// Non-empty scan region, if the source declares one.
    pub bounds: Option<SourceBounds>,

    /// Microns per pixel at level 0, if calibrated.
    pub mpp: Option<f64>,

    /// Slide background color as a `#rrggbb` string, if declared.
    pub background_color: Option<String>,

    /// Raw ICC color profile bytes, if the slide carries one.
    pub icc_profile: Option<Bytes>,
}

impl SlideMetadata {
    /// Dimensions of the finest level, or `None` if no levels exist.
    pub fn level0_dimensions(&self) -> Option<(u64, u64)> {
        self.levels.first().map(|l| (l.width, l.height))
    }

    /// Number of physical resolution levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

// =============================================================================
// RegionFetcher Trait
// =============================================================================

/// Read access to rectangular pixel regions of an open slide.
///
/// One implementation exists per slide-decoding backend. The generator owns
/// the fetcher for its lifetime; the fetcher owns the backend handle and
/// releases it exactly once when dropped.
///
/// # Contract
///
/// `read_region` must return exactly `width x height` pixels in the layout
/// declared by [`pixel_layout`](RegionFetcher::pixel_layout). Backends that
/// can only read at native resolution must resample internally to the
/// requested size. A failed read poisons nothing: the generator remains
/// usable for other tiles.
///
/// # Thread safety
///
/// All calls are synchronous and blocking. Whether concurrent `read_region`
/// calls against one handle are safe is a property of the backend, not of
/// this crate: implementations whose runtime pins calls to specially
/// attached threads (JVM-bridged readers, for instance) must not implement
/// `Sync`, which restricts the owning generator to one thread at compile
/// time.
pub trait RegionFetcher {
    /// The open-time metadata snapshot for this slide.
    fn metadata(&self) -> &SlideMetadata;

    /// Channel packing of the buffers returned by `read_region`.
    fn pixel_layout(&self) -> PixelLayout;

    /// Read a pixel region from a numbered source level.
    ///
    /// # Arguments
    ///
    /// * `level` - Source level index (0 = highest resolution)
    /// * `x`, `y` - Top-left corner in level-0 coordinate space
    /// * `width`, `height` - Region size in `level` pixels
    fn read_region(
        &self,
        level: usize,
        x: i64,
        y: i64,
        width: u64,
        height: u64,
    ) -> Result<PixelBuffer, RegionError>;
}

// =============================================================================
// Tests
// =============================================================================
