//! DeepZoom pyramid geometry.

use crate::error::GeometryError;
use crate::source::{SlideMetadata, SourceBounds};

/// Geometry of a virtual DeepZoom pyramid over a physical source pyramid.
///
/// Built once from backend-reported geometry; every derived table is
/// immutable afterwards and safe to share read-only across threads.
#[derive(Debug, Clone)]
pub struct PyramidModel {
    tile_size: u32,
    overlap: u32,

    /// Level-0 offset applied when bounds limiting crops the slide.
    l0_offset: (i64, i64),

    /// Source level dimensions after bounds limiting, finest first.
    source_dimensions: Vec<(u64, u64)>,

    /// Source level downsample factors relative to level 0.
    source_downsamples: Vec<f64>,

    /// DeepZoom level dimensions, coarsest (1x1) first.
    dz_dimensions: Vec<(u64, u64)>,

    /// Tile grid (cols, rows) per DeepZoom level.
    tile_grids: Vec<(u64, u64)>,

    /// DeepZoom level downsample relative to level 0: `2^(N-1-l)`.
    target_downsamples: Vec<f64>,

    /// Best source level per DeepZoom level.
    preferred_levels: Vec<usize>,

    /// Residual scaling left after reading from the preferred source level.
    extra_downsamples: Vec<f64>,
}

impl PyramidModel {
    /// Build the pyramid geometry from an open slide's metadata.
    ///
    /// When `bounds` is set, every source level is cropped to the declared
    /// non-empty region before any DeepZoom math: the offset shifts all
    /// level-0 reads and the per-axis scale shrinks every level's reported
    /// dimensions (rounded up).
    ///
    /// `tile_size` must be non-zero; [`crate::GeneratorOptions::validate`]
    /// enforces this before the generator gets here.
    pub fn new(
        metadata: &SlideMetadata,
        tile_size: u32,
        overlap: u32,
        bounds: Option<SourceBounds>,
    ) -> Result<Self, GeometryError> {
        if metadata.levels.is_empty() {
            return Err(GeometryError::EmptyLevelList);
        }

        let (l0_width, l0_height) = metadata.level0_dimensions().unwrap_or((0, 0));
        if l0_width == 0 || l0_height == 0 {
            return Err(GeometryError::DegenerateDimensions {
                width: l0_width,
                height: l0_height,
            });
        }

        let mut source_downsamples = Vec::with_capacity(metadata.levels.len());
        let mut previous = 0.0f64;
        for (index, level) in metadata.levels.iter().enumerate() {
            if !level.downsample.is_finite() || level.downsample < previous {
                return Err(GeometryError::InvalidDownsample {
                    level: index,
                    downsample: level.downsample,
                });
            }
            previous = level.downsample;
            source_downsamples.push(level.downsample);
        }
        if (source_downsamples[0] - 1.0).abs() > f64::EPSILON {
            return Err(GeometryError::InvalidDownsample {
                level: 0,
                downsample: source_downsamples[0],
            });
        }

        let mut source_dimensions: Vec<(u64, u64)> = metadata
            .levels
            .iter()
            .map(|l| (l.width, l.height))
            .collect();

        let mut l0_offset = (0i64, 0i64);
        if let Some(b) = bounds {
            if b.width == 0 || b.height == 0 || b.width > l0_width || b.height > l0_height {
                return Err(GeometryError::InvalidBounds {
                    x: b.x,
                    y: b.y,
                    width: b.width,
                    height: b.height,
                });
            }
            l0_offset = (b.x, b.y);
            let scale_x = b.width as f64 / l0_width as f64;
            let scale_y = b.height as f64 / l0_height as f64;
            for dims in &mut source_dimensions {
                dims.0 = (dims.0 as f64 * scale_x).ceil() as u64;
                dims.1 = (dims.1 as f64 * scale_y).ceil() as u64;
            }
        }

        // Halve with ceiling division down to 1x1, then flip so index 0 is
        // the coarsest level.
        let mut dz_dimensions = vec![source_dimensions[0]];
        while dz_dimensions.last().is_some_and(|&(w, h)| w > 1 || h > 1) {
            let &(w, h) = dz_dimensions.last().unwrap();
            dz_dimensions.push((((w + 1) / 2).max(1), ((h + 1) / 2).max(1)));
        }
        dz_dimensions.reverse();
        let dz_levels = dz_dimensions.len();

        let tile_grids: Vec<(u64, u64)> = dz_dimensions
            .iter()
            .map(|&(w, h)| (w.div_ceil(tile_size as u64), h.div_ceil(tile_size as u64)))
            .collect();

        let mut target_downsamples = Vec::with_capacity(dz_levels);
        let mut preferred_levels = Vec::with_capacity(dz_levels);
        let mut extra_downsamples = Vec::with_capacity(dz_levels);
        for l in 0..dz_levels {
            let target = 2f64.powi((dz_levels - l - 1) as i32);
            let preferred = best_level_for_downsample(&source_downsamples, target);
            target_downsamples.push(target);
            preferred_levels.push(preferred);
            extra_downsamples.push(target / source_downsamples[preferred]);
        }

        Ok(Self {
            tile_size,
            overlap,
            l0_offset,
            source_dimensions,
            source_downsamples,
            dz_dimensions,
            tile_grids,
            target_downsamples,
            preferred_levels,
            extra_downsamples,
        })
    }

    /// Tile edge length in pixels, without overlap.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Overlap in pixels added to each interior tile edge.
    pub fn overlap(&self) -> u32 {
        self.overlap
    }

    /// Level-0 coordinate offset from bounds limiting.
    pub fn l0_offset(&self) -> (i64, i64) {
        self.l0_offset
    }

    /// Number of DeepZoom levels.
    pub fn level_count(&self) -> usize {
        self.dz_dimensions.len()
    }

    /// Number of physical source levels.
    pub fn source_level_count(&self) -> usize {
        self.source_dimensions.len()
    }

    /// Dimensions of a DeepZoom level (coarsest is level 0).
    pub fn level_dimensions(&self, level: usize) -> Option<(u64, u64)> {
        self.dz_dimensions.get(level).copied()
    }

    /// Dimensions of every DeepZoom level, coarsest first.
    pub fn all_level_dimensions(&self) -> &[(u64, u64)] {
        &self.dz_dimensions
    }

    /// Tile grid `(cols, rows)` of a DeepZoom level.
    pub fn level_tiles(&self, level: usize) -> Option<(u64, u64)> {
        self.tile_grids.get(level).copied()
    }

    /// Tile grid of every DeepZoom level, coarsest first.
    pub fn all_level_tiles(&self) -> &[(u64, u64)] {
        &self.tile_grids
    }

    /// Total number of tiles across all DeepZoom levels.
    pub fn total_tile_count(&self) -> u64 {
        self.tile_grids.iter().map(|&(c, r)| c * r).sum()
    }

    /// Post-bounds dimensions of a physical source level.
    pub fn source_dimensions(&self, level: usize) -> Option<(u64, u64)> {
        self.source_dimensions.get(level).copied()
    }

    /// Downsample factor of a physical source level.
    pub fn source_downsample(&self, level: usize) -> Option<f64> {
        self.source_downsamples.get(level).copied()
    }

    /// DeepZoom level downsample relative to level 0 (`2^(N-1-l)`).
    pub fn target_downsample(&self, level: usize) -> Option<f64> {
        self.target_downsamples.get(level).copied()
    }

    /// Best source level for a DeepZoom level.
    pub fn preferred_source_level(&self, level: usize) -> Option<usize> {
        self.preferred_levels.get(level).copied()
    }

    /// Residual scaling applied after reading from the preferred source
    /// level of a DeepZoom level.
    pub fn extra_downsample(&self, level: usize) -> Option<f64> {
        self.extra_downsamples.get(level).copied()
    }

    /// Highest-resolution source level whose downsample does not exceed
    /// `downsample`.
    pub fn best_level_for_downsample(&self, downsample: f64) -> usize {
        best_level_for_downsample(&self.source_downsamples, downsample)
    }
}

/// Largest index whose downsample is at or below the target; the coarsest
/// level when every factor is below the target, level 0 when none are.
fn best_level_for_downsample(downsamples: &[f64], target: f64) -> usize {
    if target < downsamples[0] {
        return 0;
    }
    for (i, &d) in downsamples.iter().enumerate().skip(1) {
        if target < d {
            return i - 1;
        }
    }
    downsamples.len() - 1
}

// =============================================================================
// Tests
// =============================================================================
