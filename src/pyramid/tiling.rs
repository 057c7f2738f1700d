//! Tile address resolution.
//!
//! Maps a `(level, col, row)` address to the exact source region to read
//! and the pixel size of the tile that comes out. This routine is the crux
//! of correct tile boundaries, overlap seams and edge-tile sizing; it is
//! pure and does no I/O.

use crate::error::TileError;

use super::model::PyramidModel;

/// Resolved geometry for a single tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileInfo {
    /// Physical source level to read from.
    pub source_level: usize,

    /// Top-left corner of the read, in level-0 coordinate space (bounds
    /// offset already applied).
    pub location: (i64, i64),

    /// Size of the read in source-level pixels, clipped to the level's
    /// extent.
    pub region: (u64, u64),

    /// Pixel size of the finished tile, overlap included.
    pub output: (u32, u32),
}

impl PyramidModel {
    /// Resolve a tile address into its source region and output size.
    ///
    /// Interior tiles receive `overlap` extra pixels on every edge; tiles
    /// on the first/last column or row only on their interior edges, so no
    /// tile ever reaches past the image boundary.
    ///
    /// # Errors
    ///
    /// [`TileError::InvalidLevel`] if `level` is outside the pyramid,
    /// [`TileError::OutOfRange`] if `(col, row)` is outside the level's
    /// tile grid.
    pub fn tile_info(&self, level: usize, col: u64, row: u64) -> Result<TileInfo, TileError> {
        let invalid_level = || TileError::InvalidLevel {
            level,
            levels: self.level_count(),
        };
        let (level_width, level_height) =
            self.level_dimensions(level).ok_or_else(invalid_level)?;
        let (cols, rows) = self.level_tiles(level).ok_or_else(invalid_level)?;
        if col >= cols || row >= rows {
            return Err(TileError::OutOfRange {
                level,
                col,
                row,
                cols,
                rows,
            });
        }

        let tile_size = u64::from(self.tile_size());
        let overlap = u64::from(self.overlap());

        // Overlap is only added on interior edges.
        let overlap_tl = (
            if col == 0 { 0 } else { overlap },
            if row == 0 { 0 } else { overlap },
        );
        let overlap_br = (
            if col == cols - 1 { 0 } else { overlap },
            if row == rows - 1 { 0 } else { overlap },
        );

        // Tile origin and output size in this level's pixel space. Edge
        // tiles are cut down to the remaining extent.
        let z_location = (tile_size * col, tile_size * row);
        let output = (
            (tile_size.min(level_width - z_location.0) + overlap_tl.0 + overlap_br.0) as u32,
            (tile_size.min(level_height - z_location.1) + overlap_tl.1 + overlap_br.1) as u32,
        );

        let source_level = self.preferred_source_level(level).ok_or_else(invalid_level)?;
        let extra = self.extra_downsample(level).ok_or_else(invalid_level)?;
        let source_downsample = self
            .source_downsample(source_level)
            .ok_or_else(invalid_level)?;
        let (source_width, source_height) = self
            .source_dimensions(source_level)
            .ok_or_else(invalid_level)?;
        let (offset_x, offset_y) = self.l0_offset();

        // Where the tile (including its top-left overlap) lands in the
        // chosen source level's resampled space.
        let l_location = (
            extra * (z_location.0 - overlap_tl.0) as f64,
            extra * (z_location.1 - overlap_tl.1) as f64,
        );

        let location = (
            (source_downsample * l_location.0) as i64 + offset_x,
            (source_downsample * l_location.1) as i64 + offset_y,
        );

        // Clip the read so it never reaches past the level's extent.
        let region = (
            ((extra * f64::from(output.0)).ceil() as u64)
                .min(source_width.saturating_sub(l_location.0.ceil() as u64)),
            ((extra * f64::from(output.1)).ceil() as u64)
                .min(source_height.saturating_sub(l_location.1.ceil() as u64)),
        );

        Ok(TileInfo {
            source_level,
            location,
            region,
            output,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
