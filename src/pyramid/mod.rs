//! The virtual DeepZoom pyramid and tile address resolution.
//!
//! A DeepZoom pyramid is a ladder of levels where each level is half the
//! resolution of the next, ending at 1x1. The source slide exposes its own
//! physical pyramid whose levels are rarely exact powers of two of each
//! other, so every DeepZoom level is mapped onto the best physical level
//! plus a residual scale factor.
//!
//! [`PyramidModel`] derives the whole mapping once at open time and is
//! immutable afterwards; [`PyramidModel::tile_info`] turns a
//! `(level, col, row)` address into the exact source region and output size
//! for one tile, honoring overlap and edge clipping.

mod model;
mod tiling;

pub use model::PyramidModel;
pub use tiling::TileInfo;
