//! # WSI DeepZoom
//!
//! DeepZoom (DZI) tile generation for Whole Slide Images.
//!
//! Gigapixel slides ship with a physical resolution pyramid whose levels
//! are decoded by a native backend (OpenSlide, a JVM-bridged reader, an
//! imaging SDK, ...). This library maps a virtual DeepZoom pyramid,
//! parameterized by tile size and overlap, onto whatever pyramid the
//! backend exposes, reads the right source region for each tile through a
//! small backend trait, and encodes the pixels as JPEG or PNG with an
//! optional embedded ICC profile.
//!
//! ## Features
//!
//! - **One geometry core**: the level ladder, best-source-level mapping and
//!   overlap/edge arithmetic live in one place, shared by every backend
//! - **Pluggable backends**: implement [`RegionFetcher`] and the rest comes
//!   for free
//! - **JPEG and PNG encoding**: quality-controlled, with chroma subsampling
//!   disabled at near-lossless settings and ICC profiles embedded as
//!   standard marker segments
//! - **DZI descriptors**: the XML manifest DeepZoom viewers bootstrap from
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`source`] - backend seam: `RegionFetcher`, slide metadata, pixel buffers
//! - [`pyramid`] - DeepZoom level geometry and tile address resolution
//! - [`encode`] - JPEG/PNG tile encoding and ICC embedding
//! - [`manifest`] - DZI XML descriptor
//! - [`generator`] - the `DeepZoomGenerator` orchestrator
//! - [`options`] - construction options
//! - [`error`] - error taxonomy
//!
//! ## Example
//!
//! ```
//! use wsi_deepzoom::{
//!     DeepZoomGenerator, GeneratorOptions, PixelBuffer, PixelLayout, RegionError,
//!     RegionFetcher, SlideMetadata, SourceLevel, TileFormat,
//! };
//!
//! // A trivial backend serving a solid white 1024x1024 slide.
//! struct WhiteSlide {
//!     metadata: SlideMetadata,
//! }
//!
//! impl RegionFetcher for WhiteSlide {
//!     fn metadata(&self) -> &SlideMetadata {
//!         &self.metadata
//!     }
//!
//!     fn pixel_layout(&self) -> PixelLayout {
//!         PixelLayout::Rgb8
//!     }
//!
//!     fn read_region(
//!         &self,
//!         _level: usize,
//!         _x: i64,
//!         _y: i64,
//!         width: u64,
//!         height: u64,
//!     ) -> Result<PixelBuffer, RegionError> {
//!         let data = vec![0xFF; (width * height * 3) as usize];
//!         PixelBuffer::new(width as u32, height as u32, PixelLayout::Rgb8, data)
//!             .map_err(|e| RegionError::Backend(e.to_string()))
//!     }
//! }
//!
//! let fetcher = WhiteSlide {
//!     metadata: SlideMetadata {
//!         levels: vec![SourceLevel { width: 1024, height: 1024, downsample: 1.0 }],
//!         ..Default::default()
//!     },
//! };
//!
//! let generator = DeepZoomGenerator::new(
//!     fetcher,
//!     GeneratorOptions::new().format(TileFormat::Png),
//! )
//! .unwrap();
//!
//! assert_eq!(generator.level_count(), 11);
//! let tile = generator.tile(10, 0, 0).unwrap();
//! assert_eq!(tile.mime_type, "image/png");
//! ```

pub mod encode;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod options;
pub mod pyramid;
pub mod source;

// Re-export commonly used types
pub use encode::{encode_jpeg, encode_png, encode_tile, EncodedTile};
pub use error::{EncodeError, GeometryError, OpenError, RegionError, TileError};
pub use generator::DeepZoomGenerator;
pub use manifest::build_dzi;
pub use options::{
    GeneratorOptions, TileFormat, DEFAULT_OVERLAP, DEFAULT_QUALITY, DEFAULT_TILE_SIZE,
};
pub use pyramid::{PyramidModel, TileInfo};
pub use source::{
    PixelBuffer, PixelLayout, RegionFetcher, SlideMetadata, SourceBounds, SourceLevel,
};
