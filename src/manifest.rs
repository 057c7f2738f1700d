//! DZI descriptor generation.
//!
//! DeepZoom viewers bootstrap from a small XML descriptor naming the tile
//! size, overlap, format and full-resolution image size. The attribute
//! names and casing are fixed by the format; existing viewers parse them
//! verbatim.

use crate::options::TileFormat;

/// Build the DZI XML descriptor for a pyramid.
///
/// `width` and `height` are the full-resolution dimensions after bounds
/// limiting, never a per-level size.
///
/// # Example Output
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <Image xmlns="http://schemas.microsoft.com/deepzoom/2008"
///        TileSize="254"
///        Overlap="1"
///        Format="jpg">
///   <Size Width="46920" Height="33600" />
/// </Image>
/// ```
pub fn build_dzi(
    width: u64,
    height: u64,
    tile_size: u32,
    overlap: u32,
    format: TileFormat,
) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Image xmlns="http://schemas.microsoft.com/deepzoom/2008"
       TileSize="{tile_size}"
       Overlap="{overlap}"
       Format="{format}">
  <Size Width="{width}" Height="{height}" />
</Image>"#,
        format = format.extension(),
    )
}
