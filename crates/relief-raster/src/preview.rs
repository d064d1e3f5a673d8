//! Colorized 24-bit terrain preview.

use std::path::Path;

use image::{Rgb, RgbImage};
use relief_terrain::{Heightmap, SEA_LEVEL};
use tracing::info;

use crate::RasterError;

/// Map a height to the preview palette: water is blue and darkens with
/// depth, land runs from green lowlands toward red peaks.
pub fn preview_color(height: u8) -> Rgb<u8> {
    if height <= SEA_LEVEL {
        let shade = 100 * u32::from(height) / u32::from(SEA_LEVEL);
        Rgb([shade as u8, shade as u8, (150 + shade) as u8])
    } else {
        let land = u32::from(height - SEA_LEVEL);
        let fade = 40 * land / 172;
        Rgb([(80 + fade) as u8, (120 - fade) as u8, 30])
    }
}

/// Render the heightmap through the preview palette and write it as a
/// 24-bit raster next to the region file.
pub fn save_preview(map: &Heightmap, path: &Path) -> Result<(), RasterError> {
    let mut image = RgbImage::new(map.width(), map.height());
    for y in 0..map.height() {
        for x in 0..map.width() {
            image.put_pixel(x, y, preview_color(map.get(x, y)));
        }
    }
    image.save(path).map_err(|source| RasterError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "preview written");
    Ok(())
}
