//! 8-bit grayscale region files.

use std::path::Path;

use image::GrayImage;
use relief_terrain::Heightmap;
use tracing::info;

use crate::RasterError;

/// Write the heightmap as an 8-bit grayscale raster, one pixel per
/// sample. The container format follows the file extension.
pub fn save_heightmap(map: &Heightmap, path: &Path) -> Result<(), RasterError> {
    let image = GrayImage::from_raw(map.width(), map.height(), map.samples().to_vec()).ok_or_else(
        || RasterError::Size {
            path: path.to_path_buf(),
            width: map.width(),
            height: map.height(),
        },
    )?;
    image.save(path).map_err(|source| RasterError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "region heightmap written");
    Ok(())
}

/// Load a raster back into a heightmap. Non-grayscale images are
/// converted to luma first.
pub fn load_heightmap(path: &Path) -> Result<Heightmap, RasterError> {
    let image = image::open(path)
        .map_err(|source| RasterError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .to_luma8();
    let (width, height) = image.dimensions();
    Heightmap::from_raw(width, height, image.into_raw()).ok_or(RasterError::Size {
        path: path.to_path_buf(),
        width,
        height,
    })
}
