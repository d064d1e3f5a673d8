//! Raster persistence for finished heightmaps: 8-bit grayscale region
//! files and 24-bit colorized previews.

mod gray;
mod preview;

use std::path::PathBuf;

pub use gray::{load_heightmap, save_heightmap};
pub use preview::{preview_color, save_preview};

/// Errors from reading or writing raster artifacts.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Failed to encode or write a raster file.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to read or decode a raster file.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A raster's dimensions do not describe its pixel payload.
    #[error("raster {} has inconsistent dimensions {width}x{height}", path.display())]
    Size {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}
