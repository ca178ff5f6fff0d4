use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, ImageReader};

/// Reads an image file and turns it into pixels. Both steps can fail.
pub trait ImageDecoder: Send + Sync {
    fn open(&self, path: &Path) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let format = reader.format().context("unrecognised image format")?;
        reader
            .decode()
            .with_context(|| format!("failed to decode {:?} image", format))
    }
}

/// Reads pictures from the local filesystem. Relative paths are resolved
/// against `root`; absolute paths are used as stored.
#[derive(Debug, Clone)]
pub struct FsDecoder {
    root: PathBuf,
}

impl FsDecoder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Default for FsDecoder {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ImageDecoder for FsDecoder {
    fn open(&self, path: &Path) -> Result<Vec<u8>> {
        let full = self.resolve(path);
        std::fs::read(&full).with_context(|| format!("could not open picture {}", full.display()))
    }
}

/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)?;
    Ok(buf)
}
