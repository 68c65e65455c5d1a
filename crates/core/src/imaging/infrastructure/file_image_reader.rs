use std::path::Path;

use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::frame::Frame;

/// Decodes image files through the `image` crate, normalized to RGB8.
pub struct FileImageReader;

impl FileImageReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileImageReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for FileImageReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        Ok(Frame::new(img.into_raw(), width, height, 3))
    }
}
