use std::path::Path;

use crate::shared::frame::Frame;

/// Decodes an image file into a frame.
///
/// A decode failure is the caller's problem to route; the reader never
/// falls back or retries.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>>;
}
