use std::path::Path;

use crate::shared::frame::Frame;

/// Persists a single frame or crop as an image file.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
