use std::path::Path;

use crate::shared::frame::Frame;

/// Decodes an image file into an RGB [`Frame`].
///
/// `index` is stamped on the returned frame so detectors keyed by sequence
/// position can find their results.
pub trait ImageLoader: Send {
    fn load(&self, path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>>;
}
