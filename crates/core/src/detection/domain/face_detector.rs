use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Face/region detector collaborator.
///
/// Returns zero or more face rectangles in arbitrary order. Implementations
/// may keep state across calls, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
