use crate::shared::frame::Frame;

/// Supplies the decoded video frame shown at a given second.
pub trait FrameProvider: Send {
    fn frame_at(&mut self, sec: u32) -> Result<Frame, Box<dyn std::error::Error>>;
}
