use crate::tracking::domain::observation::TrackedFrame;

/// Source of per-frame tracker output, yielded in increasing time order.
pub trait DetectionSource: Send {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<TrackedFrame, Box<dyn std::error::Error>>> + '_>;
}
