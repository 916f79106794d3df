use image::GrayImage;

use crate::detection::domain::sub_region_detector::SubRegionDetector;
use crate::shared::region::Region;

/// Sub-region detector that never finds anything.
///
/// Used when no eye/smile model is wired in; the corresponding counts are
/// then always zero and the smile nudge never fires.
pub struct NoSubRegions;

impl SubRegionDetector for NoSubRegions {
    fn detect(&self, _face: &GrayImage) -> Vec<Region> {
        Vec::new()
    }
}
