use image::GrayImage;

use crate::shared::region::Region;

/// Detector for facial parts (eyes, smiles) inside an already cropped face.
///
/// Returned rectangles are relative to the crop. Only their number feeds
/// the emotion heuristics.
pub trait SubRegionDetector: Send {
    fn detect(&self, face: &GrayImage) -> Vec<Region>;
}
