use imageproc::edges::canny;

use crate::detection::domain::sub_region_detector::SubRegionDetector;
use crate::detection::infrastructure::no_sub_regions::NoSubRegions;
use crate::shared::constants::{CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD};
use crate::shared::frame::Frame;

/// Heuristic signals measured on one face crop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector {
    /// Mean grey intensity, 0-255.
    pub brightness: f64,
    /// Population standard deviation of grey intensity.
    pub contrast: f64,
    pub area: u64,
    /// Edge pixels per pixel of area.
    ///
    /// The edge operator smooths the crop with a Gaussian (sigma 1.4) before
    /// taking gradients, so isolated specks and fine texture do not count and
    /// densities run lower than an unsmoothed operator gives at the same
    /// thresholds.
    pub edge_density: f64,
    pub eyes_detected: usize,
    pub smiles_detected: usize,
}

/// Computes a [`FeatureVector`] from the pixels of a selected face.
pub struct FeatureExtractor {
    eye_detector: Box<dyn SubRegionDetector>,
    smile_detector: Box<dyn SubRegionDetector>,
}

impl FeatureExtractor {
    pub fn new(
        eye_detector: Box<dyn SubRegionDetector>,
        smile_detector: Box<dyn SubRegionDetector>,
    ) -> Self {
        Self {
            eye_detector,
            smile_detector,
        }
    }

    /// The crop must be non-empty; the region selector never hands out
    /// degenerate faces.
    pub fn extract(&self, face: &Frame) -> FeatureVector {
        let gray = face.to_gray();
        let area = gray.width() as u64 * gray.height() as u64;
        debug_assert!(area > 0, "feature extraction on an empty crop");
        let n = area.max(1) as f64;

        let mean = gray.pixels().map(|p| p.0[0] as f64).sum::<f64>() / n;
        let variance = gray
            .pixels()
            .map(|p| {
                let d = p.0[0] as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        let edges = canny(&gray, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD);
        let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();

        FeatureVector {
            brightness: mean,
            contrast: variance.sqrt(),
            area,
            edge_density: edge_pixels as f64 / n,
            eyes_detected: self.eye_detector.detect(&gray).len(),
            smiles_detected: self.smile_detector.detect(&gray).len(),
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(Box::new(NoSubRegions), Box::new(NoSubRegions))
    }
}
