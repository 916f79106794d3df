use crate::classification::domain::analysis_result::{AnalysisResult, Provenance};
use crate::classification::domain::emotion_classifier::ExternalScores;
use crate::classification::domain::emotion_scorer::EmotionScorer;
use crate::classification::domain::feature_extractor::FeatureExtractor;
use crate::shared::frame::Frame;

/// Identity of the item being resolved.
#[derive(Clone, Copy, Debug)]
pub struct ItemContext<'a> {
    pub identifier: &'a str,
    pub timestamp: Option<f64>,
}

/// Decides per item between fresh inference and carrying the last fresh
/// reading forward.
///
/// The "last valid" slot is owned by the caller and passed in, so each run
/// keeps its own memory. Only fresh results are ever stored in it.
pub struct MemoryFallbackPolicy {
    extractor: FeatureExtractor,
    scorer: EmotionScorer,
}

impl MemoryFallbackPolicy {
    pub fn new(extractor: FeatureExtractor, scorer: EmotionScorer) -> Self {
        Self { extractor, scorer }
    }

    /// `face` is the crop of the selected region, if any survived selection.
    pub fn resolve(
        &self,
        item: ItemContext<'_>,
        detected_count: usize,
        face: Option<&Frame>,
        external: Option<&ExternalScores>,
        last_valid: &mut Option<AnalysisResult>,
    ) -> AnalysisResult {
        let face = face.filter(|_| detected_count > 0);

        let Some(face) = face else {
            return match last_valid {
                Some(previous) => previous.carried_to(item.identifier, item.timestamp),
                None => AnalysisResult::default_for(
                    item.identifier,
                    item.timestamp,
                    Provenance::NoFaceDetected,
                ),
            };
        };

        let features = self.extractor.extract(face);
        let scores = self.scorer.score(&features, external);
        let result = AnalysisResult::fresh(item.identifier, item.timestamp, scores, detected_count);
        log::debug!(
            "{}: {} ({:.3}), features {:?}",
            item.identifier,
            result.predicted_emotion,
            result.confidence,
            features
        );

        *last_valid = Some(result.clone());
        result
    }
}

impl Default for MemoryFallbackPolicy {
    fn default() -> Self {
        Self::new(FeatureExtractor::default(), EmotionScorer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::sub_region_detector::SubRegionDetector;
    use crate::detection::infrastructure::no_sub_regions::NoSubRegions;
    use crate::shared::emotion::{Emotion, EmotionDistribution};
    use crate::shared::region::Region;
    use image::GrayImage;

    struct OneSmile;

    impl SubRegionDetector for OneSmile {
        fn detect(&self, _face: &GrayImage) -> Vec<Region> {
            vec![Region::new(1, 1, 2, 2)]
        }
    }

    fn smiling_policy() -> MemoryFallbackPolicy {
        MemoryFallbackPolicy::new(
            FeatureExtractor::new(Box::new(NoSubRegions), Box::new(OneSmile)),
            EmotionScorer::default(),
        )
    }

    fn item(identifier: &str) -> ItemContext<'_> {
        ItemContext {
            identifier,
            timestamp: None,
        }
    }

    fn face() -> Frame {
        Frame::new(vec![90; 16 * 16 * 3], 16, 16, 0)
    }

    #[test]
    fn test_fresh_result_updates_last_valid() {
        let policy = smiling_policy();
        let mut last_valid = None;
        let result = policy.resolve(item("img1"), 1, Some(&face()), None, &mut last_valid);

        assert_eq!(result.provenance, Provenance::Fresh);
        assert_eq!(result.predicted_emotion, Emotion::Happy);
        assert_eq!(result.emotion_scores, EmotionDistribution::one_hot(Emotion::Happy));
        assert_eq!(last_valid, Some(result));
    }

    #[test]
    fn test_no_face_on_fresh_run_is_default_neutral() {
        let policy = smiling_policy();
        let mut last_valid = None;
        let result = policy.resolve(item("img1"), 0, None, None, &mut last_valid);

        assert_eq!(result.provenance, Provenance::NoFaceDetected);
        assert_eq!(result.predicted_emotion, Emotion::Neutral);
        assert_eq!(result.confidence, 0.0);
        assert!(last_valid.is_none());
    }

    #[test]
    fn test_no_face_carries_last_valid_forward() {
        let policy = smiling_policy();
        let mut last_valid = None;
        let first = policy.resolve(item("img1"), 2, Some(&face()), None, &mut last_valid);
        let second = policy.resolve(
            ItemContext {
                identifier: "img2",
                timestamp: Some(7.0),
            },
            0,
            None,
            None,
            &mut last_valid,
        );

        assert_eq!(second.identifier, "img2");
        assert_eq!(second.timestamp, Some(7.0));
        assert_eq!(second.provenance, Provenance::CarriedOver);
        assert_eq!(second.faces_detected, 0);
        assert_eq!(second.predicted_emotion, first.predicted_emotion);
        assert_eq!(second.confidence, first.confidence);
        assert_eq!(last_valid, Some(first));
    }

    #[test]
    fn test_carry_over_never_replaces_last_valid() {
        let policy = smiling_policy();
        let mut last_valid = None;
        let first = policy.resolve(item("img1"), 1, Some(&face()), None, &mut last_valid);
        for name in ["img2", "img3", "img4"] {
            let r = policy.resolve(item(name), 0, None, None, &mut last_valid);
            assert_eq!(r.provenance, Provenance::CarriedOver);
        }
        assert_eq!(last_valid.as_ref().unwrap().identifier, first.identifier);
        assert!(last_valid.unwrap().is_fresh());
    }

    #[test]
    fn test_new_fresh_result_replaces_memory() {
        let policy = MemoryFallbackPolicy::default();
        let mut last_valid = None;
        policy.resolve(item("img1"), 1, Some(&face()), None, &mut last_valid);
        let external: ExternalScores = [("sad".to_string(), 90.0)].into_iter().collect();
        let second = policy.resolve(item("img2"), 1, Some(&face()), Some(&external), &mut last_valid);

        assert_eq!(second.predicted_emotion, Emotion::Sad);
        assert_eq!(last_valid.unwrap().identifier, "img2");
    }

    #[test]
    fn test_crop_without_detection_count_is_a_gap() {
        let policy = smiling_policy();
        let mut last_valid = None;
        let result = policy.resolve(item("img1"), 0, Some(&face()), None, &mut last_valid);
        assert_eq!(result.provenance, Provenance::NoFaceDetected);
        assert!(last_valid.is_none());
    }

    #[test]
    fn test_fresh_records_detected_count() {
        let policy = MemoryFallbackPolicy::default();
        let mut last_valid = None;
        let result = policy.resolve(item("img1"), 3, Some(&face()), None, &mut last_valid);
        assert_eq!(result.faces_detected, 3);
        assert_eq!(result.predicted_emotion, Emotion::Neutral);
        assert_eq!(result.confidence, 1.0);
    }
}
