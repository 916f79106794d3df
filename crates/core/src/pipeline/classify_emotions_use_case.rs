use std::time::Instant;

use crate::classification::domain::analysis_result::{AnalysisResult, Provenance};
use crate::classification::domain::emotion_classifier::{EmotionClassifier, ExternalScores};
use crate::classification::domain::memory_fallback::{ItemContext, MemoryFallbackPolicy};
use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::video::domain::image_loader::ImageLoader;
use crate::video::infrastructure::image_sequence::{file_name, seconds_from_name, ImageSequence};

/// Classification mode: walks an ordered image sequence and produces one
/// [`AnalysisResult`] per image, carrying the last fresh reading across
/// detection gaps.
///
/// Strictly sequential. The fallback memory is local to each `execute` call,
/// so repeated runs over the same sequence give identical output.
pub struct ClassifyEmotionsUseCase {
    loader: Box<dyn ImageLoader>,
    detector: Box<dyn FaceDetector>,
    classifier: Option<Box<dyn EmotionClassifier>>,
    policy: MemoryFallbackPolicy,
    logger: Box<dyn PipelineLogger>,
}

impl ClassifyEmotionsUseCase {
    pub fn new(
        loader: Box<dyn ImageLoader>,
        detector: Box<dyn FaceDetector>,
        classifier: Option<Box<dyn EmotionClassifier>>,
        policy: MemoryFallbackPolicy,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            loader,
            detector,
            classifier,
            policy,
            logger,
        }
    }

    pub fn execute(&mut self, sequence: &ImageSequence) -> Vec<AnalysisResult> {
        if sequence.is_empty() {
            log::warn!("No images to classify");
        }

        let total = sequence.len();
        let mut last_valid: Option<AnalysisResult> = None;
        let mut results = Vec::with_capacity(total);

        for (index, path) in sequence.paths().iter().enumerate() {
            let identifier = file_name(path);
            let timestamp = seconds_from_name(path);

            let t0 = Instant::now();
            let result = match self.loader.load(path, index) {
                Ok(frame) => {
                    self.logger
                        .timing("load", t0.elapsed().as_secs_f64() * 1000.0);
                    let item = ItemContext {
                        identifier: &identifier,
                        timestamp,
                    };
                    self.analyze(item, &frame, &mut last_valid)
                }
                Err(e) => {
                    log::warn!("{identifier}: could not load image: {e}");
                    AnalysisResult::default_for(&identifier, timestamp, Provenance::LoadFailed)
                }
            };

            self.logger.count(outcome_counter(result.provenance));
            self.logger
                .count(&format!("label {}", result.predicted_emotion));
            self.logger.progress(index + 1, total);
            results.push(result);
        }

        self.logger.summary();
        results
    }

    fn analyze(
        &mut self,
        item: ItemContext<'_>,
        frame: &Frame,
        last_valid: &mut Option<AnalysisResult>,
    ) -> AnalysisResult {
        let t0 = Instant::now();
        let regions = match self.detector.detect(frame) {
            Ok(regions) => regions,
            Err(e) => {
                log::warn!("{}: face detection failed: {e}", item.identifier);
                Vec::new()
            }
        };
        self.logger
            .timing("detect", t0.elapsed().as_secs_f64() * 1000.0);
        self.logger.metric("faces", regions.len() as f64);

        let selected = Region::select_largest(&regions)
            .map(|r| r.clamped_to(frame.width(), frame.height()))
            .filter(|r| !r.is_degenerate());
        let face = selected.and_then(|r| frame.crop(&r).map(|crop| (r, crop)));

        let external = match &face {
            Some((region, _)) => self.external_scores(item.identifier, frame, region),
            None => None,
        };

        let t0 = Instant::now();
        let result = self.policy.resolve(
            item,
            regions.len(),
            face.as_ref().map(|(_, crop)| crop),
            external.as_ref(),
            last_valid,
        );
        self.logger
            .timing("classify", t0.elapsed().as_secs_f64() * 1000.0);
        result
    }

    fn external_scores(
        &mut self,
        identifier: &str,
        frame: &Frame,
        region: &Region,
    ) -> Option<ExternalScores> {
        let classifier = self.classifier.as_mut()?;
        match classifier.classify(frame, region) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("{identifier}: external classifier failed, using heuristics: {e}");
                None
            }
        }
    }
}

fn outcome_counter(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Fresh => "fresh",
        other => other.note(),
    }
}
