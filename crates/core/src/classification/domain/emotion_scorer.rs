use crate::classification::domain::emotion_classifier::ExternalScores;
use crate::classification::domain::feature_extractor::FeatureVector;
use crate::shared::constants::EDGE_DENSITY_THRESHOLD;
use crate::shared::emotion::{Emotion, EmotionDistribution};

/// Fusion weights of [`EmotionScorer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoringWeights {
    /// Multiplier applied to every external classifier weight.
    pub external: f64,
    /// Added to `happy` when at least one smile was found.
    pub smile: f64,
    /// Added to `angry` when edge density exceeds `edge_threshold`.
    pub edge: f64,
    pub edge_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            external: 0.5,
            smile: 0.4,
            edge: 0.2,
            edge_threshold: EDGE_DENSITY_THRESHOLD,
        }
    }
}

/// Fuses optional external scores with feature heuristics into a
/// normalized distribution.
///
/// Absent evidence never errors: it degrades to one-hot `neutral`.
#[derive(Clone, Debug, Default)]
pub struct EmotionScorer {
    weights: ScoringWeights,
}

impl EmotionScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn score(
        &self,
        features: &FeatureVector,
        external: Option<&ExternalScores>,
    ) -> EmotionDistribution {
        let mut raw = [0.0; 7];

        if let Some(scores) = external {
            for (position, emotion) in Emotion::ALL.into_iter().enumerate() {
                if let Some(&weight) = scores.get(emotion.as_str()) {
                    if weight.is_finite() && weight > 0.0 {
                        raw[position] += self.weights.external * weight;
                    }
                }
            }
        }

        if features.smiles_detected > 0 {
            raw[Emotion::Happy as usize] += self.weights.smile;
        }
        if features.edge_density > self.weights.edge_threshold {
            raw[Emotion::Angry as usize] += self.weights.edge;
        }

        EmotionDistribution::normalized(raw)
    }
}
