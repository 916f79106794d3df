use serde::{Serialize, Serializer};

use crate::shared::emotion::{Emotion, EmotionDistribution};

/// How an [`AnalysisResult`] came to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    /// Computed from this item's own evidence.
    Fresh,
    /// Copied from the most recent fresh result because no face was found.
    CarriedOver,
    /// No face found and nothing to carry over yet.
    NoFaceDetected,
    /// The image could not be decoded.
    LoadFailed,
}

impl Provenance {
    pub fn note(self) -> &'static str {
        match self {
            Provenance::Fresh => "",
            Provenance::CarriedOver => "carried over",
            Provenance::NoFaceDetected => "no face detected",
            Provenance::LoadFailed => "load failed",
        }
    }
}

impl Serialize for Provenance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.note())
    }
}

/// Outcome of classifying one item of an ordered sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub identifier: String,
    pub predicted_emotion: Emotion,
    pub confidence: f64,
    pub emotion_scores: EmotionDistribution,
    pub faces_detected: usize,
    /// Seconds into the source video, when the item name encodes them.
    pub timestamp: Option<f64>,
    #[serde(rename = "note")]
    pub provenance: Provenance,
}

impl AnalysisResult {
    /// Wraps a freshly scored distribution; label and confidence are its
    /// arg-max.
    pub fn fresh(
        identifier: &str,
        timestamp: Option<f64>,
        scores: EmotionDistribution,
        faces_detected: usize,
    ) -> Self {
        let (predicted_emotion, confidence) = scores.dominant();
        Self {
            identifier: identifier.to_string(),
            predicted_emotion,
            confidence,
            emotion_scores: scores,
            faces_detected,
            timestamp,
            provenance: Provenance::Fresh,
        }
    }

    /// Zero-confidence neutral placeholder for items with no usable evidence.
    pub fn default_for(identifier: &str, timestamp: Option<f64>, provenance: Provenance) -> Self {
        Self {
            identifier: identifier.to_string(),
            predicted_emotion: Emotion::DEFAULT,
            confidence: 0.0,
            emotion_scores: EmotionDistribution::one_hot(Emotion::DEFAULT),
            faces_detected: 0,
            timestamp,
            provenance,
        }
    }

    /// Copy of this result re-addressed to another item.
    pub fn carried_to(&self, identifier: &str, timestamp: Option<f64>) -> Self {
        Self {
            identifier: identifier.to_string(),
            timestamp,
            faces_detected: 0,
            provenance: Provenance::CarriedOver,
            ..self.clone()
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.provenance == Provenance::Fresh
    }
}
