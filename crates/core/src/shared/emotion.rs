use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// The closed label set of the image emotion pipeline, in canonical order.
///
/// The order matters: it is the tie-break order for arg-max and the key
/// order of serialized distributions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub const DEFAULT: Emotion = Emotion::Neutral;

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    /// Exact, lowercase label match. Labels outside the set yield `None`.
    pub fn from_label(label: &str) -> Option<Emotion> {
        Emotion::ALL.into_iter().find(|e| e.as_str() == label)
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Emotion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Non-negative weight per [`Emotion`].
///
/// Built through [`EmotionDistribution::normalized`] or
/// [`EmotionDistribution::one_hot`], so every value handed out either sums
/// to 1.0 or is one-hot on a single label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmotionDistribution {
    weights: [f64; 7],
}

impl EmotionDistribution {
    pub fn one_hot(emotion: Emotion) -> Self {
        let mut weights = [0.0; 7];
        weights[emotion.position()] = 1.0;
        Self { weights }
    }

    /// Divides raw weights by their total; collapses to one-hot on the
    /// default label when nothing contributed.
    pub fn normalized(raw: [f64; 7]) -> Self {
        let total: f64 = raw.iter().sum();
        if total > 0.0 {
            let mut weights = raw;
            for w in &mut weights {
                *w /= total;
            }
            Self { weights }
        } else {
            Self::one_hot(Emotion::DEFAULT)
        }
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.weights[emotion.position()]
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.into_iter().zip(self.weights.iter().copied())
    }

    /// Arg-max; the earliest label in canonical order wins ties.
    pub fn dominant(&self) -> (Emotion, f64) {
        let mut best = (Emotion::ALL[0], self.weights[0]);
        for (emotion, weight) in self.iter().skip(1) {
            if weight > best.1 {
                best = (emotion, weight);
            }
        }
        best
    }
}

impl Default for EmotionDistribution {
    fn default() -> Self {
        Self::one_hot(Emotion::DEFAULT)
    }
}

impl Serialize for EmotionDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.weights.len()))?;
        for (emotion, weight) in self.iter() {
            map.serialize_entry(emotion.as_str(), &weight)?;
        }
        map.end()
    }
}
