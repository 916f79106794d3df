/// Label set of the subtitle pipeline. Independent of the image pipeline's
/// [`Emotion`](crate::shared::emotion::Emotion) set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValenceEmotion {
    Happiness,
    Surprise,
    Neutral,
    Contempt,
    Disgust,
    Sadness,
    Anger,
    Fear,
}

/// Valence assumed for labels outside the set, and for untagged lines.
pub const NEUTRAL_VALENCE: f64 = 0.5;

impl ValenceEmotion {
    pub const ALL: [ValenceEmotion; 8] = [
        ValenceEmotion::Happiness,
        ValenceEmotion::Surprise,
        ValenceEmotion::Neutral,
        ValenceEmotion::Contempt,
        ValenceEmotion::Disgust,
        ValenceEmotion::Sadness,
        ValenceEmotion::Anger,
        ValenceEmotion::Fear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValenceEmotion::Happiness => "happiness",
            ValenceEmotion::Surprise => "surprise",
            ValenceEmotion::Neutral => "neutral",
            ValenceEmotion::Contempt => "contempt",
            ValenceEmotion::Disgust => "disgust",
            ValenceEmotion::Sadness => "sadness",
            ValenceEmotion::Anger => "anger",
            ValenceEmotion::Fear => "fear",
        }
    }

    pub fn valence(self) -> f64 {
        match self {
            ValenceEmotion::Happiness => 1.00,
            ValenceEmotion::Surprise => 0.70,
            ValenceEmotion::Neutral => 0.50,
            ValenceEmotion::Contempt => 0.45,
            ValenceEmotion::Disgust => 0.40,
            ValenceEmotion::Sadness => 0.30,
            ValenceEmotion::Anger => 0.25,
            ValenceEmotion::Fear => 0.10,
        }
    }

    /// Case-insensitive label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|e| e.as_str() == label)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|e| e.as_str()).collect()
    }
}

/// Mean valence of the tagged labels; unknown labels count as neutral and
/// an empty list is neutral.
pub fn valence<S: AsRef<str>>(emotions: &[S]) -> f64 {
    if emotions.is_empty() {
        return NEUTRAL_VALENCE;
    }
    let total: f64 = emotions
        .iter()
        .map(|e| ValenceEmotion::from_label(e.as_ref()).map_or(NEUTRAL_VALENCE, |v| v.valence()))
        .sum();
    total / emotions.len() as f64
}
