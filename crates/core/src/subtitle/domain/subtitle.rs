use serde::{Deserialize, Serialize};

/// One subtitle cue. `id` is 1-based in file order; times are seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Subtitle {
    pub id: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Subtitle {
    /// Closed window on the cue's start time.
    pub fn starts_within(&self, start_sec: f64, end_sec: f64) -> bool {
        start_sec <= self.start && self.start <= end_sec
    }
}

/// Tags produced by the subtitle tagger for one line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubtitleTags {
    /// Up to two labels, most relevant first.
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default = "unknown")]
    pub situation: String,
    #[serde(default = "unknown")]
    pub situation_type: String,
}

fn unknown() -> String {
    "unknown".to_string()
}

impl Default for SubtitleTags {
    fn default() -> Self {
        Self {
            emotions: Vec::new(),
            situation: unknown(),
            situation_type: unknown(),
        }
    }
}

/// A cue with its tags and the valence derived from them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaggedSubtitle {
    pub id: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub emotions: Vec<String>,
    pub situation: String,
    pub situation_type: String,
    pub valence: f64,
}
