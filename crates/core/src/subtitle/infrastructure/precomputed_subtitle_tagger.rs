use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::subtitle::domain::subtitle::{Subtitle, SubtitleTags};
use crate::subtitle::domain::subtitle_tagger::SubtitleTagger;
use crate::subtitle::infrastructure::srt_parser::SubtitleError;

/// Replays tags produced ahead of time, keyed by cue id.
///
/// A cue without an entry is reported as a tagger failure.
pub struct PrecomputedSubtitleTagger {
    by_id: HashMap<usize, SubtitleTags>,
}

impl PrecomputedSubtitleTagger {
    pub fn new(by_id: HashMap<usize, SubtitleTags>) -> Self {
        Self { by_id }
    }

    pub fn from_json(path: &Path) -> Result<Self, SubtitleError> {
        let text = fs::read_to_string(path).map_err(|source| SubtitleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| SubtitleError::Tags {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let by_id: HashMap<usize, SubtitleTags> = serde_json::from_str(text)?;
        Ok(Self::new(by_id))
    }
}

impl SubtitleTagger for PrecomputedSubtitleTagger {
    fn tag(&mut self, subtitle: &Subtitle) -> Result<SubtitleTags, Box<dyn std::error::Error>> {
        self.by_id
            .get(&subtitle.id)
            .cloned()
            .ok_or_else(|| format!("no tags for cue {}", subtitle.id).into())
    }
}
