use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::subtitle::domain::subtitle::TaggedSubtitle;
use crate::subtitle::infrastructure::srt_parser::SubtitleError;

/// Emotion labels share one column, joined by this separator.
pub const EMOTION_SEPARATOR: &str = ";";

/// Flat row of the tagged subtitle table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaggedSubtitleRow {
    pub id: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub emotions: String,
    pub situation: String,
    pub situation_type: String,
    pub valence: f64,
}

impl From<&TaggedSubtitle> for TaggedSubtitleRow {
    fn from(tagged: &TaggedSubtitle) -> Self {
        Self {
            id: tagged.id,
            start: tagged.start,
            end: tagged.end,
            text: tagged.text.clone(),
            emotions: tagged.emotions.join(EMOTION_SEPARATOR),
            situation: tagged.situation.clone(),
            situation_type: tagged.situation_type.clone(),
            valence: tagged.valence,
        }
    }
}

/// Writes tagged subtitles as a CSV table with a header row.
pub fn write_tagged_subtitles_csv(
    path: &Path,
    subtitles: &[TaggedSubtitle],
) -> Result<(), SubtitleError> {
    let to_error = |source: csv::Error| SubtitleError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| to_error(e.into()))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(to_error)?;
    for subtitle in subtitles {
        writer
            .serialize(TaggedSubtitleRow::from(subtitle))
            .map_err(to_error)?;
    }
    writer.flush().map_err(|e| to_error(e.into()))?;
    Ok(())
}
