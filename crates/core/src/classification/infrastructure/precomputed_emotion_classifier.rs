use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::classification::domain::emotion_classifier::{EmotionClassifier, ExternalScores};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum ScoresFileError {
    #[error("failed to read scores file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scores file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Serves external classifier output produced offline.
///
/// The file maps image file names to label → weight objects. An image with
/// no entry behaves like a classifier that returned nothing.
pub struct PrecomputedEmotionClassifier {
    by_index: HashMap<usize, ExternalScores>,
}

impl PrecomputedEmotionClassifier {
    pub fn new(by_index: HashMap<usize, ExternalScores>) -> Self {
        Self { by_index }
    }

    pub fn from_json(path: &Path, names: &[String]) -> Result<Self, ScoresFileError> {
        let text = fs::read_to_string(path).map_err(|source| ScoresFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, names).map_err(|source| ScoresFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(text: &str, names: &[String]) -> Result<Self, serde_json::Error> {
        let mut by_name: HashMap<String, ExternalScores> = serde_json::from_str(text)?;
        let by_index = names
            .iter()
            .enumerate()
            .filter_map(|(index, name)| by_name.remove(name).map(|scores| (index, scores)))
            .collect();
        Ok(Self::new(by_index))
    }
}

impl EmotionClassifier for PrecomputedEmotionClassifier {
    fn classify(
        &mut self,
        frame: &Frame,
        _face: &Region,
    ) -> Result<Option<ExternalScores>, Box<dyn std::error::Error>> {
        Ok(self.by_index.get(&frame.index()).cloned())
    }
}
