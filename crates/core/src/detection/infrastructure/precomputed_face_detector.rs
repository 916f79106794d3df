use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum DetectionFileError {
    #[error("failed to read detections file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse detections file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Replays face detections computed ahead of time, by frame index.
///
/// The file maps image file names to `[x, y, w, h]` boxes; `names` gives the
/// file name at each sequence index. Frames without an entry have no faces.
pub struct PrecomputedFaceDetector {
    by_index: HashMap<usize, Vec<Region>>,
}

impl PrecomputedFaceDetector {
    pub fn new(by_index: HashMap<usize, Vec<Region>>) -> Self {
        Self { by_index }
    }

    pub fn from_json(path: &Path, names: &[String]) -> Result<Self, DetectionFileError> {
        let text = fs::read_to_string(path).map_err(|source| DetectionFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, names).map_err(|source| DetectionFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(text: &str, names: &[String]) -> Result<Self, serde_json::Error> {
        let mut by_name: HashMap<String, Vec<[i32; 4]>> = serde_json::from_str(text)?;
        let by_index = names
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                by_name.remove(name).map(|boxes| {
                    let regions = boxes
                        .into_iter()
                        .map(|[x, y, w, h]| Region::new(x, y, w, h))
                        .collect();
                    (index, regions)
                })
            })
            .collect();
        Ok(Self::new(by_index))
    }
}

impl FaceDetector for PrecomputedFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        Ok(self.by_index.get(&frame.index()).cloned().unwrap_or_default())
    }
}
