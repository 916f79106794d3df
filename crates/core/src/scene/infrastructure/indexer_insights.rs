use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::scene::domain::timeline::{parse_duration, Scene, Shot, Span, Timeline};

#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("failed to read insights file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse insights file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("insights file {path} lists no videos")]
    NoVideo { path: PathBuf },
    #[error("{kind} {id}: malformed time {value:?}")]
    Time {
        kind: &'static str,
        id: u32,
        value: String,
    },
}

#[derive(Deserialize)]
struct IndexFile {
    #[serde(default)]
    videos: Vec<VideoEntry>,
}

#[derive(Deserialize)]
struct VideoEntry {
    #[serde(default)]
    insights: Insights,
}

#[derive(Default, Deserialize)]
struct Insights {
    #[serde(default)]
    scenes: Vec<Item>,
    #[serde(default)]
    shots: Vec<Item>,
}

#[derive(Deserialize)]
struct Item {
    id: u32,
    #[serde(default)]
    instances: Vec<Instance>,
    #[serde(default, rename = "keyFrames")]
    key_frames: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct Instance {
    start: String,
    end: String,
}

/// Reads the scene and shot timeline of the first video in a video indexer
/// insights export (`videos[0].insights.scenes` / `.shots`).
pub fn read_timeline(path: &Path) -> Result<Timeline, SceneFileError> {
    let text = fs::read_to_string(path).map_err(|source| SceneFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: IndexFile = serde_json::from_str(&text).map_err(|source| SceneFileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let video = file
        .videos
        .into_iter()
        .next()
        .ok_or_else(|| SceneFileError::NoVideo {
            path: path.to_path_buf(),
        })?;
    timeline_from(video.insights)
}

fn timeline_from(insights: Insights) -> Result<Timeline, SceneFileError> {
    let scenes = insights
        .scenes
        .iter()
        .map(|item| first_span("scene", item).map(|span| Scene { id: item.id, span }))
        .collect::<Result<Vec<_>, _>>()?;
    let shots = insights
        .shots
        .iter()
        .map(|item| {
            first_span("shot", item).map(|span| Shot {
                id: item.id,
                span,
                keyframes: item.key_frames.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Timeline { scenes, shots })
}

fn first_span(kind: &'static str, item: &Item) -> Result<Option<Span>, SceneFileError> {
    let Some(instance) = item.instances.first() else {
        return Ok(None);
    };
    let time = |value: &str| {
        parse_duration(value).ok_or_else(|| SceneFileError::Time {
            kind,
            id: item.id,
            value: value.to_string(),
        })
    };
    Ok(Some(Span::new(time(&instance.start)?, time(&instance.end)?)))
}
