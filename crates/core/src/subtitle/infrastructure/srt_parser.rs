use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::subtitle::domain::subtitle::Subtitle;

#[derive(Error, Debug)]
pub enum SubtitleError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cue {cue}: {message}")]
    Parse { cue: usize, message: String },
    #[error("failed to parse tags file {path}: {source}")]
    Tags {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub fn read_srt(path: &Path) -> Result<Vec<Subtitle>, SubtitleError> {
    let text = fs::read_to_string(path).map_err(|source| SubtitleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_srt(&text)
}

/// Parses SubRip text. Cues are numbered 1.. in file order regardless of
/// the counter written in the file.
pub fn parse_srt(text: &str) -> Result<Vec<Subtitle>, SubtitleError> {
    let text = text.trim_start_matches('\u{feff}').replace("\r\n", "\n");
    let mut cues = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines().chain(std::iter::once("")) {
        if !line.trim().is_empty() {
            block.push(line);
            continue;
        }
        if block.is_empty() {
            continue;
        }
        let id = cues.len() + 1;
        cues.push(parse_block(id, &block)?);
        block.clear();
    }
    Ok(cues)
}

fn parse_block(id: usize, lines: &[&str]) -> Result<Subtitle, SubtitleError> {
    let timing = lines
        .iter()
        .position(|l| l.contains("-->"))
        .ok_or_else(|| SubtitleError::Parse {
            cue: id,
            message: "missing timing line".to_string(),
        })?;

    let (start, end) = parse_timing(lines[timing]).ok_or_else(|| SubtitleError::Parse {
        cue: id,
        message: format!("malformed timing line {:?}", lines[timing]),
    })?;

    let text = lines[timing + 1..]
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Subtitle {
        id,
        start,
        end,
        text,
    })
}

fn parse_timing(line: &str) -> Option<(f64, f64)> {
    let (start, rest) = line.split_once("-->")?;
    // Anything after the end stamp is positioning and ignored.
    let end = rest.split_whitespace().next()?;
    Some((parse_timestamp(start.trim())?, parse_timestamp(end)?))
}

/// `HH:MM:SS,mmm` (a `.` separator is accepted too).
fn parse_timestamp(stamp: &str) -> Option<f64> {
    let (clock, millis) = stamp.split_once([',', '.']).unwrap_or((stamp, "0"));
    let mut parts = clock.split(':');
    let h: u64 = parts.next()?.parse().ok()?;
    let m: u64 = parts.next()?.parse().ok()?;
    let s: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || m >= 60 || s >= 60 {
        return None;
    }
    let ms: u64 = millis.parse().ok()?;
    let whole = h.checked_mul(3600)?.checked_add(m * 60 + s)?;
    Some(whole as f64 + ms as f64 / 10f64.powi(millis.len() as i32))
}
