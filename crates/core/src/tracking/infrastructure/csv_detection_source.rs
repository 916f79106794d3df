use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::tracking::domain::detection_source::DetectionSource;
use crate::tracking::domain::observation::{TrackedFrame, TrackedObservation, TrackingRecord};

#[derive(Error, Debug)]
pub enum TrackingCsvError {
    #[error("failed to open tracking csv {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed row in {path}: {source}")]
    Row {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to write tracking csv {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Replays tracker output stored as `sec,track_id,x,y,w,h` rows.
///
/// Rows are grouped per second in ascending order; rows sharing a second
/// keep their file order, which stands in for the tracker's reported order.
pub struct CsvDetectionSource {
    frames: Vec<TrackedFrame>,
}

impl CsvDetectionSource {
    pub fn open(path: &Path) -> Result<Self, TrackingCsvError> {
        let mut reader = csv::Reader::from_path(path).map_err(|source| TrackingCsvError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut records = Vec::new();
        for row in reader.deserialize::<TrackingRecord>() {
            records.push(row.map_err(|source| TrackingCsvError::Row {
                path: path.to_path_buf(),
                source,
            })?);
        }
        log::debug!("Loaded {} tracking rows from {}", records.len(), path.display());
        Ok(Self::from_records(&records))
    }

    pub fn from_records(records: &[TrackingRecord]) -> Self {
        let mut by_sec: BTreeMap<u32, Vec<TrackedObservation>> = BTreeMap::new();
        for record in records {
            by_sec
                .entry(record.sec)
                .or_default()
                .push(TrackedObservation::from(record));
        }
        let frames = by_sec
            .into_iter()
            .map(|(sec, observations)| TrackedFrame { sec, observations })
            .collect();
        Self { frames }
    }
}

impl DetectionSource for CsvDetectionSource {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<TrackedFrame, Box<dyn std::error::Error>>> + '_> {
        Box::new(self.frames.drain(..).map(Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(sec: u32, track_id: u32) -> TrackingRecord {
        TrackingRecord {
            sec,
            track_id,
            x: 10.0,
            y: 10.0,
            w: 4.0,
            h: 4.0,
        }
    }

    fn collect(source: &mut CsvDetectionSource) -> Vec<TrackedFrame> {
        source.frames().map(|f| f.unwrap()).collect()
    }

    #[test]
    fn test_groups_by_second_in_ascending_order() {
        let mut source =
            CsvDetectionSource::from_records(&[record(5, 1), record(3, 2), record(5, 3)]);
        let frames = collect(&mut source);
        let secs: Vec<u32> = frames.iter().map(|f| f.sec).collect();
        assert_eq!(secs, vec![3, 5]);
        assert_eq!(frames[1].observations.len(), 2);
    }

    #[test]
    fn test_preserves_row_order_within_second() {
        let mut source =
            CsvDetectionSource::from_records(&[record(1, 9), record(1, 4), record(1, 6)]);
        let frames = collect(&mut source);
        let ids: Vec<u32> = frames[0].observations.iter().map(|o| o.track_id).collect();
        assert_eq!(ids, vec![9, 4, 6]);
    }

    #[test]
    fn test_open_reads_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracks.csv");
        fs::write(
            &path,
            "sec,track_id,x,y,w,h\n109,1,320.5,200.0,40.0,80.0\n110,1,322.0,201.0,41.0,79.0\n",
        )
        .unwrap();

        let mut source = CsvDetectionSource::open(&path).unwrap();
        let frames = collect(&mut source);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].sec, 109);
        assert_eq!(frames[0].observations[0].center, (320.5, 200.0));
        assert_eq!(frames[1].observations[0].size, (41.0, 79.0));
    }

    #[test]
    fn test_open_missing_file_errors() {
        let err = CsvDetectionSource::open(Path::new("/nonexistent/tracks.csv"));
        assert!(matches!(err, Err(TrackingCsvError::Open { .. })));
    }

    #[test]
    fn test_malformed_row_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "sec,track_id,x,y,w,h\nabc,1,0,0,1,1\n").unwrap();
        let err = CsvDetectionSource::open(&path);
        assert!(matches!(err, Err(TrackingCsvError::Row { .. })));
    }

    #[test]
    fn test_frames_drained_once() {
        let mut source = CsvDetectionSource::from_records(&[record(1, 1)]);
        assert_eq!(collect(&mut source).len(), 1);
        assert!(collect(&mut source).is_empty());
    }
}
