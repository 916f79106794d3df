use std::fs;
use std::path::Path;

use crate::tracking::domain::observation::TrackingRecord;
use crate::tracking::infrastructure::csv_detection_source::TrackingCsvError;

/// Writes tracking records as `sec,track_id,x,y,w,h` with a header row.
pub fn write_tracking_records(
    path: &Path,
    records: &[TrackingRecord],
) -> Result<(), TrackingCsvError> {
    let to_error = |source: csv::Error| TrackingCsvError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| to_error(e.into()))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(to_error)?;
    for record in records {
        writer.serialize(record).map_err(to_error)?;
    }
    writer.flush().map_err(|e| to_error(e.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::infrastructure::csv_detection_source::CsvDetectionSource;
    use crate::tracking::domain::detection_source::DetectionSource;

    fn record(sec: u32, track_id: u32, x: f64) -> TrackingRecord {
        TrackingRecord {
            sec,
            track_id,
            x,
            y: 2.0,
            w: 3.0,
            h: 4.0,
        }
    }

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_tracking_records(&path, &[record(109, 1, 1.5)]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("sec,track_id,x,y,w,h"));
        assert_eq!(lines.next(), Some("109,1,1.5,2.0,3.0,4.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/results/out.csv");
        write_tracking_records(&path, &[]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_output_is_readable_as_detection_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![record(1, 1, 10.0), record(1, 2, 20.0), record(2, 1, 11.0)];
        write_tracking_records(&path, &records).unwrap();

        let mut source = CsvDetectionSource::open(&path).unwrap();
        let frames: Vec<_> = source.frames().map(|f| f.unwrap()).collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].observations.len(), 2);
    }
}
