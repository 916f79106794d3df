use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::tracking::domain::detection_source::DetectionSource;
use crate::tracking::domain::frame_provider::FrameProvider;
use crate::tracking::domain::observation::{TrackedFrame, TrackingRecord};
use crate::tracking::domain::sample_selector::select_representative;
use crate::tracking::domain::track_history::TrackHistory;
use crate::video::domain::image_writer::ImageWriter;

/// Half-open range of video seconds to process, `[start_sec, end_sec)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_sec: u32,
    pub end_sec: Option<u32>,
}

impl TimeWindow {
    pub fn new(start_sec: u32, end_sec: Option<u32>) -> Self {
        Self { start_sec, end_sec }
    }

    pub fn contains(&self, sec: u32) -> bool {
        sec >= self.start_sec && self.end_sec.map_or(true, |end| sec < end)
    }
}

/// What a tracking run produced.
#[derive(Debug, Default)]
pub struct TrackingReport {
    /// One row per observation inside the window, in frame then tracker order.
    pub records: Vec<TrackingRecord>,
    /// Representative crops written, ascending track id then sample order.
    pub crops: Vec<PathBuf>,
    pub tracks: usize,
    /// Final per-track positions and samples.
    pub history: TrackHistory,
}

/// Tracking mode: folds tracker output into per-track histories and
/// persists each track's early / middle / late crops.
pub struct TrackSubjectsUseCase {
    source: Box<dyn DetectionSource>,
    frames: Box<dyn FrameProvider>,
    image_writer: Box<dyn ImageWriter>,
    logger: Box<dyn PipelineLogger>,
    window: TimeWindow,
}

impl TrackSubjectsUseCase {
    pub fn new(
        source: Box<dyn DetectionSource>,
        frames: Box<dyn FrameProvider>,
        image_writer: Box<dyn ImageWriter>,
        logger: Box<dyn PipelineLogger>,
        window: TimeWindow,
    ) -> Self {
        Self {
            source,
            frames,
            image_writer,
            logger,
            window,
        }
    }

    /// Runs tracking and writes representative crops into `output_dir`.
    ///
    /// Every observation in the window updates its track's positions. Crops
    /// are sampled only where the frame loads and the box lies inside it. A
    /// failing detection source or crop write aborts the run.
    pub fn execute(
        &mut self,
        output_dir: &Path,
    ) -> Result<TrackingReport, Box<dyn std::error::Error>> {
        let window = self.window;
        let tracked: Vec<TrackedFrame> = self
            .source
            .frames()
            .filter(|f| f.as_ref().map_or(true, |f| window.contains(f.sec)))
            .collect::<Result<Vec<_>, _>>()?;

        let total = tracked.len();
        let mut history = TrackHistory::default();
        let mut report = TrackingReport::default();

        for (i, frame) in tracked.iter().enumerate() {
            report
                .records
                .extend(frame.observations.iter().map(|o| o.to_record(frame.sec)));
            self.logger
                .metric("observations", frame.observations.len() as f64);

            if !frame.observations.is_empty() {
                self.update_history(&mut history, frame);
            }
            self.logger.progress(i + 1, total);
        }

        let t0 = Instant::now();
        for (track_id, track) in history.iter() {
            for (k, sample) in select_representative(track.samples()).into_iter().enumerate() {
                let path = output_dir.join(format!(
                    "track_{track_id}_sample_{}_sec_{}.jpg",
                    k + 1,
                    sample.sec
                ));
                self.image_writer.write(&path, &sample.crop)?;
                report.crops.push(path);
            }
        }
        self.logger
            .timing("write_crops", t0.elapsed().as_secs_f64() * 1000.0);

        report.tracks = history.len();
        report.history = history;
        self.logger.info(&format!(
            "Tracked {} subjects over {total} frames, wrote {} crops",
            report.tracks,
            report.crops.len()
        ));
        self.logger.summary();
        Ok(report)
    }

    fn update_history(&mut self, history: &mut TrackHistory, frame: &TrackedFrame) {
        let t0 = Instant::now();
        let image = match self.frames.frame_at(frame.sec) {
            Ok(image) => {
                self.logger
                    .timing("load", t0.elapsed().as_secs_f64() * 1000.0);
                Some(image)
            }
            Err(e) => {
                log::warn!("Frame at {}s unreadable, skipping crops: {e}", frame.sec);
                self.logger.count("frames unreadable");
                None
            }
        };

        for observation in &frame.observations {
            let crop = image.as_ref().and_then(|image| image.crop(&observation.bbox()));
            if crop.is_none() && image.is_some() {
                log::debug!(
                    "Track {} at {}s: crop outside frame, skipped",
                    observation.track_id,
                    frame.sec
                );
                self.logger.count("crops skipped");
            }
            history.update(observation.track_id, observation.center, frame.sec, crop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::shared::frame::Frame;
    use crate::tracking::domain::observation::TrackedObservation;
    use rstest::rstest;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubSource {
        frames: Vec<TrackedFrame>,
    }

    impl DetectionSource for StubSource {
        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<TrackedFrame, Box<dyn std::error::Error>>> + '_>
        {
            Box::new(self.frames.drain(..).map(Ok))
        }
    }

    struct StubFrames {
        unreadable: HashSet<u32>,
    }

    impl FrameProvider for StubFrames {
        fn frame_at(&mut self, sec: u32) -> Result<Frame, Box<dyn std::error::Error>> {
            if self.unreadable.contains(&sec) {
                return Err(format!("frame_{sec:04}.jpg missing").into());
            }
            Ok(Frame::new(vec![sec as u8; 100 * 80 * 3], 100, 80, sec as usize))
        }
    }

    #[derive(Clone, Default)]
    struct StubImageWriter {
        written: Arc<Mutex<Vec<(PathBuf, Frame)>>>,
    }

    impl ImageWriter for StubImageWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    // --- Helpers ---

    fn obs(track_id: u32, cx: f64, cy: f64, w: f64, h: f64) -> TrackedObservation {
        TrackedObservation {
            track_id,
            center: (cx, cy),
            size: (w, h),
        }
    }

    fn frame(sec: u32, observations: Vec<TrackedObservation>) -> TrackedFrame {
        TrackedFrame { sec, observations }
    }

    fn use_case(
        frames: Vec<TrackedFrame>,
        unreadable: &[u32],
        window: TimeWindow,
        writer: StubImageWriter,
    ) -> TrackSubjectsUseCase {
        TrackSubjectsUseCase::new(
            Box::new(StubSource { frames }),
            Box::new(StubFrames {
                unreadable: unreadable.iter().copied().collect(),
            }),
            Box::new(writer),
            Box::new(NullPipelineLogger),
            window,
        )
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    // --- Tests ---

    #[rstest]
    #[case(TimeWindow::new(0, None), 5, true)]
    #[case(TimeWindow::new(109, Some(349)), 109, true)]
    #[case(TimeWindow::new(109, Some(349)), 348, true)]
    #[case(TimeWindow::new(109, Some(349)), 349, false)]
    #[case(TimeWindow::new(109, Some(349)), 108, false)]
    fn test_time_window_is_half_open(
        #[case] window: TimeWindow,
        #[case] sec: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(window.contains(sec), expected);
    }

    #[test]
    fn test_two_samples_written_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let writer = StubImageWriter::default();
        let frames = vec![
            frame(5, vec![obs(1, 50.0, 40.0, 20.0, 20.0)]),
            frame(9, vec![obs(1, 52.0, 41.0, 20.0, 20.0)]),
        ];
        let report = use_case(frames, &[], TimeWindow::default(), writer.clone())
            .execute(dir.path())
            .unwrap();

        assert_eq!(
            names(&report.crops),
            vec!["track_1_sample_1_sec_5.jpg", "track_1_sample_2_sec_9.jpg"]
        );
        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].1.width(), 20);
        assert_eq!(written[0].1.data()[0], 5);
        assert_eq!(written[1].1.data()[0], 9);
    }

    #[test]
    fn test_first_middle_last_of_long_track() {
        let dir = tempfile::tempdir().unwrap();
        let frames = (0..25)
            .map(|sec| frame(sec, vec![obs(4, 50.0, 40.0, 10.0, 10.0)]))
            .collect();
        let report = use_case(frames, &[], TimeWindow::default(), StubImageWriter::default())
            .execute(dir.path())
            .unwrap();

        // only the first 20 seconds are sampled
        assert_eq!(
            names(&report.crops),
            vec![
                "track_4_sample_1_sec_0.jpg",
                "track_4_sample_2_sec_10.jpg",
                "track_4_sample_3_sec_19.jpg",
            ]
        );
        assert_eq!(report.records.len(), 25);
    }

    #[test]
    fn test_tracks_written_in_ascending_id_order() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![frame(
            3,
            vec![obs(7, 20.0, 20.0, 10.0, 10.0), obs(2, 60.0, 40.0, 10.0, 10.0)],
        )];
        let report = use_case(frames, &[], TimeWindow::default(), StubImageWriter::default())
            .execute(dir.path())
            .unwrap();

        assert_eq!(
            names(&report.crops),
            vec!["track_2_sample_1_sec_3.jpg", "track_7_sample_1_sec_3.jpg"]
        );
        assert_eq!(report.tracks, 2);
        // records keep tracker order
        assert_eq!(report.records[0].track_id, 7);
        assert_eq!(report.records[1].track_id, 2);
    }

    #[test]
    fn test_degenerate_and_out_of_frame_crops_still_record_positions() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![frame(
            1,
            vec![
                obs(1, 50.0, 40.0, 0.0, 10.0),
                obs(2, 95.0, 40.0, 20.0, 10.0),
                obs(3, 50.0, 40.0, 10.0, 10.0),
            ],
        )];
        let report = use_case(frames, &[], TimeWindow::default(), StubImageWriter::default())
            .execute(dir.path())
            .unwrap();

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.tracks, 3);
        assert_eq!(names(&report.crops), vec!["track_3_sample_1_sec_1.jpg"]);
        for (id, center, samples) in [(1, (50.0, 40.0), 0), (2, (95.0, 40.0), 0), (3, (50.0, 40.0), 1)] {
            let track = report.history.get(id).unwrap();
            assert_eq!(track.positions().copied().collect::<Vec<_>>(), vec![center]);
            assert_eq!(track.samples().len(), samples);
        }
    }

    #[test]
    fn test_unreadable_frame_keeps_records_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![
            frame(1, vec![obs(1, 50.0, 40.0, 10.0, 10.0)]),
            frame(2, vec![obs(1, 50.0, 40.0, 10.0, 10.0)]),
        ];
        let report = use_case(frames, &[1], TimeWindow::default(), StubImageWriter::default())
            .execute(dir.path())
            .unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(names(&report.crops), vec!["track_1_sample_1_sec_2.jpg"]);
        let track = report.history.get(1).unwrap();
        assert_eq!(track.positions().len(), 2);
        assert_eq!(track.samples().len(), 1);
    }

    #[test]
    fn test_window_filters_frames() {
        let dir = tempfile::tempdir().unwrap();
        let frames = (100..110)
            .map(|sec| frame(sec, vec![obs(1, 50.0, 40.0, 10.0, 10.0)]))
            .collect();
        let report = use_case(
            frames,
            &[],
            TimeWindow::new(103, Some(106)),
            StubImageWriter::default(),
        )
        .execute(dir.path())
        .unwrap();

        let secs: Vec<u32> = report.records.iter().map(|r| r.sec).collect();
        assert_eq!(secs, vec![103, 104, 105]);
    }

    #[test]
    fn test_record_fields_carry_center_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![frame(12, vec![obs(9, 30.5, 20.0, 8.0, 6.0)])];
        let report = use_case(frames, &[], TimeWindow::default(), StubImageWriter::default())
            .execute(dir.path())
            .unwrap();

        assert_eq!(
            report.records,
            vec![TrackingRecord {
                sec: 12,
                track_id: 9,
                x: 30.5,
                y: 20.0,
                w: 8.0,
                h: 6.0,
            }]
        );
    }

    #[test]
    fn test_crops_written_under_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![frame(0, vec![obs(1, 50.0, 40.0, 10.0, 10.0)])];
        let report = use_case(frames, &[], TimeWindow::default(), StubImageWriter::default())
            .execute(dir.path())
            .unwrap();

        assert!(report.crops[0].starts_with(dir.path()));
    }
}
