use std::collections::{BTreeMap, VecDeque};

use crate::shared::constants::{POSITION_CAPACITY, SAMPLE_CAPACITY};
use crate::shared::frame::Frame;

/// One captured crop of a tracked subject and the second it was seen at.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub sec: u32,
    pub crop: Frame,
}

/// Accumulated state of a single track id.
///
/// `positions` is a sliding window over the most recent centroids, while
/// `samples` keeps the first crops seen and ignores everything after the
/// buffer fills.
#[derive(Clone, Debug, Default)]
pub struct Track {
    positions: VecDeque<(f64, f64)>,
    samples: Vec<Sample>,
}

impl Track {
    pub fn positions(&self) -> impl ExactSizeIterator<Item = &(f64, f64)> + '_ {
        self.positions.iter()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

/// Per-track history keyed by the tracker's id.
///
/// Tracks are created on first observation and kept for the whole run.
/// Iteration is in ascending track id.
#[derive(Debug)]
pub struct TrackHistory {
    position_capacity: usize,
    sample_capacity: usize,
    tracks: BTreeMap<u32, Track>,
}

impl TrackHistory {
    pub fn new(position_capacity: usize, sample_capacity: usize) -> Self {
        Self {
            position_capacity: position_capacity.max(1),
            sample_capacity,
            tracks: BTreeMap::new(),
        }
    }

    /// Records one observation of `track_id`. Only that track is touched.
    ///
    /// The position is always kept; a sample is taken only when a crop
    /// could be cut for this observation.
    pub fn update(&mut self, track_id: u32, position: (f64, f64), sec: u32, crop: Option<Frame>) {
        let track = self.tracks.entry(track_id).or_default();

        if track.positions.len() == self.position_capacity {
            track.positions.pop_front();
        }
        track.positions.push_back(position);

        if let Some(crop) = crop {
            if track.samples.len() < self.sample_capacity {
                track.samples.push(Sample { sec, crop });
            }
        }
    }

    pub fn get(&self, track_id: u32) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Track)> + '_ {
        self.tracks.iter().map(|(id, track)| (*id, track))
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for TrackHistory {
    fn default() -> Self {
        Self::new(POSITION_CAPACITY, SAMPLE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop(tag: u8) -> Option<Frame> {
        Some(Frame::new(vec![tag; 3], 1, 1, 0))
    }

    fn positions(history: &TrackHistory, id: u32) -> Vec<(f64, f64)> {
        history.get(id).unwrap().positions().copied().collect()
    }

    fn sample_secs(history: &TrackHistory, id: u32) -> Vec<u32> {
        history
            .get(id)
            .unwrap()
            .samples()
            .iter()
            .map(|s| s.sec)
            .collect()
    }

    #[test]
    fn test_first_update_creates_track() {
        let mut history = TrackHistory::default();
        assert!(history.is_empty());
        history.update(4, (1.0, 2.0), 10, crop(1));
        assert_eq!(history.len(), 1);
        assert_eq!(positions(&history, 4), vec![(1.0, 2.0)]);
        assert_eq!(sample_secs(&history, 4), vec![10]);
    }

    #[test]
    fn test_positions_keep_last_thirty_in_order() {
        let mut history = TrackHistory::default();
        for i in 0..45 {
            history.update(1, (i as f64, -(i as f64)), i, crop(0));
        }
        let stored = positions(&history, 1);
        assert_eq!(stored.len(), 30);
        let expected: Vec<(f64, f64)> = (15..45).map(|i| (i as f64, -(i as f64))).collect();
        assert_eq!(stored, expected);
    }

    #[test]
    fn test_positions_exactly_at_capacity_not_evicted() {
        let mut history = TrackHistory::default();
        for i in 0..30 {
            history.update(1, (i as f64, 0.0), i, crop(0));
        }
        assert_eq!(positions(&history, 1)[0], (0.0, 0.0));
    }

    #[test]
    fn test_samples_keep_first_twenty() {
        let mut history = TrackHistory::default();
        for i in 0..35 {
            history.update(1, (0.0, 0.0), i, crop(i as u8));
        }
        let track = history.get(1).unwrap();
        assert_eq!(track.samples().len(), 20);
        assert_eq!(sample_secs(&history, 1), (0..20).collect::<Vec<_>>());
        assert_eq!(Some(track.samples()[19].crop.clone()), crop(19));
    }

    #[test]
    fn test_tracks_are_independent() {
        let mut history = TrackHistory::default();
        for i in 0..25 {
            history.update(1, (i as f64, 0.0), i, crop(0));
        }
        history.update(2, (99.0, 99.0), 100, crop(9));

        assert_eq!(positions(&history, 2), vec![(99.0, 99.0)]);
        assert_eq!(sample_secs(&history, 2), vec![100]);
        assert_eq!(history.get(1).unwrap().samples().len(), 20);
        assert_eq!(positions(&history, 1).len(), 25);
    }

    #[test]
    fn test_iteration_in_ascending_id() {
        let mut history = TrackHistory::default();
        for id in [7, 2, 5] {
            history.update(id, (0.0, 0.0), 0, crop(0));
        }
        let ids: Vec<u32> = history.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![2, 5, 7]);
    }

    #[test]
    fn test_custom_capacities() {
        let mut history = TrackHistory::new(2, 1);
        for i in 0..4 {
            history.update(1, (i as f64, 0.0), i, crop(0));
        }
        assert_eq!(positions(&history, 1), vec![(2.0, 0.0), (3.0, 0.0)]);
        assert_eq!(sample_secs(&history, 1), vec![0]);
    }

    #[test]
    fn test_missing_crop_still_records_position() {
        let mut history = TrackHistory::default();
        history.update(3, (5.0, 6.0), 1, None);
        assert_eq!(positions(&history, 3), vec![(5.0, 6.0)]);
        assert!(sample_secs(&history, 3).is_empty());

        history.update(3, (7.0, 8.0), 2, crop(2));
        history.update(3, (9.0, 1.0), 3, None);
        assert_eq!(positions(&history, 3), vec![(5.0, 6.0), (7.0, 8.0), (9.0, 1.0)]);
        assert_eq!(sample_secs(&history, 3), vec![2]);
    }

    #[test]
    fn test_unknown_track_is_none() {
        assert!(TrackHistory::default().get(3).is_none());
    }
}
