use serde::{Deserialize, Serialize};

use crate::shared::region::Region;

/// One subject reported by the external tracker in one frame.
///
/// `center` and `size` are the tracker's `xywh` box: centre point plus
/// full width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedObservation {
    pub track_id: u32,
    pub center: (f64, f64),
    pub size: (f64, f64),
}

impl TrackedObservation {
    pub fn bbox(&self) -> Region {
        let (cx, cy) = self.center;
        let (w, h) = self.size;
        Region::from_center(cx, cy, w, h).with_track_id(self.track_id)
    }

    pub fn to_record(&self, sec: u32) -> TrackingRecord {
        TrackingRecord {
            sec,
            track_id: self.track_id,
            x: self.center.0,
            y: self.center.1,
            w: self.size.0,
            h: self.size.1,
        }
    }
}

impl From<&TrackingRecord> for TrackedObservation {
    fn from(record: &TrackingRecord) -> Self {
        Self {
            track_id: record.track_id,
            center: (record.x, record.y),
            size: (record.w, record.h),
        }
    }
}

/// Everything the tracker reported at one second of video, in reported order.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedFrame {
    pub sec: u32,
    pub observations: Vec<TrackedObservation>,
}

/// Tabular row of the tracking output: one per (second, track).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub sec: u32,
    pub track_id: u32,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}
