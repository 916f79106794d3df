use std::collections::BTreeMap;

use serde::Serialize;

use crate::scene::domain::timeline::Timeline;
use crate::shared::constants::{LONG_SHOT_SECS, SHORT_SHOT_SECS};

/// Summary statistics over a set of durations, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DurationStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
}

impl DurationStats {
    /// `None` for an empty slice.
    pub fn from_durations(durations: &[f64]) -> Option<Self> {
        if durations.is_empty() {
            return None;
        }
        let total: f64 = durations.iter().sum();
        Some(Self {
            count: durations.len(),
            mean: total / durations.len() as f64,
            min: durations.iter().copied().fold(f64::INFINITY, f64::min),
            max: durations.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            total,
        })
    }
}

/// Shot counts by length: short `< 3s`, medium `[3s, 10s)`, long `>= 10s`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ShotLengthBuckets {
    pub short: usize,
    pub medium: usize,
    pub long: usize,
}

impl ShotLengthBuckets {
    pub fn add(&mut self, duration: f64) {
        if duration < SHORT_SHOT_SECS {
            self.short += 1;
        } else if duration < LONG_SHOT_SECS {
            self.medium += 1;
        } else {
            self.long += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.short + self.medium + self.long
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct KeyframeStats {
    pub total: usize,
    pub mean_per_shot: f64,
    pub max_per_shot: usize,
    /// Keyframe count to number of shots with that many keyframes.
    pub shots_by_count: BTreeMap<usize, usize>,
}

/// Editing rhythm of a video: how long its scenes and shots run, how shots
/// fall into scenes, and how many keyframes each shot yields.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RhythmSummary {
    pub total_scenes: usize,
    pub total_shots: usize,
    pub scene_durations: Option<DurationStats>,
    pub shot_durations: Option<DurationStats>,
    /// Shots per scene id, assigned by shot start time.
    pub shots_per_scene: BTreeMap<u32, usize>,
    pub unassigned_shots: usize,
    pub shot_lengths: ShotLengthBuckets,
    pub keyframes: KeyframeStats,
}

impl RhythmSummary {
    pub fn analyze(timeline: &Timeline) -> Self {
        let scene_durations: Vec<f64> = timeline
            .scenes
            .iter()
            .filter_map(|scene| scene.span.map(|span| span.duration()))
            .collect();

        let mut summary = Self {
            total_scenes: timeline.scenes.len(),
            total_shots: timeline.shots.len(),
            scene_durations: DurationStats::from_durations(&scene_durations),
            ..Self::default()
        };

        let mut shot_durations = Vec::new();
        for shot in &timeline.shots {
            let Some(span) = shot.span else {
                log::debug!("Shot {} has no instance, left out of durations", shot.id);
                continue;
            };
            shot_durations.push(span.duration());
            summary.shot_lengths.add(span.duration());
            match timeline.scene_at(span.start) {
                Some(scene_id) => *summary.shots_per_scene.entry(scene_id).or_default() += 1,
                None => summary.unassigned_shots += 1,
            }
        }
        summary.shot_durations = DurationStats::from_durations(&shot_durations);
        summary.keyframes = keyframe_stats(timeline);
        summary
    }
}

fn keyframe_stats(timeline: &Timeline) -> KeyframeStats {
    let mut stats = KeyframeStats::default();
    for shot in &timeline.shots {
        stats.total += shot.keyframes;
        stats.max_per_shot = stats.max_per_shot.max(shot.keyframes);
        *stats.shots_by_count.entry(shot.keyframes).or_default() += 1;
    }
    if !timeline.shots.is_empty() {
        stats.mean_per_shot = stats.total as f64 / timeline.shots.len() as f64;
    }
    stats
}
