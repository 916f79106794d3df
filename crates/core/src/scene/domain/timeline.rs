use serde::Serialize;

/// Time interval on the video timeline, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Half-open: a shot starting exactly at `end` belongs to the next scene.
    pub fn contains(&self, sec: f64) -> bool {
        self.start <= sec && sec < self.end
    }
}

/// A scene as segmented by the video indexer. Only its first instance is
/// used; `span` is `None` when the indexer reported no instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub id: u32,
    pub span: Option<Span>,
}

/// A camera shot and the number of keyframes the indexer extracted from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Shot {
    pub id: u32,
    pub span: Option<Span>,
    pub keyframes: usize,
}

/// Scenes and shots of one video, in indexer order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    pub scenes: Vec<Scene>,
    pub shots: Vec<Shot>,
}

impl Timeline {
    /// First scene whose span contains `sec`.
    pub fn scene_at(&self, sec: f64) -> Option<u32> {
        self.scenes
            .iter()
            .find(|scene| scene.span.is_some_and(|span| span.contains(sec)))
            .map(|scene| scene.id)
    }
}

/// Parses an indexer duration such as `0:00:11.68` into seconds.
///
/// Hours and minutes are integers, seconds may carry a fraction. Anything
/// else, including negative or non-finite seconds, is `None`.
pub fn parse_duration(text: &str) -> Option<f64> {
    let mut parts = text.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}
