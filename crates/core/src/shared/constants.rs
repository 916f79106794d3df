/// Most recent centroids kept per track; older ones are evicted.
pub const POSITION_CAPACITY: usize = 30;

/// Crops kept per track. The first ones observed are kept, later ones dropped.
pub const SAMPLE_CAPACITY: usize = 20;

/// Representative crops chosen per track (first, middle, last).
pub const REPRESENTATIVE_SAMPLES: usize = 3;

pub const EDGE_DENSITY_THRESHOLD: f64 = 0.15;

/// Hysteresis thresholds of the edge operator used for edge density. They
/// apply to gradients of the Gaussian-smoothed crop.
pub const CANNY_LOW_THRESHOLD: f32 = 50.0;
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;

/// Shots shorter than this are short; at least `LONG_SHOT_SECS` are long.
pub const SHORT_SHOT_SECS: f64 = 3.0;
pub const LONG_SHOT_SECS: f64 = 10.0;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub const RESULTS_FILE_NAME: &str = "emotion_results.json";
pub const TRACKING_FILE_NAME: &str = "tracking_results.csv";
pub const SUBTITLES_FILE_NAME: &str = "subtitle_emotions.json";
pub const SUBTITLES_CSV_FILE_NAME: &str = "subtitle_emotions.csv";
pub const SCENES_FILE_NAME: &str = "scene_rhythm.json";
