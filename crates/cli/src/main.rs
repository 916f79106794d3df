use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};

use emotrack_core::classification::domain::emotion_classifier::EmotionClassifier;
use emotrack_core::classification::domain::emotion_scorer::{EmotionScorer, ScoringWeights};
use emotrack_core::classification::domain::feature_extractor::FeatureExtractor;
use emotrack_core::classification::domain::memory_fallback::MemoryFallbackPolicy;
use emotrack_core::classification::infrastructure::precomputed_emotion_classifier::PrecomputedEmotionClassifier;
use emotrack_core::detection::infrastructure::precomputed_face_detector::PrecomputedFaceDetector;
use emotrack_core::pipeline::classify_emotions_use_case::ClassifyEmotionsUseCase;
use emotrack_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use emotrack_core::pipeline::tag_subtitles_use_case::TagSubtitlesUseCase;
use emotrack_core::pipeline::track_subjects_use_case::{TimeWindow, TrackSubjectsUseCase};
use emotrack_core::scene::domain::editing_rhythm::RhythmSummary;
use emotrack_core::scene::infrastructure::indexer_insights::read_timeline;
use emotrack_core::shared::constants::{
    RESULTS_FILE_NAME, SCENES_FILE_NAME, SUBTITLES_CSV_FILE_NAME, SUBTITLES_FILE_NAME,
    TRACKING_FILE_NAME,
};
use emotrack_core::shared::json_writer::write_json;
use emotrack_core::subtitle::infrastructure::csv_subtitle_writer::write_tagged_subtitles_csv;
use emotrack_core::subtitle::infrastructure::precomputed_subtitle_tagger::PrecomputedSubtitleTagger;
use emotrack_core::subtitle::infrastructure::srt_parser::read_srt;
use emotrack_core::tracking::infrastructure::csv_detection_source::CsvDetectionSource;
use emotrack_core::tracking::infrastructure::csv_tracking_writer::write_tracking_records;
use emotrack_core::tracking::infrastructure::frame_directory::FrameDirectory;
use emotrack_core::video::infrastructure::image_file_loader::ImageFileLoader;
use emotrack_core::video::infrastructure::image_file_writer::ImageFileWriter;
use emotrack_core::video::infrastructure::image_sequence::{file_name, ImageSequence};

/// Per-track sampling and emotion classification of video frames.
#[derive(Parser)]
#[command(name = "emotrack")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log progress every N items.
    #[arg(long, global = true, default_value = "10")]
    throttle: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Accumulate tracker output per subject and save representative crops.
    Track(TrackArgs),
    /// Classify the emotion of the largest face in each image of a directory.
    Classify(ClassifyArgs),
    /// Tag subtitle lines with emotions and valence.
    Subtitles(SubtitlesArgs),
    /// Summarise scene and shot lengths from a video indexer export.
    Scenes(ScenesArgs),
}

#[derive(Args)]
struct TrackArgs {
    /// Tracker output CSV (sec,track_id,x,y,w,h with x,y the box centre).
    tracking: PathBuf,

    /// Directory of per-second frames named frame_0000.jpg.
    #[arg(long)]
    frames: PathBuf,

    /// Directory for crops and the tracking table.
    #[arg(long)]
    output: PathBuf,

    /// First second to process (inclusive).
    #[arg(long, default_value = "0")]
    start_sec: u32,

    /// Last second to process (exclusive).
    #[arg(long)]
    end_sec: Option<u32>,
}

#[derive(Args)]
struct ClassifyArgs {
    /// Directory of images, processed in file name order.
    input: PathBuf,

    /// Face detections JSON: {"<file name>": [[x, y, w, h], ...]}.
    #[arg(long)]
    faces: PathBuf,

    /// External classifier scores JSON: {"<file name>": {"<label>": weight}}.
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Directory for the results file.
    #[arg(long)]
    output: PathBuf,

    /// Multiplier on external classifier weights.
    #[arg(long, default_value = "0.5")]
    external_weight: f64,

    /// Weight added to happy when a smile is found.
    #[arg(long, default_value = "0.4")]
    smile_weight: f64,

    /// Weight added to angry when edge density exceeds the threshold.
    #[arg(long, default_value = "0.2")]
    edge_weight: f64,

    /// Edge density above which the angry nudge applies.
    #[arg(long, default_value = "0.15")]
    edge_threshold: f64,
}

#[derive(Args)]
struct SubtitlesArgs {
    /// SubRip subtitle file.
    input: PathBuf,

    /// Precomputed tags JSON: {"<cue id>": {"emotions": [...], ...}}.
    #[arg(long)]
    tags: PathBuf,

    /// Directory for the tagged subtitles file.
    #[arg(long)]
    output: PathBuf,

    /// Keep cues starting at or after this second.
    #[arg(long)]
    start_sec: Option<f64>,

    /// Keep cues starting at or before this second.
    #[arg(long)]
    end_sec: Option<f64>,
}

#[derive(Args)]
struct ScenesArgs {
    /// Video indexer insights JSON with scenes and shots.
    input: PathBuf,

    /// Directory for the rhythm summary file.
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    match &cli.command {
        Command::Track(args) => run_track(args, cli.throttle),
        Command::Classify(args) => run_classify(args, cli.throttle),
        Command::Subtitles(args) => run_subtitles(args, cli.throttle),
        Command::Scenes(args) => run_scenes(args),
    }
}

fn run_track(args: &TrackArgs, throttle: usize) -> Result<(), Box<dyn std::error::Error>> {
    let source = CsvDetectionSource::open(&args.tracking)?;
    let frames = FrameDirectory::new(&args.frames, Box::new(ImageFileLoader::new()));

    let mut use_case = TrackSubjectsUseCase::new(
        Box::new(source),
        Box::new(frames),
        Box::new(ImageFileWriter::new()),
        Box::new(StdoutPipelineLogger::new(throttle)),
        TimeWindow::new(args.start_sec, args.end_sec),
    );
    let report = use_case.execute(&args.output)?;

    let table = args.output.join(TRACKING_FILE_NAME);
    write_tracking_records(&table, &report.records)?;
    log::info!(
        "Saved {} crops of {} subjects and {} records to {}",
        report.crops.len(),
        report.tracks,
        report.records.len(),
        args.output.display()
    );
    Ok(())
}

fn run_classify(args: &ClassifyArgs, throttle: usize) -> Result<(), Box<dyn std::error::Error>> {
    let sequence = ImageSequence::from_dir(&args.input)?;
    let names: Vec<String> = sequence.paths().iter().map(|p| file_name(p)).collect();
    log::info!("Found {} images in {}", names.len(), args.input.display());

    let detector = PrecomputedFaceDetector::from_json(&args.faces, &names)?;
    let classifier: Option<Box<dyn EmotionClassifier>> = match &args.scores {
        Some(path) => Some(Box::new(PrecomputedEmotionClassifier::from_json(path, &names)?)),
        None => None,
    };
    let policy = MemoryFallbackPolicy::new(
        FeatureExtractor::default(),
        EmotionScorer::new(scoring_weights(args)),
    );

    let mut use_case = ClassifyEmotionsUseCase::new(
        Box::new(ImageFileLoader::new()),
        Box::new(detector),
        classifier,
        policy,
        Box::new(StdoutPipelineLogger::new(throttle)),
    );
    let results = use_case.execute(&sequence);

    let path = args.output.join(RESULTS_FILE_NAME);
    write_json(&path, &results)?;
    log::info!("Wrote {} results to {}", results.len(), path.display());
    Ok(())
}

fn run_subtitles(args: &SubtitlesArgs, throttle: usize) -> Result<(), Box<dyn std::error::Error>> {
    let subtitles = read_srt(&args.input)?;
    let tagger = PrecomputedSubtitleTagger::from_json(&args.tags)?;

    let mut use_case = TagSubtitlesUseCase::new(
        Box::new(tagger),
        Box::new(StdoutPipelineLogger::new(throttle)),
        subtitle_window(args),
    );
    let tagged = use_case.execute(&subtitles);

    let path = args.output.join(SUBTITLES_FILE_NAME);
    write_json(&path, &tagged)?;
    let table = args.output.join(SUBTITLES_CSV_FILE_NAME);
    write_tagged_subtitles_csv(&table, &tagged)?;
    log::info!(
        "Wrote {} tagged lines to {} and {}",
        tagged.len(),
        path.display(),
        table.display()
    );
    Ok(())
}

fn run_scenes(args: &ScenesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let timeline = read_timeline(&args.input)?;
    let summary = RhythmSummary::analyze(&timeline);

    log::info!(
        "{} scenes, {} shots ({} unassigned to a scene)",
        summary.total_scenes,
        summary.total_shots,
        summary.unassigned_shots
    );
    if let Some(stats) = &summary.scene_durations {
        log::info!(
            "Scene length: mean {:.1}s, min {:.1}s, max {:.1}s, total {:.1}s",
            stats.mean,
            stats.min,
            stats.max,
            stats.total
        );
    }
    if let Some(stats) = &summary.shot_durations {
        log::info!(
            "Shot length: mean {:.1}s, min {:.1}s, max {:.1}s",
            stats.mean,
            stats.min,
            stats.max
        );
    }
    let lengths = summary.shot_lengths;
    log::info!(
        "Shots short/medium/long: {}/{}/{}",
        lengths.short,
        lengths.medium,
        lengths.long
    );
    log::info!(
        "Keyframes: {} total, {:.1} per shot, at most {}",
        summary.keyframes.total,
        summary.keyframes.mean_per_shot,
        summary.keyframes.max_per_shot
    );

    let path = args.output.join(SCENES_FILE_NAME);
    write_json(&path, &summary)?;
    log::info!("Wrote rhythm summary to {}", path.display());
    Ok(())
}

fn scoring_weights(args: &ClassifyArgs) -> ScoringWeights {
    ScoringWeights {
        external: args.external_weight,
        smile: args.smile_weight,
        edge: args.edge_weight,
        edge_threshold: args.edge_threshold,
    }
}

fn subtitle_window(args: &SubtitlesArgs) -> Option<(f64, f64)> {
    match (args.start_sec, args.end_sec) {
        (None, None) => None,
        (start, end) => Some((start.unwrap_or(0.0), end.unwrap_or(f64::INFINITY))),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.throttle == 0 {
        return Err("Throttle must be at least 1".into());
    }
    match &cli.command {
        Command::Track(args) => {
            require_file(&args.tracking, "Tracking file")?;
            require_dir(&args.frames, "Frame directory")?;
            if let Some(end) = args.end_sec {
                if end <= args.start_sec {
                    return Err(format!(
                        "End second must be after start second, got {}..{end}",
                        args.start_sec
                    )
                    .into());
                }
            }
        }
        Command::Classify(args) => {
            require_dir(&args.input, "Input directory")?;
            require_file(&args.faces, "Face detections file")?;
            if let Some(scores) = &args.scores {
                require_file(scores, "Scores file")?;
            }
            let weights = [
                ("External weight", args.external_weight),
                ("Smile weight", args.smile_weight),
                ("Edge weight", args.edge_weight),
                ("Edge threshold", args.edge_threshold),
            ];
            for (name, value) in weights {
                if !value.is_finite() || value < 0.0 {
                    return Err(format!("{name} must be a non-negative number, got {value}").into());
                }
            }
        }
        Command::Subtitles(args) => {
            require_file(&args.input, "Subtitle file")?;
            require_file(&args.tags, "Tags file")?;
            if let (Some(start), Some(end)) = (args.start_sec, args.end_sec) {
                if end < start {
                    return Err(format!(
                        "End second must not precede start second, got {start}..{end}"
                    )
                    .into());
                }
            }
        }
        Command::Scenes(args) => {
            require_file(&args.input, "Insights file")?;
        }
    }
    Ok(())
}

fn require_file(path: &Path, what: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_file() {
        return Err(format!("{what} not found: {}", path.display()).into());
    }
    Ok(())
}

fn require_dir(path: &Path, what: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_dir() {
        return Err(format!("{what} not found: {}", path.display()).into());
    }
    Ok(())
}
