pub mod classify_emotions_use_case;
pub mod pipeline_logger;
pub mod tag_subtitles_use_case;
pub mod track_subjects_use_case;
