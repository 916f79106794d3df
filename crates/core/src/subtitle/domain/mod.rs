pub mod subtitle;
pub mod subtitle_tagger;
pub mod valence;
