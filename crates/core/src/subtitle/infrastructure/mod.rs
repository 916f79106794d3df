pub mod csv_subtitle_writer;
pub mod precomputed_subtitle_tagger;
pub mod srt_parser;
