pub mod csv_detection_source;
pub mod csv_tracking_writer;
pub mod frame_directory;
