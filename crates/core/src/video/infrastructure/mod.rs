pub mod image_file_loader;
pub mod image_file_writer;
pub mod image_sequence;
