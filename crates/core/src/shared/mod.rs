pub mod constants;
pub mod emotion;
pub mod frame;
pub mod json_writer;
pub mod region;
