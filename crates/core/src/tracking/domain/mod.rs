pub mod detection_source;
pub mod frame_provider;
pub mod observation;
pub mod sample_selector;
pub mod track_history;
