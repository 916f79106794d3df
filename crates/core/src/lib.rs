pub mod classification;
pub mod detection;
pub mod pipeline;
pub mod scene;
pub mod shared;
pub mod subtitle;
pub mod tracking;
pub mod video;
