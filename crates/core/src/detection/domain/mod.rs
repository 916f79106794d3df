pub mod face_detector;
pub mod sub_region_detector;
