pub mod no_sub_regions;
pub mod precomputed_face_detector;
