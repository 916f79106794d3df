pub mod analysis_result;
pub mod emotion_classifier;
pub mod emotion_scorer;
pub mod feature_extractor;
pub mod memory_fallback;
