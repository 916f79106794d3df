pub mod precomputed_emotion_classifier;
