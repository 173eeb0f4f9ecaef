pub mod detector;
pub mod recognizer;

// Re-exports for convenience
pub use detector::{DetectorOptions, HandDetector, start_detector};
pub use recognizer::start_recognizer;
