// Snorescope - offline sound-event analysis for overnight recordings
//
// The core of the crate is the analysis module: a deterministic,
// single-pass detector that turns a per-second loudness series into a
// compact list of labeled events plus a 0-100 snore score. The fixtures
// and report modules provide the offline harness and human-facing
// summary around it.

// Module declarations
pub mod analysis;
pub mod config;
pub mod fixtures;
pub mod report;

// Re-exports for convenience
pub use analysis::{AnalysisResult, SoundEvent, SoundEventDetector, SoundEventType};
pub use config::{AppConfig, DetectorConfig};
