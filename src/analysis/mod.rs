// Analysis module - offline sound-event detection pipeline
//
// This module orchestrates the complete analysis of one night's loudness
// series, recorded as one representative decibel value per second.
//
// Pipeline:
// 1. Baseline estimation - median of the whole series
// 2. Elevated-region segmentation - loud bursts and sustained regions,
//    with rhythm-based snoring/talking disambiguation
// 3. Silence pass - an independent scan for long quiet stretches
// 4. Merge - coalesce fragments of one episode
// 5. Score - reduce the event list to a 0-100 snore score
//
// Data flows strictly forward; there is no feedback between steps. The
// whole computation is pure and synchronous: it takes an immutable sample
// slice, allocates its own result, and touches no shared state, so it is
// safe to run on any thread.

pub mod baseline;
pub mod event;
pub mod merge;
pub mod rhythm;
pub mod score;
pub mod segmenter;
pub mod silence;

pub use event::{SoundEvent, SoundEventType};

use crate::config::DetectorConfig;

/// Result of analyzing one recording: the final time-sorted event list
/// and the snore score. Created once at the end of a run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    pub events: Vec<SoundEvent>,
    pub snore_score: u8,
}

impl AnalysisResult {
    /// The defined result for degenerate input
    pub fn empty() -> Self {
        Self {
            events: Vec::new(),
            snore_score: 0,
        }
    }
}

/// Offline detector for overnight sound events
///
/// Total over its input domain: any sequence of numeric samples produces a
/// valid result. Sequences shorter than the configured minimum produce the
/// empty result by policy, not as an error.
pub struct SoundEventDetector {
    config: DetectorConfig,
}

impl Default for SoundEventDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundEventDetector {
    /// Create a detector with the calibrated default thresholds
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Create a detector with explicit configuration
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Analyze a complete recording.
    ///
    /// `samples` holds one loudness value per time unit from recording
    /// start; `recording_duration` is the recording length in the same
    /// unit and only feeds the score's coverage component. The reference
    /// start time of the recording is deliberately not a parameter: the
    /// algorithm never reads it (it only contextualizes results for
    /// display, see the report module).
    pub fn analyze(&self, samples: &[f32], recording_duration: f64) -> AnalysisResult {
        if samples.len() < self.config.min_sample_count {
            tracing::debug!(
                samples = samples.len(),
                min = self.config.min_sample_count,
                "input below minimum sample count, returning empty result"
            );
            return AnalysisResult::empty();
        }

        let baseline = baseline::estimate(samples);
        tracing::debug!(baseline, samples = samples.len(), "estimated baseline");

        let mut events = segmenter::scan(samples, baseline, &self.config);
        events.extend(silence::scan(samples, baseline, &self.config));
        events.sort_by(|a, b| {
            a.timestamp
                .partial_cmp(&b.timestamp)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let events = merge::merge_adjacent(events, self.config.merge_gap_secs);
        let snore_score = score::snore_score(&events, baseline, recording_duration);

        tracing::debug!(events = events.len(), snore_score, "analysis complete");

        AnalysisResult {
            events,
            snore_score,
        }
    }
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
