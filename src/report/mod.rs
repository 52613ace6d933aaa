//! Recording summary and shareable report
//!
//! The analysis result is consumed by persistence and display
//! collaborators outside this crate. This module packages what those
//! surfaces need: whole-recording loudness statistics, snoring totals, a
//! category label for the headline score, and a plain-text report for
//! sharing.

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, SoundEvent, SoundEventType};

/// Serializable summary of one analyzed recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSummary {
    /// Recording length in seconds
    pub duration_secs: f64,
    /// Unix epoch seconds of recording start, when known. Display-only;
    /// the detector itself never reads it.
    pub start_epoch_secs: Option<u64>,
    /// Mean loudness over the entire recording
    pub average_decibels: f32,
    /// Loudest sample in the entire recording
    pub peak_decibels: f32,
    pub snore_score: u8,
    pub snoring_minutes: f64,
    pub snoring_episodes: usize,
    pub event_count: usize,
    pub events: Vec<SoundEvent>,
}

impl RecordingSummary {
    /// Build a summary from the raw samples and the analysis result.
    pub fn new(
        samples: &[f32],
        duration_secs: f64,
        start_epoch_secs: Option<u64>,
        result: &AnalysisResult,
    ) -> Self {
        let average_decibels = if samples.is_empty() {
            0.0
        } else {
            samples.iter().sum::<f32>() / samples.len() as f32
        };
        let peak_decibels = samples.iter().copied().fold(0.0f32, f32::max);

        let snoring: Vec<&SoundEvent> = result
            .events
            .iter()
            .filter(|e| e.kind == SoundEventType::Snoring)
            .collect();
        let snoring_minutes = snoring.iter().map(|e| e.duration).sum::<f64>() / 60.0;

        Self {
            duration_secs,
            start_epoch_secs,
            average_decibels,
            peak_decibels,
            snore_score: result.snore_score,
            snoring_minutes,
            snoring_episodes: snoring.len(),
            event_count: result.events.len(),
            events: result.events.clone(),
        }
    }

    /// Headline category for the snore score
    pub fn score_category(&self) -> &'static str {
        score_category(self.snore_score)
    }

    /// Loudest non-silence event, if any
    pub fn loudest_event(&self) -> Option<&SoundEvent> {
        self.events
            .iter()
            .filter(|e| e.kind != SoundEventType::Silence)
            .max_by(|a, b| {
                a.peak_decibels
                    .partial_cmp(&b.peak_decibels)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Render the plain-text sleep report.
    pub fn render_text(&self) -> String {
        let mut report = format!(
            "Sleep Report\n\
             Duration: {}\n\
             Snore Score: {}/100 ({})\n\
             \n\
             Summary:\n\
             - Snoring: {:.1} minutes across {} episodes\n\
             - Peak volume: {} dB\n",
            format_duration(self.duration_secs),
            self.snore_score,
            self.score_category(),
            self.snoring_minutes,
            self.snoring_episodes,
            self.peak_decibels as i64,
        );

        if let Some(loudest) = self.loudest_event() {
            report.push_str(&format!(
                "- Loudest event: {} at {} ({} dB)\n",
                format_duration(loudest.duration),
                format_clock_time(self.start_epoch_secs, loudest.timestamp),
                loudest.peak_decibels as i64,
            ));
        }

        let timeline: Vec<&SoundEvent> = self
            .events
            .iter()
            .filter(|e| e.kind != SoundEventType::Silence)
            .collect();
        if !timeline.is_empty() {
            report.push_str("\nEvents:\n");
            for event in timeline {
                report.push_str(&format!(
                    "{} - {} ({}, {} dB)\n",
                    format_clock_time(self.start_epoch_secs, event.timestamp),
                    event.kind.display_name(),
                    format_duration(event.duration),
                    event.peak_decibels as i64,
                ));
            }
        }

        report.push_str("\nNote: this report is a heuristic summary, not a medical diagnosis.\n");
        report
    }
}

/// Category label for a snore score
pub fn score_category(score: u8) -> &'static str {
    match score {
        0..=30 => "Quiet",
        31..=60 => "Moderate",
        _ => "Loud",
    }
}

/// Format a duration in seconds as `42s`, `5m`, or `5m 30s`.
fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    if total < 60 {
        return format!("{}s", total);
    }
    let minutes = total / 60;
    let seconds = total % 60;
    if seconds == 0 {
        format!("{}m", minutes)
    } else {
        format!("{}m {}s", minutes, seconds)
    }
}

/// Format an event offset as a wall-clock time when the recording start is
/// known, or as an offset from start otherwise.
fn format_clock_time(start_epoch_secs: Option<u64>, offset_secs: f64) -> String {
    match start_epoch_secs {
        Some(start) => {
            let at = start + offset_secs.max(0.0) as u64;
            let secs_of_day = at % 86_400;
            format!("{:02}:{:02}", secs_of_day / 3_600, (secs_of_day % 3_600) / 60)
        }
        None => {
            let offset = offset_secs.max(0.0) as u64;
            format!("+{:02}:{:02}", offset / 3_600, (offset % 3_600) / 60)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SoundEventDetector;

    fn analyzed_night() -> (Vec<f32>, AnalysisResult) {
        let mut samples = vec![30.0f32; 1800];
        for i in 600..620 {
            samples[i] = if i % 2 == 0 { 45.0 } else { 38.0 };
        }
        samples[900] = 60.0;
        let result = SoundEventDetector::new().analyze(&samples, 1800.0);
        (samples, result)
    }

    #[test]
    fn test_score_category_boundaries() {
        assert_eq!(score_category(0), "Quiet");
        assert_eq!(score_category(30), "Quiet");
        assert_eq!(score_category(31), "Moderate");
        assert_eq!(score_category(60), "Moderate");
        assert_eq!(score_category(61), "Loud");
        assert_eq!(score_category(100), "Loud");
    }

    #[test]
    fn test_summary_aggregates_recording_statistics() {
        let (samples, result) = analyzed_night();
        let summary = RecordingSummary::new(&samples, 1800.0, None, &result);

        assert_eq!(summary.peak_decibels, 60.0);
        assert!(summary.average_decibels > 29.0 && summary.average_decibels < 32.0);
        assert_eq!(summary.snoring_episodes, 1);
        assert!((summary.snoring_minutes - 20.0 / 60.0).abs() < 1e-9);
        assert_eq!(summary.event_count, result.events.len());
    }

    #[test]
    fn test_loudest_event_ignores_silence() {
        let (samples, result) = analyzed_night();
        let summary = RecordingSummary::new(&samples, 1800.0, None, &result);

        let loudest = summary.loudest_event().expect("has loud events");
        assert_eq!(loudest.kind, SoundEventType::LoudSound);
        assert_eq!(loudest.peak_decibels, 60.0);
    }

    #[test]
    fn test_text_report_mentions_score_and_events() {
        let (samples, result) = analyzed_night();
        let summary = RecordingSummary::new(&samples, 1800.0, Some(22 * 3_600), &result);

        let text = summary.render_text();
        assert!(text.contains("Snore Score"));
        assert!(text.contains("Snoring"));
        assert!(text.contains("Loud Sound"));
        // 600s offset from a 22:00 start
        assert!(text.contains("22:10"));
        assert!(!text.contains("Silence"), "silence stays off the timeline");
    }

    #[test]
    fn test_clock_time_formats_without_start_reference() {
        assert_eq!(format_clock_time(None, 3_725.0), "+01:02");
        assert_eq!(format_clock_time(Some(0), 60.0), "00:01");
    }

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration(42.0), "42s");
        assert_eq!(format_duration(300.0), "5m");
        assert_eq!(format_duration(330.0), "5m 30s");
    }

    #[test]
    fn test_summary_roundtrips_through_json() {
        let (samples, result) = analyzed_night();
        let summary = RecordingSummary::new(&samples, 1800.0, None, &result);

        let json = serde_json::to_string(&summary).unwrap();
        let parsed: RecordingSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.snore_score, summary.snore_score);
        assert_eq!(parsed.events.len(), summary.events.len());
    }
}
