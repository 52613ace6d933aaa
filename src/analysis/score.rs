// Snore score - one number for the whole night
//
// Three weighted components: how much of the night was spent snoring, how
// loud the snoring was relative to the ambient baseline, and how many
// distinct episodes occurred. The score is a heuristic engagement metric,
// not a clinical measurement.

use crate::analysis::{SoundEvent, SoundEventType};

/// Coverage earns its full 40 points at 30% of the night.
const COVERAGE_WEIGHT: f64 = 40.0;
const COVERAGE_FULL_AT: f64 = 0.3;

/// Intensity earns its full 30 points at 20 dB above baseline.
const INTENSITY_WEIGHT: f64 = 30.0;
const INTENSITY_FULL_AT_DB: f64 = 20.0;

/// Frequency earns its full 30 points at 20 distinct episodes.
const FREQUENCY_WEIGHT: f64 = 30.0;
const FREQUENCY_FULL_AT: f64 = 20.0;

/// Compute the 0-100 snore score for a merged event list.
///
/// Returns 0 when there are no snoring events or the recording duration is
/// not positive. Components are summed, clamped to [0, 100], and truncated
/// to an integer.
pub fn snore_score(events: &[SoundEvent], baseline: f32, recording_duration: f64) -> u8 {
    let snoring: Vec<&SoundEvent> = events
        .iter()
        .filter(|e| e.kind == SoundEventType::Snoring)
        .collect();

    if snoring.is_empty() || recording_duration <= 0.0 {
        return 0;
    }

    let total_snoring: f64 = snoring.iter().map(|e| e.duration).sum();
    let coverage = total_snoring / recording_duration;
    let coverage_points = (coverage / COVERAGE_FULL_AT).min(1.0) * COVERAGE_WEIGHT;

    let mean_intensity = snoring
        .iter()
        .map(|e| (e.average_decibels - baseline) as f64)
        .sum::<f64>()
        / snoring.len() as f64;
    let intensity_points = (mean_intensity / INTENSITY_FULL_AT_DB).min(1.0) * INTENSITY_WEIGHT;

    let frequency_points = (snoring.len() as f64 / FREQUENCY_FULL_AT).min(1.0) * FREQUENCY_WEIGHT;

    let raw = coverage_points + intensity_points + frequency_points;
    tracing::debug!(
        coverage_points,
        intensity_points,
        frequency_points,
        "snore score components"
    );

    raw.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snoring(timestamp: f64, duration: f64, avg: f32) -> SoundEvent {
        SoundEvent {
            timestamp,
            duration,
            kind: SoundEventType::Snoring,
            peak_decibels: avg + 5.0,
            average_decibels: avg,
        }
    }

    #[test]
    fn test_no_snoring_events_scores_zero() {
        let events = vec![SoundEvent {
            timestamp: 0.0,
            duration: 600.0,
            kind: SoundEventType::Silence,
            peak_decibels: 32.0,
            average_decibels: 30.0,
        }];

        assert_eq!(snore_score(&events, 30.0, 600.0), 0);
    }

    #[test]
    fn test_zero_duration_recording_scores_zero() {
        let events = vec![snoring(0.0, 10.0, 45.0)];
        assert_eq!(snore_score(&events, 30.0, 0.0), 0);
    }

    #[test]
    fn test_saturated_components_cap_at_100() {
        // 20 episodes covering 40% of the night at 25 dB above baseline:
        // every component is at its maximum
        let events: Vec<SoundEvent> = (0..20)
            .map(|i| snoring(i as f64 * 50.0, 20.0, 55.0))
            .collect();

        assert_eq!(snore_score(&events, 30.0, 1000.0), 100);
    }

    #[test]
    fn test_single_light_episode_scores_low_but_nonzero() {
        // 20s of snoring at 11.5 dB above baseline in a 30-minute night:
        // 40*(20/1800)/0.3 + 30*11.5/20 + 30*1/20 = 1.48 + 17.25 + 1.5
        let events = vec![snoring(600.0, 20.0, 41.5)];

        assert_eq!(snore_score(&events, 30.0, 1800.0), 20);
    }

    #[test]
    fn test_score_stays_in_bounds_with_quiet_snoring() {
        // Average below baseline drives the intensity component negative;
        // the final clamp still keeps the score non-negative
        let events = vec![snoring(0.0, 5.0, 20.0)];

        let score = snore_score(&events, 30.0, 600.0);
        assert!(score <= 100);
    }

    #[test]
    fn test_more_episodes_score_higher() {
        let one = vec![snoring(0.0, 30.0, 45.0)];
        let many: Vec<SoundEvent> = (0..10)
            .map(|i| snoring(i as f64 * 60.0, 3.0, 45.0))
            .collect();

        let single = snore_score(&one, 30.0, 3600.0);
        let repeated = snore_score(&many, 30.0, 3600.0);
        assert!(repeated > single);
    }
}
