// Silence detection - long quiet stretches of the night
//
// This is a second, independent linear scan over the entire sample
// sequence. It is not limited by where the elevated-region scan stopped: a
// quiet stretch interrupted by a consumed spike simply restarts the run
// count at the spike, so the two passes cannot produce conflicting spans.

use crate::analysis::{SoundEvent, SoundEventType};
use crate::config::DetectorConfig;

/// Find every maximal run of samples at or below `baseline +
/// silence_ceiling_db` lasting at least `min_silence_secs`.
///
/// The run in progress when input ends is closed and checked explicitly;
/// a night that trails off into quiet still reports its final silence.
pub fn scan(samples: &[f32], baseline: f32, config: &DetectorConfig) -> Vec<SoundEvent> {
    let ceiling = baseline + config.silence_ceiling_db;
    let mut events = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &sample) in samples.iter().enumerate() {
        if sample <= ceiling {
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else if let Some(start) = run_start.take() {
            push_if_long_enough(&mut events, start, i - start, baseline, ceiling, config);
        }
    }

    // Close the trailing run
    if let Some(start) = run_start {
        push_if_long_enough(
            &mut events,
            start,
            samples.len() - start,
            baseline,
            ceiling,
            config,
        );
    }

    events
}

fn push_if_long_enough(
    events: &mut Vec<SoundEvent>,
    start: usize,
    len: usize,
    baseline: f32,
    ceiling: f32,
    config: &DetectorConfig,
) {
    if (len as f64) >= config.min_silence_secs {
        events.push(SoundEvent {
            timestamp: start as f64,
            duration: len as f64,
            kind: SoundEventType::Silence,
            peak_decibels: ceiling,
            average_decibels: baseline,
        });
    }
}
