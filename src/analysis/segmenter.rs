// Elevated-region segmentation - the main forward scan
//
// A single cursor walks the sample sequence left to right and never
// revisits a sample once it has been consumed into a window or skipped.
// Two window shapes exist: a loud burst (sharp spike, hard-capped at a few
// samples) and a sustained region (longer elevation classified as snoring
// or talking via the rhythm test).
//
// The entry thresholds are stricter than the continuation thresholds, so a
// window can ride slightly below its trigger level without ending.

use crate::analysis::rhythm;
use crate::analysis::{SoundEvent, SoundEventType};
use crate::config::DetectorConfig;

/// Scan the sample sequence once and produce loud-sound, snoring, and
/// talking events. Silence is handled by an independent pass.
pub fn scan(samples: &[f32], baseline: f32, config: &DetectorConfig) -> Vec<SoundEvent> {
    let mut events = Vec::new();
    let mut i = 0usize;

    while i < samples.len() {
        let elevation = samples[i] - baseline;

        if elevation >= config.loud_entry_db {
            let end = extend_loud_burst(samples, baseline, i, config);
            events.push(make_event(
                samples,
                i,
                end,
                SoundEventType::LoudSound,
            ));
            i = end;
        } else if elevation >= config.sustained_entry_db {
            let end = extend_sustained_region(samples, baseline, i, config);
            let window = &samples[i..end];

            if window.len() >= config.min_sustained_samples {
                if let Some(kind) = classify_sustained(window, baseline, elevation, config) {
                    tracing::debug!(
                        start = i,
                        len = window.len(),
                        ?kind,
                        "classified sustained region"
                    );
                    events.push(make_event(samples, i, end, kind));
                }
            }
            i = end;
        } else {
            i += 1;
        }
    }

    events
}

/// Consume a short spike: the trigger sample plus at most
/// `loud_burst_max_samples - 1` followers still elevated past the
/// continuation threshold. Returns the exclusive end index.
fn extend_loud_burst(
    samples: &[f32],
    baseline: f32,
    start: usize,
    config: &DetectorConfig,
) -> usize {
    let mut end = start + 1;
    while end < samples.len()
        && end - start < config.loud_burst_max_samples
        && samples[end] - baseline >= config.loud_continue_db
    {
        end += 1;
    }
    end
}

/// Consume a sustained region: every sample from the trigger onward whose
/// elevation stays at or above the continuation threshold. Returns the
/// exclusive end index.
fn extend_sustained_region(
    samples: &[f32],
    baseline: f32,
    start: usize,
    config: &DetectorConfig,
) -> usize {
    let mut end = start;
    while end < samples.len() && samples[end] - baseline >= config.sustained_continue_db {
        end += 1;
    }
    end
}

/// Decide what a sustained region is, if anything.
///
/// Rhythmic regions up to the snoring cap are snoring. Short regions with
/// a strong enough entry elevation are talking. Anything longer than the
/// talking cap counts as snoring regardless of rhythm, so extended
/// irregular talking ends up labeled snoring. Regions that clear no rule
/// produce no event.
fn classify_sustained(
    window: &[f32],
    baseline: f32,
    entry_elevation: f32,
    config: &DetectorConfig,
) -> Option<SoundEventType> {
    let duration = window.len() as f64;
    let rhythmic = rhythm::is_rhythmic(window, baseline);

    if rhythmic && duration <= config.snoring_max_secs {
        Some(SoundEventType::Snoring)
    } else if duration <= config.talking_max_secs && entry_elevation >= config.talking_entry_db {
        Some(SoundEventType::Talking)
    } else if duration > config.talking_max_secs {
        Some(SoundEventType::Snoring)
    } else {
        None
    }
}

fn make_event(samples: &[f32], start: usize, end: usize, kind: SoundEventType) -> SoundEvent {
    let window = &samples[start..end];
    let peak = window.iter().copied().fold(f32::MIN, f32::max);
    let sum: f32 = window.iter().sum();
    let average = sum / window.len().max(1) as f32;

    SoundEvent {
        timestamp: start as f64,
        duration: window.len().max(1) as f64,
        kind,
        peak_decibels: peak,
        average_decibels: average,
    }
}
