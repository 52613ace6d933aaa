// Event merging - coalescing fragments of one continuous episode
//
// Detection naturally fragments an episode when loudness briefly dips:
// two snoring windows seconds apart are one episode to the user. A single
// left-to-right pass folds each event into the accumulated previous one
// when the type matches and the gap is small enough.

use crate::analysis::SoundEvent;

/// Merge adjacent same-type events whose gap is at most `gap_secs`.
///
/// Input must be sorted ascending by timestamp. The merged event keeps the
/// earlier timestamp, extends to the later end, takes the maximum peak,
/// and averages the two `average_decibels` values arithmetically; the
/// combined average is not duration-weighted.
///
/// The pass is not re-applied transitively, but chains still collapse:
/// each merge extends the accumulator's end, so a following event within
/// the gap of the new end folds in as well. Running the function on its
/// own output changes nothing, since all surviving gaps exceed `gap_secs`.
pub fn merge_adjacent(events: Vec<SoundEvent>, gap_secs: f64) -> Vec<SoundEvent> {
    let mut merged: Vec<SoundEvent> = Vec::with_capacity(events.len());

    for event in events {
        match merged.last_mut() {
            Some(last) if last.kind == event.kind && event.timestamp - last.end() <= gap_secs => {
                let new_end = last.end().max(event.end());
                last.duration = new_end - last.timestamp;
                last.peak_decibels = last.peak_decibels.max(event.peak_decibels);
                last.average_decibels = (last.average_decibels + event.average_decibels) / 2.0;
            }
            _ => merged.push(event),
        }
    }

    merged
}
