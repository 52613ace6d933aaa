// Rhythmic pattern detection - snoring vs. talking disambiguation
//
// Snoring shows an alternating peak/valley amplitude profile driven by the
// breathing cycle; speech amplitude is more irregular. The test counts
// strict local maxima above a small prominence threshold and strict local
// minima over the interior of the window.

/// Windows shorter than this cannot disprove rhythmicity and are treated
/// as rhythmic.
const MIN_WINDOW: usize = 4;

/// A peak must rise this far above baseline to count.
const PEAK_PROMINENCE_DB: f32 = 3.0;

/// Minimum alternation evidence: peaks with at least one valley between.
const MIN_PEAKS: usize = 2;
const MIN_VALLEYS: usize = 1;

/// Whether a sustained-region window shows a breathing-like alternating
/// amplitude pattern.
///
/// The first and last samples have no two-sided neighborhood and are
/// excluded. Peaks require strict inequality on both sides plus the
/// prominence threshold; valleys require only the strict inequalities.
pub fn is_rhythmic(window: &[f32], baseline: f32) -> bool {
    if window.len() < MIN_WINDOW {
        return true;
    }

    let threshold = baseline + PEAK_PROMINENCE_DB;
    let mut peaks = 0usize;
    let mut valleys = 0usize;

    for i in 1..window.len() - 1 {
        if window[i] > window[i - 1] && window[i] > window[i + 1] && window[i] > threshold {
            peaks += 1;
        }
        if window[i] < window[i - 1] && window[i] < window[i + 1] {
            valleys += 1;
        }
    }

    peaks >= MIN_PEAKS && valleys >= MIN_VALLEYS
}
