// Baseline estimation - the ambient noise reference for a whole recording
//
// One global median is computed once per run and never updated mid-scan.
// Elevation everywhere in the pipeline means "sample minus this median";
// a recording with a drifting noise floor is measured against the same
// reference throughout.

/// Median loudness of the full sample sequence.
///
/// Sorts a copy and takes `sorted[len / 2]`. For even-length input this is
/// the upper of the two middle elements; exact median interpolation is not
/// required for this heuristic, so the tie-break is simply documented here.
///
/// Callers must not pass an empty slice; the detector short-circuits
/// degenerate input before estimating a baseline.
pub fn estimate(samples: &[f32]) -> f32 {
    debug_assert!(!samples.is_empty());

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted[sorted.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_of_odd_length_input() {
        assert_eq!(estimate(&[30.0, 50.0, 10.0]), 30.0);
    }

    #[test]
    fn test_median_of_even_length_takes_upper_middle() {
        // sorted: [10, 20, 30, 40] -> index 2
        assert_eq!(estimate(&[40.0, 10.0, 30.0, 20.0]), 30.0);
    }

    #[test]
    fn test_constant_input_median_is_that_value() {
        let samples = vec![33.5; 600];
        assert_eq!(estimate(&samples), 33.5);
    }

    #[test]
    fn test_outliers_do_not_move_the_median() {
        let mut samples = vec![30.0; 100];
        samples[10] = 90.0;
        samples[20] = 95.0;
        assert_eq!(estimate(&samples), 30.0);
    }
}
