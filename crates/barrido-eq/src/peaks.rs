//! Local-maximum detection for seeding the filter fitter.

/// Criteria a local maximum must meet to count as a peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakOptions {
    /// Minimum value a maximum must reach.
    pub min_height: f64,
    /// Minimum index spacing between reported peaks.
    pub min_distance: usize,
}

impl Default for PeakOptions {
    fn default() -> Self {
        Self {
            min_height: 0.0,
            min_distance: 1,
        }
    }
}

/// Indices of qualifying local maxima in `values`, tallest first.
///
/// A peak rises strictly from its left neighbor and falls strictly after
/// any flat top; flat tops report their midpoint. Candidates below
/// `min_height` are dropped, then peaks are kept greedily in descending
/// height order, skipping any candidate within `min_distance` of an
/// already-kept peak. The first and last samples never qualify.
pub fn find_peaks(values: &[f64], options: &PeakOptions) -> Vec<usize> {
    let n = values.len();
    if n < 3 {
        return Vec::new();
    }

    let mut candidates: Vec<usize> = Vec::new();
    let mut i = 1;
    while i < n - 1 {
        if values[i] > values[i - 1] {
            // Walk a flat top to its right edge.
            let mut j = i;
            while j + 1 < n && values[j + 1] == values[i] {
                j += 1;
            }
            if j + 1 < n && values[j + 1] < values[i] {
                candidates.push(i + (j - i) / 2);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }

    candidates.retain(|&c| values[c] >= options.min_height);
    candidates.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<usize> = Vec::new();
    for candidate in candidates {
        if kept
            .iter()
            .all(|&k| candidate.abs_diff(k) >= options.min_distance)
        {
            kept.push(candidate);
        }
    }
    kept
}
