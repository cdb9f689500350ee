//! Sigma assignment for extracted ring sets.

use crate::contour::Contour;
use crate::levels::N_SIGMA_LEVELS;
use crate::trace::RingSet;
use tracing::warn;

/// Map the traced ring sets onto sigma confidence levels.
///
/// The tracer packs non-empty ring sets from index 0 (loosest level first)
/// and leaves trailing entries empty, so with k non-empty sets the entry at
/// index k-1 is the tightest level present. Counting the empty sets and
/// walking the array from the top assigns sigma `5 - n_empty - ic` to each
/// non-empty entry: the resulting collection is ordered ascending in sigma,
/// index 0 = tightest level present.
pub fn assign(ring_sets: [RingSet; N_SIGMA_LEVELS]) -> Vec<Contour> {
    let n_empty = ring_sets.iter().filter(|set| set.is_empty()).count();

    let mut sets = ring_sets;
    let mut contours = Vec::with_capacity(N_SIGMA_LEVELS - n_empty);
    for ic in (0..N_SIGMA_LEVELS).rev() {
        if sets[ic].is_empty() {
            continue;
        }
        let sigma = N_SIGMA_LEVELS as i64 - n_empty as i64 - ic as i64;
        if !(1..=N_SIGMA_LEVELS as i64).contains(&sigma) {
            // only reachable when empty sets sit between non-empty ones,
            // which the tracer's packed output never produces
            warn!(index = ic, sigma, "skipping ring set with out-of-range sigma");
            continue;
        }
        let rings = std::mem::take(&mut sets[ic]);
        contours.push(Contour::new(rings, sigma as u8));
    }
    contours
}
