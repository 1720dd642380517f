#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use super::normalize::token_set;

/// Jaccard index of two token sequences, treated as sets.
///
/// Returns `0.0` when either side is empty, so the result is always within
/// `[0, 1]`.
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    let a = token_set(a);
    let b = token_set(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    intersection as f64 / union as f64
}
