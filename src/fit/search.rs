//! Bounded one-dimensional minimum search.
//!
//! The decay fitter has a single parameter, so instead of a grid we narrow a
//! bracket by ternary partitioning. The iteration count depends only on the
//! bracket width and tolerance (39 rounds for `[0.01, 5.0]` at `1e-6`),
//! never on the data.

/// Search bracket and stopping width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRange {
    pub lower: f64,
    pub upper: f64,
    pub tolerance: f64,
}

/// Bracket for the cooling decay rate (per hour).
pub const DECAY_RATE_RANGE: SearchRange = SearchRange {
    lower: 0.01,
    upper: 5.0,
    tolerance: 1e-6,
};

/// Ternary search for the minimum of `f` over `range`.
///
/// Assumes `f` is unimodal on the bracket. When it is not, or the true
/// minimum lies outside, the result is simply some point inside the bracket.
/// Returns the midpoint of the final interval.
pub fn ternary_search_min<F>(range: SearchRange, mut f: F) -> f64
where
    F: FnMut(f64) -> f64,
{
    let mut left = range.lower;
    let mut right = range.upper;

    while right - left > range.tolerance {
        let third = (right - left) / 3.0;
        let mid1 = left + third;
        let mid2 = right - third;

        if f(mid1) > f(mid2) {
            left = mid1;
        } else {
            right = mid2;
        }
    }

    (left + right) / 2.0
}
