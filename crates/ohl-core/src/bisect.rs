//! Bracket-halving root finder shared by the solver crates.

use crate::bounds::ITER_MAX;

/// Bisect `[lo, hi]` until the bracket is narrower than `tolerance`.
///
/// `keep_lower(mid)` decides which half survives: `true` keeps `[lo, mid]`,
/// `false` keeps `[mid, hi]`. The caller phrases its target comparison so
/// that the root always stays inside the surviving half. Returns the last
/// midpoint, or the bracket center when the bracket is already narrow
/// enough to skip iterating.
///
/// `on_limit` builds the caller's convergence error once [`ITER_MAX`] is
/// exceeded, which signals a mis-tuned tolerance or a target function the
/// bracket assumptions do not hold for.
pub fn bisect<E, P, L>(
    mut lo: f64,
    mut hi: f64,
    tolerance: f64,
    mut keep_lower: P,
    on_limit: L,
) -> Result<f64, E>
where
    P: FnMut(f64) -> Result<bool, E>,
    L: FnOnce(usize) -> E,
{
    let mut mid = 0.5 * (lo + hi);
    let mut count = 0usize;
    while (hi - lo) > tolerance {
        mid = 0.5 * (lo + hi);
        if keep_lower(mid)? {
            hi = mid;
        } else {
            lo = mid;
        }
        count += 1;
        if count > ITER_MAX {
            return Err(on_limit(ITER_MAX));
        }
    }
    Ok(mid)
}
