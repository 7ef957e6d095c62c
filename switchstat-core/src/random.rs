//! Uniform integer draws over any [`Rng`].
//!
//! The caller always provides the `rng` so that all the randomness of a
//! simulation comes from a single, seedable source owned by the
//! [`Simulation`]. Both bounds are inclusive.
//!
//! [`Simulation`]: crate::Simulation

use rand_core::Rng;

/// Draw a value uniformly in `low..=high`.
///
/// If `high <= low` the range is empty (or a single value) and `low` is
/// returned without consuming any randomness.
///
/// Uses the widening multiply technique with rejection so the result is
/// not biased toward the lower values of the range.
pub fn uniform_inclusive<R: Rng + ?Sized>(rng: &mut R, low: u64, high: u64) -> u64 {
    if high <= low {
        return low;
    }
    let range = high - low;
    if range == u64::MAX {
        return rng.next_u64();
    }

    let span = range + 1;
    let threshold = span.wrapping_neg() % span;
    loop {
        let m = u128::from(rng.next_u64()) * u128::from(span);
        if (m as u64) >= threshold {
            return low + (m >> 64) as u64;
        }
    }
}

/// Pick one element of `items` uniformly, `None` if `items` is empty.
pub fn choose<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    let last = items.len().checked_sub(1)?;
    let index = uniform_inclusive(rng, 0, last as u64) as usize;
    items.get(index)
}
