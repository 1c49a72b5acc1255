//! Knight jumps.

use crate::square::Square;

use super::delta;

/// The eight (±1, ±2) / (±2, ±1) jumps. Nothing in between matters.
#[inline]
pub(super) fn knight_reaches(from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    matches!((df.abs(), dr.abs()), (1, 2) | (2, 1))
}
