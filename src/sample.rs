//! One line of a d2t file, and coordinate shifts applied to whole files

use crate::types::{Count, Length};

/// A single `(x, y, count)` record of a flattened 2D histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: Length,
    pub y: Length,
    pub count: Count,
}

impl Sample {
    pub fn new(x: Length, y: Length, count: Count) -> Self { Self { x, y, count } }
}

impl From<(Length, Length, Count)> for Sample {
    fn from((x, y, count): (Length, Length, Count)) -> Self { Self { x, y, count } }
}

/// Sum of all counts: the denominator of every acceptance ratio.
pub fn total_counts(samples: &[Sample]) -> Count {
    samples.iter().map(|s| s.count).sum()
}

/// Midpoint of the range spanned by `values`, or `None` if there are none.
fn midpoint(values: impl Iterator<Item = Length>) -> Option<Length> {
    values
        .fold(None, |acc: Option<(Length, Length)>, v| match acc {
            None             => Some((v, v)),
            Some((lo, hi))   => Some((lo.min(v), hi.max(v))),
        })
        .map(|(lo, hi)| (lo + hi) / 2.0)
}

/// Shift all coordinates so that the midpoint of the observed x and y ranges
/// becomes the origin ("centre on detector"). Returns the `(dx, dy)` that was
/// subtracted.
///
/// The new midpoint is exactly zero when the range ends and their midpoint
/// are representable (integers, halves, quarters ...). Otherwise it is off
/// by rounding: one subtraction, so within a few ulps of the range ends
/// (x = {0.1, 0.7, 0.4} leaves 2.8e-17). Applying the shift a second time
/// moves by that remainder.
pub fn centre_on_detector(samples: &mut [Sample]) -> (Length, Length) {
    let dx = midpoint(samples.iter().map(|s| s.x)).unwrap_or(0.0);
    let dy = midpoint(samples.iter().map(|s| s.y)).unwrap_or(0.0);
    for s in samples.iter_mut() {
        s.x -= dx;
        s.y -= dy;
    }
    (dx, dy)
}
