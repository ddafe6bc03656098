//! Counts inside a circular aperture placed over the detector plane

use crate::sample::Sample;
use crate::types::{Count, Length, Ratio};

/// A circle in detector-plane coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub centre_x: Length,
    pub centre_y: Length,
    pub radius  : Length,
}

impl Window {
    pub fn new((centre_x, centre_y): (Length, Length), radius: Length) -> Self {
        Self { centre_x, centre_y, radius }
    }

    /// Strictly inside: points on the rim are excluded, so a zero-radius
    /// window contains nothing, not even its own centre.
    pub fn contains(&self, x: Length, y: Length) -> bool {
        let (dx, dy) = (x - self.centre_x, y - self.centre_y);
        (dx * dx + dy * dy).sqrt() < self.radius
    }

    /// Same radius, centre moved to `(-centre_x + offset, centre_y)`
    pub fn mirrored(&self, offset: Length) -> Self {
        Self { centre_x: -self.centre_x + offset, ..*self }
    }

    /// `(left, right)` x extent of the window, as marked on projections
    pub fn x_edges(&self) -> (Length, Length) {
        (self.centre_x - self.radius, self.centre_x + self.radius)
    }
}

/// Counts selected by a window and their share of the whole histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub selected: Count,
    pub ratio   : Ratio,
}

/// Sum the counts of samples lying inside `window`.
///
/// `total` is the sum of all counts in the histogram: it is computed once by
/// the caller so that sweeping many radii does not re-sum the file.
pub fn sum_in_window(samples: &[Sample], total: Count, window: &Window) -> Selection {
    let selected: Count = samples.iter()
        .filter(|s| window.contains(s.x, s.y))
        .map(|s| s.count)
        .sum();
    Selection { selected, ratio: selected / total }
}
