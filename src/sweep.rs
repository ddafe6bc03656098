//! Window acceptance as a function of window radius

use crate::sample::Sample;
use crate::types::{Count, Length, RadiusMm, Ratio};
use crate::window::{sum_in_window, Window};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRecord {
    pub radius: RadiusMm,
    pub selected: Count,
    /// Acceptance in percent
    pub acceptance: Ratio,
}

impl SweepRecord {
    /// One-line summary reported for the radius of interest
    pub fn transmission(&self) -> String {
        format!("Transmission: {} % for a {} mm radius window.", self.acceptance, self.radius)
    }
}

/// Acceptance at every integer radius `0..=max_radius` around one centre.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusSweep {
    pub centre: (Length, Length),
    pub records: Vec<SweepRecord>,
    /// Radius the caller wants reported separately
    pub radius_of_interest: Option<RadiusMm>,
}

impl RadiusSweep {
    /// Evaluate the window at each radius. `total` is the sum of all counts.
    pub fn run(
        samples: &[Sample],
        total: Count,
        centre: (Length, Length),
        max_radius: RadiusMm,
        radius_of_interest: Option<RadiusMm>,
    ) -> Self {
        let records = (0..=max_radius)
            .map(|radius| {
                let window = Window::new(centre, radius as Length);
                let selection = sum_in_window(samples, total, &window);
                SweepRecord { radius, selected: selection.selected, acceptance: selection.ratio * 100.0 }
            })
            .collect();
        Self { centre, records, radius_of_interest }
    }

    /// The record at the radius of interest, if it lies within the sweep
    pub fn flagged(&self) -> Option<&SweepRecord> {
        let r = self.radius_of_interest?;
        self.records.iter().find(|rec| rec.radius == r)
    }

    /// `(radius, acceptance %)` pairs, for plotting
    pub fn curve(&self) -> impl Iterator<Item = (Length, Ratio)> + '_ {
        self.records.iter().map(|r| (r.radius as Length, r.acceptance))
    }
}
