//! Projection of a d2t histogram onto the x axis

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::types::{Count, Length};

/// `(x, total count over all y)`, one entry per run of equal x, in file order
pub type ProjectionSeries = Vec<(Length, Count)>;

/// Collapse `samples` onto x by summing counts over each maximal run of
/// consecutive samples sharing the same x.
///
/// In a row-major file every x block is contiguous, so this yields one entry
/// per distinct x. Runs are not merged if the same x reappears later.
pub fn project_x(samples: &[Sample]) -> Result<ProjectionSeries> {
    if samples.is_empty() { return Err(Error::EmptyInput) }
    let runs = samples.iter().group_by(|s| s.x);
    let series = (&runs).into_iter()
        .map(|(x, run)| (x, run.map(|s| s.count).sum()))
        .collect();
    Ok(series)
}

/// Sum of all projected counts
pub fn projected_total(series: &ProjectionSeries) -> Count {
    series.iter().map(|(_, n)| n).sum()
}

#[cfg(test)]
mod test_projection {
    use super::*;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use proptest::prelude::*;

    fn samples(triples: &[(Length, Length, Count)]) -> Vec<Sample> {
        triples.iter().copied().map(Sample::from).collect()
    }

    #[test]
    fn accumulates_each_x_block() -> Result<()> {
        let input = samples(&[
            (0.0, 1.0, 10.0), (0.0, 2.0, 20.0), (0.0, 3.0, 30.0),
            (1.0, 4.0, 40.0), (1.0, 5.0, 50.0),
        ]);
        assert_eq!(project_x(&input)?, vec![(0.0, 60.0), (1.0, 90.0)]);
        Ok(())
    }

    #[test]
    fn single_sample() -> Result<()> {
        assert_eq!(project_x(&samples(&[(4.5, 0.0, 3.0)]))?, vec![(4.5, 3.0)]);
        Ok(())
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(project_x(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn reappearing_x_starts_a_new_run() -> Result<()> {
        let input = samples(&[(0.0, 0.0, 1.0), (1.0, 0.0, 2.0), (0.0, 1.0, 4.0)]);
        assert_eq!(project_x(&input)?, vec![(0.0, 1.0), (1.0, 2.0), (0.0, 4.0)]);
        Ok(())
    }

    proptest! {
        #[test]
        fn projection_preserves_total(
            counts in proptest::collection::vec(0.0 .. 1000.0_f64, 1..100),
            block in 1..10_usize,
        ) {
            let input: Vec<_> = counts.iter().enumerate()
                .map(|(i, &n)| Sample::new((i / block) as Length, (i % block) as Length, n))
                .collect();
            let series = project_x(&input).unwrap();
            prop_assert_eq!(series.len(), (counts.len() + block - 1) / block);
            let total: Count = counts.iter().sum();
            prop_assert!((projected_total(&series) - total).abs() <= 1e-9 * total.max(1.0));
        }
    }
}
