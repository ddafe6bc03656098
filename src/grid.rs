//! Reconstruction of a dense 2D count matrix from the flat d2t encoding
//!
//! The encoding is row-major with x varying slowest:
//!
//! `(x0,y0,n00), (x0,y1,n01), … (x0,yk,n0k), (x1,y0,n10), …`
//!
//! Bounds are taken from the first and last samples, the y step from the
//! first two, so the whole reconstruction hinges on that ordering. It is
//! checked by [`validate_ordering`] unless the caller opts out.

use itertools::Itertools;
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::types::{Count, Length};

/// Relative tolerance used when comparing bin steps
const STEP_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructOptions {
    /// Shift coordinates so that the midpoint of the grid is the origin
    pub centre_on_detector: bool,
    /// Reject samples that are not in row-major ascending order. Without
    /// this, misordered files produce a scrambled grid rather than an error.
    pub validate: bool,
}

impl Default for ReconstructOptions {
    fn default() -> Self { Self { centre_on_detector: false, validate: true } }
}

/// Dense histogram indexed `[row][col]` = `[y-index][x-index]`.
///
/// Row 0 holds the lowest y. Drawing it with y increasing upwards is the
/// renderer's business.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramGrid {
    pub counts: Array2<Count>,
    pub xlow : Length,
    pub xhigh: Length,
    pub ylow : Length,
    pub yhigh: Length,
    pub xstep: Length,
    pub ystep: Length,
}

impl HistogramGrid {
    /// Number of x bins (columns)
    pub fn xn(&self) -> usize { self.counts.ncols() }

    /// Number of y bins (rows)
    pub fn yn(&self) -> usize { self.counts.nrows() }

    /// Coordinates of the bin at `[row][col]`
    pub fn position(&self, row: usize, col: usize) -> (Length, Length) {
        (self.xlow + col as Length * self.xstep,
         self.ylow + row as Length * self.ystep)
    }

    /// `[xlow, xhigh, ylow, yhigh]`
    pub fn extent(&self) -> [Length; 4] {
        [self.xlow, self.xhigh, self.ylow, self.yhigh]
    }

    pub fn max_count(&self) -> Count {
        self.counts.iter().copied().fold(0.0, Count::max)
    }
}

/// Rebuild the 2D grid encoded by `samples`.
pub fn reconstruct(samples: &[Sample], options: ReconstructOptions) -> Result<HistogramGrid> {
    let total = samples.len();
    let (first, last) = match samples {
        []       => return Err(Error::EmptyInput),
        [_]      => return Err(Error::TooFewSamples { found: 1 }),
        [f, .., l] => (f, l),
    };

    if options.validate { validate_ordering(samples)? }

    let (mut xlow, mut xhigh) = (first.x, last.x);
    let (mut ylow, mut yhigh) = (first.y, last.y);

    if options.centre_on_detector {
        let xavg = (xlow + xhigh) / 2.0;
        let yavg = (ylow + yhigh) / 2.0;
        xlow -= xavg; xhigh -= xavg;
        ylow -= yavg; yhigh -= yavg;
    }

    let ystep = samples[1].y - samples[0].y;
    if ystep == 0.0 || !ystep.is_finite() {
        return Err(Error::DegenerateStep { step: ystep })
    }

    let intervals = (yhigh - ylow) / ystep;
    if !(intervals >= 0.0) {
        return Err(Error::MalformedOrdering {
            index: total - 1,
            reason: format!("last y ({}) lies before first y ({}) along the y step", last.y, first.y),
        })
    }
    if (intervals - intervals.round()).abs() > STEP_TOLERANCE * intervals.max(1.0) {
        log::warn!("y range {ylow}..{yhigh} is not a whole number of {ystep} steps ({intervals})");
    }
    // A y step that is tiny relative to the y range claims more rows than
    // there are samples
    let yn = (intervals.round() as usize).saturating_add(1);
    if yn > total {
        return Err(Error::Format { xn: 0, yn, total })
    }
    let xn = total / yn;

    if xn * yn != total {
        return Err(Error::Format { xn, yn, total })
    }

    let xstep = if xn > 1 { samples[yn].x - samples[0].x } else { 0.0 };
    log::debug!("x: {xlow} .. {xhigh} step {xstep} ({xn} bins)");
    log::debug!("y: {ylow} .. {yhigh} step {ystep} ({yn} bins)");

    // Counts arrive as [x][y]; store as [y][x]
    let counts: Vec<Count> = samples.iter().map(|s| s.count).collect();
    let counts = Array2::from_shape_vec((xn, yn), counts)
        .map_err(|_| Error::Format { xn, yn, total })?
        .reversed_axes()
        .as_standard_layout()
        .into_owned();

    Ok(HistogramGrid { counts, xlow, xhigh, ylow, yhigh, xstep, ystep })
}

/// Check that `samples` is row-major with x slow and y fast: x non-decreasing,
/// y strictly increasing by a uniform step within each x block, x blocks
/// uniformly spaced and all of the same length.
pub fn validate_ordering(samples: &[Sample]) -> Result<()> {
    let Some(first) = samples.first() else { return Err(Error::EmptyInput) };
    let malformed = |index, reason: String| Err(Error::MalformedOrdering { index, reason });
    let close = |a: f64, b: f64| (a - b).abs() <= STEP_TOLERANCE * a.abs().max(b.abs());

    let mut ystep: Option<f64> = None;
    let mut xstep: Option<f64> = None;
    let mut block_len: Option<usize> = None;
    let mut block_start = 0;

    for (i, (prev, this)) in samples.iter().tuple_windows().enumerate() {
        let index = i + 1;
        if this.x == prev.x {
            let dy = this.y - prev.y;
            if !(dy > 0.0) {
                return malformed(index, format!("y = {} does not increase within block x = {}", this.y, this.x))
            }
            match ystep {
                None                          => ystep = Some(dy),
                Some(step) if !close(dy, step) =>
                    return malformed(index, format!("y step {dy} differs from {step}")),
                _ => {}
            }
        } else if this.x > prev.x {
            let len = index - block_start;
            match block_len {
                None                      => block_len = Some(len),
                Some(n) if n != len       =>
                    return malformed(index, format!("x block {} has {len} samples, expected {n}", prev.x)),
                _ => {}
            }
            let dx = this.x - prev.x;
            match xstep {
                None                          => xstep = Some(dx),
                Some(step) if !close(dx, step) =>
                    return malformed(index, format!("x step {dx} differs from {step}")),
                _ => {}
            }
            if this.y != first.y {
                return malformed(index, format!("x block {} starts at y = {}, expected {}", this.x, this.y, first.y))
            }
            block_start = index;
        } else {
            return malformed(index, format!("x = {} decreases from {}", this.x, prev.x))
        }
    }

    let len = samples.len() - block_start;
    match block_len {
        Some(n) if n != len => malformed(samples.len() - 1, format!("last x block has {len} samples, expected {n}")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod test_reconstruct {
    use super::*;
    use float_eq::assert_float_eq;
    use ndarray::array;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use rstest::rstest;

    /// Flatten a `[y][x]` grid into d2t order (x slow, y fast)
    fn flatten(grid: &Array2<Count>, (x0, dx): (Length, Length), (y0, dy): (Length, Length)) -> Vec<Sample> {
        let (yn, xn) = grid.dim();
        itertools::iproduct!(0..xn, 0..yn)
            .map(|(col, row)| Sample::new(x0 + col as Length * dx,
                                          y0 + row as Length * dy,
                                          grid[[row, col]]))
            .collect()
    }

    fn six_samples() -> Vec<Sample> {
        vec![
            Sample::new(0.0, 0.0, 1.0),
            Sample::new(0.0, 1.0, 2.0),
            Sample::new(0.0, 2.0, 3.0),
            Sample::new(1.0, 0.0, 4.0),
            Sample::new(1.0, 1.0, 5.0),
            Sample::new(1.0, 2.0, 6.0),
        ]
    }

    #[test]
    fn two_by_three() -> Result<()> {
        let grid = reconstruct(&six_samples(), ReconstructOptions::default())?;
        assert_eq!((grid.xn(), grid.yn()), (2, 3));
        assert_eq!(grid.extent(), [0.0, 1.0, 0.0, 2.0]);
        assert_eq!((grid.xstep, grid.ystep), (1.0, 1.0));
        assert_eq!(grid.counts, array![[1.0, 4.0],
                                       [2.0, 5.0],
                                       [3.0, 6.0]]);
        Ok(())
    }

    #[test]
    fn positions_follow_steps() -> Result<()> {
        let grid = reconstruct(&six_samples(), ReconstructOptions::default())?;
        assert_eq!(grid.position(2, 1), (1.0, 2.0));
        assert_eq!(grid.position(0, 0), (0.0, 0.0));
        Ok(())
    }

    #[rstest(/**/ xn, yn, x0  ,  dx , y0   ,  dy ,
             case( 1,  2,  0.0,  1.0,  0.0 , 1.0 ),
             case( 3,  4, -4.5,  0.25, 2.0 , 0.25),
             case(10,  7, 80.0, 4.0 , -35.0, 5.0 ),
    )]
    fn roundtrip(xn: usize, yn: usize, x0: Length, dx: Length, y0: Length, dy: Length) {
        let original = Array2::from_shape_fn((yn, xn), |(row, col)| (row * 100 + col) as Count);
        let samples = flatten(&original, (x0, dx), (y0, dy));
        let grid = reconstruct(&samples, ReconstructOptions::default()).unwrap();
        assert_eq!(grid.counts, original);
        assert_float_eq!(grid.xlow , x0, abs <= 1e-9);
        assert_float_eq!(grid.ylow , y0, abs <= 1e-9);
        assert_float_eq!(grid.xhigh, x0 + (xn - 1) as Length * dx, abs <= 1e-9);
        assert_float_eq!(grid.yhigh, y0 + (yn - 1) as Length * dy, abs <= 1e-9);
    }

    #[test]
    fn missing_sample_is_a_format_error() {
        // 2 complete x blocks of 3, plus a lone sample whose y is the top row
        let mut samples = six_samples();
        samples.push(Sample::new(2.0, 2.0, 7.0));
        let options = ReconstructOptions { validate: false, ..Default::default() };
        match reconstruct(&samples, options) {
            Err(Error::Format { xn: 2, yn: 3, total: 7 }) => {},
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn tiny_y_step_is_a_format_error() {
        let samples = [
            Sample::new(0.0, 0.0    , 1.0),
            Sample::new(0.0, 1e-300 , 2.0),
            Sample::new(1.0, 1e10   , 3.0),
        ];
        let options = ReconstructOptions { validate: false, ..Default::default() };
        match reconstruct(&samples, options) {
            Err(Error::Format { xn: 0, yn: usize::MAX, total: 3 }) => {},
            other => panic!("expected format error, got {other:?}"),
        }
        // Many rows claimed, but finitely many
        let samples = [
            Sample::new(0.0, 0.0 , 1.0),
            Sample::new(0.0, 1e-3, 2.0),
            Sample::new(1.0, 1.0 , 3.0),
        ];
        assert!(matches!(reconstruct(&samples, options),
                         Err(Error::Format { xn: 0, yn: 1001, total: 3 })));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(reconstruct(&[], ReconstructOptions::default()), Err(Error::EmptyInput)));
    }

    #[test]
    fn single_sample_is_rejected() {
        let samples = [Sample::new(0.0, 0.0, 1.0)];
        assert!(matches!(reconstruct(&samples, ReconstructOptions::default()),
                         Err(Error::TooFewSamples { found: 1 })));
    }

    #[test]
    fn single_row_has_no_y_step() {
        let samples = [Sample::new(0.0, 0.0, 1.0), Sample::new(1.0, 0.0, 2.0)];
        assert!(matches!(reconstruct(&samples, ReconstructOptions::default()),
                         Err(Error::DegenerateStep { .. })));
    }

    #[test]
    fn centred_grid_is_symmetric_about_origin() -> Result<()> {
        let samples: Vec<_> = six_samples().into_iter()
            .map(|s| Sample::new(s.x + 10.0, s.y - 7.0, s.count))
            .collect();
        let options = ReconstructOptions { centre_on_detector: true, ..Default::default() };
        let grid = reconstruct(&samples, options)?;
        assert_eq!(grid.extent(), [-0.5, 0.5, -1.0, 1.0]);
        assert_eq!(grid.counts[[0, 1]], 4.0);
        Ok(())
    }

    #[test]
    fn misordered_file_passes_without_validation() -> Result<()> {
        // x blocks descending: wrong, but dimensions happen to be consistent
        let samples = vec![
            Sample::new(1.0, 0.0, 1.0),
            Sample::new(1.0, 1.0, 2.0),
            Sample::new(0.0, 0.0, 3.0),
            Sample::new(0.0, 1.0, 4.0),
        ];
        let unchecked = ReconstructOptions { validate: false, ..Default::default() };
        assert!(reconstruct(&samples, unchecked).is_ok());
        assert!(matches!(reconstruct(&samples, ReconstructOptions::default()),
                         Err(Error::MalformedOrdering { index: 2, .. })));
        Ok(())
    }

    // -------------------- Property: reconstruction inverts flattening -----------------
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn reconstruction_inverts_flattening(
            xn in 1..20_usize,
            yn in 2..20_usize,
            x0 in -100.0 .. 100.0_f64,
            y0 in -100.0 .. 100.0_f64,
            dx in 0.25 .. 5.0_f64,
            dy in 0.25 .. 5.0_f64,
        ) {
            let original = Array2::from_shape_fn((yn, xn), |(row, col)| (row * xn + col) as Count);
            let samples = flatten(&original, (x0, dx), (y0, dy));
            let grid = reconstruct(&samples, ReconstructOptions::default()).unwrap();
            prop_assert_eq!(grid.counts, original);
        }
    }
}
