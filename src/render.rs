//! PNG rendering of grids, projections and acceptance curves
//!
//! No axes, ticks or labels are drawn: the images are for a quick look, and
//! the text tables are the record.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::Result;
use crate::grid::HistogramGrid;
use crate::projection::ProjectionSeries;
use crate::sweep::RadiusSweep;
use crate::types::{Count, Length};
use crate::window::Window;

/// Consumer of the numeric products of a run
pub trait Renderer {
    /// Heat map of `grid` with `windows` drawn over it
    fn heatmap(&mut self, grid: &HistogramGrid, windows: &[Window]) -> Result<()>;
    /// Bar chart of `series` with the x extent of `windows` marked
    fn projection(&mut self, series: &ProjectionSeries, windows: &[Window]) -> Result<()>;
    /// Acceptance against window radius
    fn acceptance(&mut self, sweep: &RadiusSweep) -> Result<()>;
}

const WHITE     : Rgb<u8> = Rgb([255, 255, 255]);
const DIM_GREY  : Rgb<u8> = Rgb([105, 105, 105]);
const LIGHT_GREY: Rgb<u8> = Rgb([220, 220, 220]);
const GREEN     : Rgb<u8> = Rgb([ 44, 160,  44]);
const BLUE      : Rgb<u8> = Rgb([ 31, 119, 180]);

/// Opacity of the window disc drawn over heat maps
const WINDOW_ALPHA: f64 = 0.2;

/// Writes `<dataset>_map.png`, `<dataset>_projX.png` and
/// `<dataset>_multiradius.png`
pub struct PngRenderer<'a> {
    pub dataset: &'a Path,
    /// Counts at or above this are black; `None` means the grid maximum
    pub vmax: Option<Count>,
    pub pixels_per_bin: u32,
    /// Size of projection and acceptance plots
    pub plot_size: (u32, u32),
}

impl<'a> PngRenderer<'a> {
    pub fn new(dataset: &'a Path) -> Self {
        Self { dataset, vmax: None, pixels_per_bin: 4, plot_size: (800, 400) }
    }

    fn save(&self, image: &RgbImage, suffix: &str) -> Result<()> {
        let path = crate::io::table::with_suffix(self.dataset, suffix);
        image.save(&path).map_err(|e| crate::Error::from(e).in_file(&path))?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}

impl Renderer for PngRenderer<'_> {
    fn heatmap(&mut self, grid: &HistogramGrid, windows: &[Window]) -> Result<()> {
        let vmax = self.vmax.unwrap_or_else(|| grid.max_count());
        let image = heatmap_image(grid, vmax, windows, self.pixels_per_bin);
        self.save(&image, "_map.png")
    }

    fn projection(&mut self, series: &ProjectionSeries, windows: &[Window]) -> Result<()> {
        let image = projection_image(series, windows, self.plot_size);
        self.save(&image, "_projX.png")
    }

    fn acceptance(&mut self, sweep: &RadiusSweep) -> Result<()> {
        let image = acceptance_image(sweep, self.plot_size);
        self.save(&image, "_multiradius.png")
    }
}

/// Grey level for `count` on a white (0) to black (`vmax`) scale
fn grey(count: Count, vmax: Count) -> Rgb<u8> {
    let v = if vmax > 0.0 { (count / vmax).clamp(0.0, 1.0) } else { 0.0 };
    let level = (255.0 * (1.0 - v)).round() as u8;
    Rgb([level, level, level])
}

fn blend(under: Rgb<u8>, over: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - alpha) + b as f64 * alpha).round() as u8;
    Rgb([mix(under[0], over[0]), mix(under[1], over[1]), mix(under[2], over[2])])
}

/// Heat map with y increasing upwards: the bottom image row is grid row 0.
pub fn heatmap_image(grid: &HistogramGrid, vmax: Count, windows: &[Window], pixels_per_bin: u32) -> RgbImage {
    let ppb = pixels_per_bin.max(1);
    let (xn, yn) = (grid.xn() as u32, grid.yn() as u32);
    let (width, height) = (xn * ppb, yn * ppb);
    RgbImage::from_fn(width, height, |px, py| {
        let col = (px / ppb) as usize;
        let row = (yn - 1 - py / ppb) as usize;
        let mut colour = grey(grid.counts[[row, col]], vmax);
        // Position of pixel centre, in bins, relative to the centre of bin 0
        let fx = (px as f64 + 0.5) / ppb as f64 - 0.5;
        let fy = ((height - 1 - py) as f64 + 0.5) / ppb as f64 - 0.5;
        let x = grid.xlow + fx * grid.xstep;
        let y = grid.ylow + fy * grid.ystep;
        for window in windows {
            if window.contains(x, y) { colour = blend(colour, WHITE, WINDOW_ALPHA) }
        }
        colour
    })
}

/// Maps data coordinates onto pixel columns/rows of a plot
struct Frame {
    x: (Length, Length),
    y: (f64, f64),
    size: (u32, u32),
}

impl Frame {
    fn px(&self, x: Length) -> f64 {
        (x - self.x.0) / (self.x.1 - self.x.0) * (self.size.0 - 1) as f64
    }
    /// Pixel row: y increases upwards
    fn py(&self, y: f64) -> f64 {
        (1.0 - (y - self.y.0) / (self.y.1 - self.y.0)) * (self.size.1 - 1) as f64
    }
}

fn put(image: &mut RgbImage, x: f64, y: f64, colour: Rgb<u8>) {
    let (x, y) = (x.round(), y.round());
    if x >= 0.0 && y >= 0.0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, colour);
    }
}

fn vertical_line(image: &mut RgbImage, x: f64, colour: Rgb<u8>, thickness: i32) {
    for dx in -(thickness / 2)..=(thickness / 2) {
        for y in 0..image.height() {
            put(image, x + dx as f64, y as f64, colour);
        }
    }
}

fn segment(image: &mut RgbImage, (x0, y0): (f64, f64), (x1, y1): (f64, f64), colour: Rgb<u8>) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        put(image, x0 + t * (x1 - x0), y0 + t * (y1 - y0), colour);
        put(image, x0 + t * (x1 - x0), y0 + t * (y1 - y0) + 1.0, colour);
    }
}

/// Bar chart of a projection, bars as wide as the x step
pub fn projection_image(series: &ProjectionSeries, windows: &[Window], size: (u32, u32)) -> RgbImage {
    let mut image = RgbImage::from_pixel(size.0.max(2), size.1.max(2), WHITE);
    if series.is_empty() { return image }

    let width = series.windows(2).map(|w| (w[1].0 - w[0].0).abs()).fold(Length::INFINITY, Length::min);
    let width = if width.is_finite() && width > 0.0 { width } else { 1.0 };
    let xmin = series.iter().map(|p| p.0).fold(Length::INFINITY, Length::min) - width / 2.0;
    let xmax = series.iter().map(|p| p.0).fold(Length::NEG_INFINITY, Length::max) + width / 2.0;
    let nmax = series.iter().map(|p| p.1).fold(0.0, Count::max);
    let frame = Frame { x: (xmin, xmax), y: (0.0, if nmax > 0.0 { nmax * 1.05 } else { 1.0 }), size: image.dimensions() };

    for &(x, n) in series {
        let left  = frame.px(x - width / 2.0).ceil()  as i64;
        let right = frame.px(x + width / 2.0).floor() as i64;
        let top   = frame.py(n.max(0.0)).round() as i64;
        for px in left..right.max(left + 1) {
            for py in top..image.height() as i64 {
                put(&mut image, px as f64, py as f64, DIM_GREY);
            }
        }
    }
    for window in windows {
        let (lo, hi) = window.x_edges();
        vertical_line(&mut image, frame.px(lo), GREEN, 5);
        vertical_line(&mut image, frame.px(hi), GREEN, 5);
    }
    image
}

/// Acceptance (0 to 100 %) against radius, on a grid with lines every 10
pub fn acceptance_image(sweep: &RadiusSweep, size: (u32, u32)) -> RgbImage {
    let mut image = RgbImage::from_pixel(size.0.max(2), size.1.max(2), WHITE);
    let rmax = sweep.records.last().map_or(1.0, |r| (r.radius as f64).max(1.0));
    let frame = Frame { x: (0.0, rmax), y: (0.0, 100.0), size: image.dimensions() };

    let right = (image.width() - 1) as f64;
    for level in (0..=100).step_by(10) {
        let y = frame.py(level as f64);
        segment(&mut image, (0.0, y), (right, y), LIGHT_GREY);
    }
    for r in (0..=rmax as u32).step_by(10) {
        vertical_line(&mut image, frame.px(r as f64), LIGHT_GREY, 1);
    }

    let points: Vec<_> = sweep.curve().map(|(r, a)| (frame.px(r), frame.py(a))).collect();
    for pair in points.windows(2) {
        segment(&mut image, pair[0], pair[1], BLUE);
    }
    image
}
