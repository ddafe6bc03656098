//! Configuration file parser for window acceptance runs

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::grid::ReconstructOptions;
use crate::types::{Length, RadiusMm};
use crate::window::Window;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// Path of the d2t file without its `.d2t` extension. Outputs are named
    /// after it.
    pub dataset: PathBuf,

    /// Shift coordinates so that the middle of the detector is the origin
    #[serde(default)]
    pub centre_on_detector: bool,

    /// Reject files that are not in row-major ascending order
    #[serde(default = "default_validate")]
    pub validate: bool,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub sweep: SweepConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    /// Window centre `[x, y]` in mm
    #[serde(default)]
    pub centre: (Length, Length),

    /// Window radius in mm
    #[serde(default = "default_radius")]
    pub radius: Length,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Largest radius in the acceptance sweep, in mm
    #[serde(default = "default_max_radius")]
    pub max_radius: RadiusMm,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Counts at or above this are drawn at full intensity. Defaults to the
    /// largest count in the grid.
    #[serde(default)]
    pub vmax: Option<f64>,

    /// Draw a second window at `(-centre_x + offset, centre_y)`
    #[serde(default)]
    pub mirror_offset: Option<Length>,

    /// Side of one histogram bin in the rendered image, in pixels
    #[serde(default = "default_pixels_per_bin")]
    pub pixels_per_bin: u32,
}

fn default_validate      () -> bool     { true }
fn default_radius        () -> Length   { 32.0 }
fn default_max_radius    () -> RadiusMm { 40 }
fn default_pixels_per_bin() -> u32      { 4 }

impl Default for WindowConfig {
    fn default() -> Self { Self { centre: (0.0, 0.0), radius: default_radius() } }
}

impl Default for SweepConfig {
    fn default() -> Self { Self { max_radius: default_max_radius() } }
}

impl Default for RenderConfig {
    fn default() -> Self { Self { vmax: None, mirror_offset: None, pixels_per_bin: default_pixels_per_bin() } }
}

impl Config {
    /// All settings at their defaults, for `dataset`
    pub fn new(dataset: impl Into<PathBuf>) -> Self {
        Self {
            dataset: dataset.into(),
            centre_on_detector: false,
            validate: default_validate(),
            window: Default::default(),
            sweep: Default::default(),
            render: Default::default(),
        }
    }

    pub fn reconstruct_options(&self) -> ReconstructOptions {
        ReconstructOptions { centre_on_detector: self.centre_on_detector, validate: self.validate }
    }

    pub fn window(&self) -> Window {
        Window::new(self.window.centre, self.window.radius)
    }

    /// The d2t input file
    pub fn input_file(&self) -> PathBuf {
        crate::io::table::with_suffix(&self.dataset, ".d2t")
    }
}

pub fn read_config_file(path: &Path) -> Result<Config> {
    let inner = || -> Result<Config> {
        let config = fs::read_to_string(path)?;
        Ok(toml::from_str(&config)?)
    };
    inner().map_err(|e| e.in_file(path))
}

pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(Error::from)
}
