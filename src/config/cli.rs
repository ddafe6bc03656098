//! Command-line arguments shared by the executables

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::{Length, RadiusMm};
use crate::utils::parse_pair;

use super::run::{read_config_file, Config};

/// Where the run parameters come from: an optional TOML file, overridden by
/// whatever is given on the command line.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// d2t file name without extension; outputs are named after it
    pub dataset: Option<PathBuf>,

    /// TOML file with run parameters
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Window centre in mm, as `x,y`
    #[clap(short = 'w', long, value_parser = parse_pair::<Length>, allow_hyphen_values = true)]
    pub centre: Option<(Length, Length)>,

    /// Window radius in mm
    #[clap(short, long)]
    pub radius: Option<Length>,

    /// Largest radius of the acceptance sweep, in mm
    #[clap(short, long)]
    pub max_radius: Option<RadiusMm>,

    /// Put the origin at the middle of the detector
    #[clap(long)]
    pub centre_on_detector: bool,

    /// Trust the file ordering instead of checking it
    #[clap(long)]
    pub no_validate: bool,
}

impl RunArgs {

    /// Merge file and command-line settings
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match (&self.config, &self.dataset) {
            (Some(path), _)    => read_config_file(path)?,
            (None, Some(name)) => Config::new(name),
            (None, None)       => return Err(Error::MissingParameter("dataset")),
        };
        if let Some(dataset) = &self.dataset  { config.dataset = dataset.clone() }
        if let Some(centre)  = self.centre     { config.window.centre = centre }
        if let Some(radius)  = self.radius     { config.window.radius = radius }
        if let Some(max)     = self.max_radius { config.sweep.max_radius = max }
        if self.centre_on_detector { config.centre_on_detector = true }
        if self.no_validate        { config.validate = false }
        log::debug!("{config:?}");
        Ok(config)
    }
}
