use std::error::Error;
use clap::Parser;

use mwpc::config::{cli::RunArgs, Config};
use mwpc::grid::validate_ordering;
use mwpc::io::{d2t, table};
use mwpc::render::{PngRenderer, Renderer};
use mwpc::sample::{centre_on_detector, total_counts};
use mwpc::sweep::RadiusSweep;
use mwpc::utils::{group_digits, timing::Progress};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Cli::parse();
    let config = args.run.resolve()?;

    run(&config, args.no_plot).map_err(|e| {
        log::error!("{e}");
        e.into()
    })
}

fn run(config: &Config, no_plot: bool) -> mwpc::Result<()> {
    let mut progress = Progress::new();
    let infile = config.input_file();

    progress.start("Reading histogram");
    let mut samples = d2t::read(&infile)?;
    if samples.is_empty() { return Err(mwpc::Error::EmptyInput.in_file(&infile)) }
    if config.validate {
        validate_ordering(&samples).map_err(|e| e.in_file(&infile))?;
    }
    if config.centre_on_detector {
        let (dx, dy) = centre_on_detector(&mut samples);
        log::info!("Centred on detector: shifted by ({dx}, {dy}) mm");
    }
    let total = total_counts(&samples);
    progress.done();
    log::info!("Total counts: {}", group_digits(total));

    progress.start("Sweeping window radius");
    let centre = config.window.centre;
    let radius_of_interest = Some(config.window.radius)
        .filter(|r| r.fract() == 0.0 && *r >= 0.0)
        .map(|r| r as u32);
    let sweep = RadiusSweep::run(&samples, total, centre, config.sweep.max_radius, radius_of_interest);
    progress.done();

    if let Some(record) = sweep.flagged() {
        let line = record.transmission();
        log::info!("{line}");
        println!("{line}");
    }

    table::write_file(&table::acceptance_table_path(&config.dataset, centre),
                      |out| table::write_acceptance(&sweep, out))?;
    if !no_plot {
        PngRenderer::new(&config.dataset).acceptance(&sweep)?;
    }
    Ok(())
}

#[derive(Parser, Debug, Clone)]
#[clap(name = "acceptance", about = "Window acceptance as a function of window radius")]
pub struct Cli {

    #[clap(flatten)]
    run: RunArgs,

    /// Write the table only
    #[clap(long)]
    no_plot: bool,
}
