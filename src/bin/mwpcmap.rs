use std::error::Error;
use clap::Parser;

use mwpc::config::{cli::RunArgs, Config};
use mwpc::grid::reconstruct;
use mwpc::io::{d2t, table};
use mwpc::projection::project_x;
use mwpc::render::{PngRenderer, Renderer};
use mwpc::types::{Count, Length};
use mwpc::utils::timing::Progress;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Cli::parse();
    let mut config = args.run.resolve()?;
    if args.vmax.is_some()   { config.render.vmax = args.vmax }
    if args.mirror.is_some() { config.render.mirror_offset = args.mirror }

    run(&config).map_err(|e| {
        log::error!("{e}");
        e.into()
    })
}

fn run(config: &Config) -> mwpc::Result<()> {
    let mut progress = Progress::new();
    let infile = config.input_file();

    progress.start("Reading histogram");
    let samples = d2t::read(&infile)?;
    progress.done();

    progress.start("Reconstructing grid");
    let grid = reconstruct(&samples, config.reconstruct_options()).map_err(|e| e.in_file(&infile))?;
    let series = project_x(&samples).map_err(|e| e.in_file(&infile))?;
    progress.done();
    println!("{}: {} x {} bins, x {} .. {} mm, y {} .. {} mm",
             infile.display(), grid.xn(), grid.yn(), grid.xlow, grid.xhigh, grid.ylow, grid.yhigh);

    let window = config.window();
    let mut windows = vec![window];
    if let Some(offset) = config.render.mirror_offset {
        windows.push(window.mirrored(offset));
    }

    // The projection is taken from the file coordinates; shift it to match
    // the grid when centring on the detector.
    let series: Vec<(Length, Count)> = if config.centre_on_detector {
        let shift = grid.xlow - samples[0].x;
        series.into_iter().map(|(x, n)| (x + shift, n)).collect()
    } else {
        series
    };

    progress.start("Rendering");
    let mut renderer = PngRenderer {
        vmax: config.render.vmax,
        pixels_per_bin: config.render.pixels_per_bin,
        ..PngRenderer::new(&config.dataset)
    };
    renderer.heatmap(&grid, &windows)?;
    renderer.projection(&series, &windows)?;
    table::write_file(&table::with_suffix(&config.dataset, "_projX.txt"),
                      |out| table::write_projection(&series, out))?;
    progress.done();
    Ok(())
}

#[derive(Parser, Debug, Clone)]
#[clap(name = "mwpcmap", about = "Draw an MWPC position histogram with its x projection and window")]
pub struct Cli {

    #[clap(flatten)]
    run: RunArgs,

    /// Counts drawn at full intensity (default: largest count)
    #[clap(long)]
    vmax: Option<Count>,

    /// Also draw the window mirrored to (-x + OFFSET, y)
    #[clap(long, value_name = "OFFSET", allow_hyphen_values = true)]
    mirror: Option<Length>,
}
