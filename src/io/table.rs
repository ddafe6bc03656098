/// Human-readable text tables: acceptance vs radius, and x projections

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::projection::ProjectionSeries;
use crate::sweep::RadiusSweep;
use crate::types::Length;

/// Round `value` to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

/// `<dataset>_YieldvRadius_<cx>_<cy>.txt`
pub fn acceptance_table_path(dataset: &Path, (cx, cy): (Length, Length)) -> PathBuf {
    with_suffix(dataset, &format!("_YieldvRadius_{cx}_{cy}.txt"))
}

/// `<dataset><suffix>`: `dataset` is a path without extension
pub fn with_suffix(dataset: &Path, suffix: &str) -> PathBuf {
    let mut name = dataset.as_os_str().to_os_string();
    name.push(suffix);
    name.into()
}

pub fn write_acceptance(sweep: &RadiusSweep, out: &mut impl Write) -> std::io::Result<()> {
    let (cx, cy) = sweep.centre;
    writeln!(out, "Window centred at x = {cx} mm and y = {cy} mm")?;
    writeln!(out)?;
    writeln!(out, " Radius (mm)\tAcceptance (%)")?;
    // `{:?}` keeps the `.0` on whole percentages: `100.0`, not `100`
    for record in &sweep.records {
        writeln!(out, "{}\t{:?}", record.radius, round_to(record.acceptance, 3))?;
    }
    Ok(())
}

pub fn write_projection(series: &ProjectionSeries, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "X (mm)\tCounts")?;
    for (x, n) in series {
        writeln!(out, "{x}\t{n}")?;
    }
    Ok(())
}

/// Create `path` and fill it with `fill`
pub fn write_file<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let inner = || -> std::io::Result<()> {
        let mut buf = BufWriter::new(File::create(path)?);
        fill(&mut buf)?;
        buf.flush()
    };
    inner().map_err(|e| Error::from(e).in_file(path))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
