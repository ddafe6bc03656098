/// Read / write the three-column `x y count` text histograms ("d2t" files)

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::sample::Sample;

/// Parse one `x y count` line. Anything after `#` is ignored; lines with
/// nothing left yield `Ok(None)`.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<Sample>> {
    let content = line.split('#').next().unwrap_or("");
    let fields = content.split_whitespace().collect::<Vec<_>>();
    if fields.is_empty() { return Ok(None) }

    let bad_line = || Error::Parse { line: line_number, text: line.trim().to_string() };
    if fields.len() != 3 { return Err(bad_line()) }

    let x     = fields[0].parse().map_err(|_| bad_line())?;
    let y     = fields[1].parse().map_err(|_| bad_line())?;
    let count = fields[2].parse().map_err(|_| bad_line())?;
    Ok(Some(Sample { x, y, count }))
}

/// Read all samples, in file order
pub fn read_samples(reader: impl BufRead) -> Result<Vec<Sample>> {
    let mut samples = vec![];
    for (n, line) in reader.lines().enumerate() {
        if let Some(sample) = parse_line(&line?, n + 1)? {
            samples.push(sample);
        }
    }
    Ok(samples)
}

/// Read a whole d2t file. Errors carry the file name.
pub fn read(path: &Path) -> Result<Vec<Sample>> {
    let inner = || -> Result<Vec<Sample>> {
        let file = File::open(path)?;
        let samples = read_samples(BufReader::new(file))?;
        log::info!("Read {} samples from {}", samples.len(), path.display());
        Ok(samples)
    };
    inner().map_err(|e| e.in_file(path))
}

pub fn write(samples: &[Sample], path: &Path) -> Result<()> {
    let mut buf = BufWriter::new(File::create(path)?);
    for Sample { x, y, count } in samples {
        writeln!(buf, "{x} {y} {count}")?;
    }
    buf.flush()?;
    Ok(())
}
