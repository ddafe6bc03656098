//! Error types for reading and reconstructing d2t histograms

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Derived grid dimensions do not account for every sample
    #[error("dimensions inconsistent with declared axis range: xn*yn = {xn}*{yn} = {} but file holds {total} samples; file does not encode a complete rectangular grid", .xn * .yn)]
    Format { xn: usize, yn: usize, total: usize },

    /// Samples are not in row-major (x slow, y fast) ascending order
    #[error("sample {index} breaks row-major ordering: {reason}")]
    MalformedOrdering { index: usize, reason: String },

    #[error("histogram contains no samples")]
    EmptyInput,

    /// A y step cannot be derived from fewer than two samples
    #[error("need at least 2 samples to derive the y step, found {found}")]
    TooFewSamples { found: usize },

    #[error("y step between first two samples is {step}: cannot derive grid rows")]
    DegenerateStep { step: f64 },

    #[error("line {line}: expected three numeric columns `x y count`, found `{text}`")]
    Parse { line: usize, text: String },

    #[error("no value given for `{0}`")]
    MissingParameter(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Any of the above, tagged with the file it concerns
    #[error("{}: {source}", .path.display())]
    InFile { path: PathBuf, #[source] source: Box<Error> },
}

impl Error {
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::InFile { path: path.into(), source: Box::new(self) }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
