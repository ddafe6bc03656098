//! Reconstruction, projection and window acceptance of the 2D position
//! histograms written by the MWPC at the focal plane.

pub mod types;
pub mod error;
pub mod sample;
pub mod grid;
pub mod projection;
pub mod window;
pub mod sweep;
pub mod io;
pub mod config;
pub mod render;
pub mod utils;

pub use error::{Error, Result};
pub use sample::Sample;
pub use grid::{HistogramGrid, ReconstructOptions};
pub use window::Window;
pub use sweep::RadiusSweep;
