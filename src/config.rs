//! Run parameters: TOML files and command-line overrides

pub mod run;
pub mod cli;

pub use run::{Config, read_config_file};
