//! CLI command implementations
//!
//! Commands are organized by pipeline stage:
//! - `clean` - Normalize/validate a raw export into the canonical table
//! - `analyze` - Build the five report tables from a canonical table
//! - `run` - Both stages end to end

pub mod analyze;
pub mod clean;
pub mod run;

// Re-export command functions for main.rs
pub use analyze::*;
pub use clean::*;
pub use run::*;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};

/// Open an input file with a readable error on failure.
pub fn open_input(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))
}

/// Create an output file (buffered) with a readable error on failure.
pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}
