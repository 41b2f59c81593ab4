//! Rewrite a Quick5 table so canonical spellings never rank below their
//! `x`-prefixed alternates.
//!
//! The pipeline reads the table, runs the diagnostics pass, normalizes
//! weights and writes the result. The output file is only created after the
//! whole input parsed successfully.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use imtable_db::{LoadMode, TableFile};
use imtable_variants::{Diagnostics, DiagnosticsReport, NormalizeReport, normalize};
use tracing::info;

pub const DEFAULT_INPUT: &str = "quick5.txt";
pub const DEFAULT_OUTPUT: &str = "quick5.txt.new";

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub load_mode: LoadMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            load_mode: LoadMode::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RunSummary {
    pub rows: usize,
    pub duplicates: usize,
    pub normalize: NormalizeReport,
    pub diagnostics: DiagnosticsReport,
}

/// Read `config.input`, normalize it and write `config.output`.
pub fn improve(config: &Config, diagnostics: &Diagnostics) -> Result<RunSummary> {
    let start = Instant::now();
    let mut table = TableFile::load_with_mode(&config.input, config.load_mode)
        .with_context(|| format!("reading table {}", config.input.display()))?;

    let findings = diagnostics.run(table.store());
    let normalized = normalize(table.store_mut());

    table
        .write_to_path(&config.output)
        .with_context(|| format!("writing table {}", config.output.display()))?;

    let summary = RunSummary {
        rows: table.store().len(),
        duplicates: table.store().duplicate_count(),
        normalize: normalized,
        diagnostics: findings,
    };
    info!(
        "wrote {} rows ({} duplicates merged, {} demoted) in {} ms",
        summary.rows,
        summary.duplicates,
        summary.normalize.demoted,
        start.elapsed().as_millis()
    );
    Ok(summary)
}
