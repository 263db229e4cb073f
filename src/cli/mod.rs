//! Command-line interface for gmap-datatypes.
//!
//! Each subcommand runs one host lifecycle hook against files on disk:
//!
//! - **genome**: set metadata for a `gmap_build` database directory
//! - **snp-index**: set metadata for a `snpindex` output directory
//! - **sniff**: check a file against an annotation grammar or registered datatype
//! - **stats**: count lines and annotations in an annotation file
//! - **peek**: produce the preview and blurb for any datatype
//!
//! ## Usage
//!
//! ```text
//! # Extract metadata and rewrite the primary file
//! gmap-datatypes genome extra_files/ --write-summary dataset.dat
//!
//! # Probe a file
//! gmap-datatypes sniff refGene.splicesites --kind splice-site
//!
//! # JSON output for scripting
//! gmap-datatypes stats snps.txt --format json
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::core::config::DatatypeConfig;
use crate::core::types::Datatype;

pub mod annotation;
pub mod genome;
pub mod peek;
pub mod snp_index;

#[derive(Parser)]
#[command(name = "gmap-datatypes")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Recognize and summarize GMAP/GSNAP index directories and annotation files")]
#[command(
    long_about = "gmap-datatypes runs the datatype hooks a data-management host calls for GMAP and GSNAP files.\n\nIt can:\n- Extract metadata from genome database and SNP index directories\n- Sniff interval, splice-site, intron, SNP and tally annotation files\n- Count annotations and render previews"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// JSON file overriding sniff, extraction and preview defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract metadata from a genome database directory
    Genome(genome::GenomeArgs),

    /// Extract metadata from a SNP index directory
    SnpIndex(snp_index::SnpIndexArgs),

    /// Check whether a file matches an annotation grammar
    Sniff(annotation::SniffArgs),

    /// Count lines and annotations in an annotation file
    Stats(annotation::StatsArgs),

    /// Render the preview shown for a dataset
    Peek(peek::PeekArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the config named by `--config`, or the defaults
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<DatatypeConfig> {
    match path {
        Some(path) => Ok(DatatypeConfig::load_from_file(path)?),
        None => Ok(DatatypeConfig::default()),
    }
}

/// Print a JSON report stamped with the datatype and generation time
pub(crate) fn print_json_report<T: Serialize>(
    datatype: Datatype,
    report: &T,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "datatype": datatype.file_ext(),
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "report": report,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
