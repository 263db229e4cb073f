use std::path::PathBuf;

use anyhow::anyhow;
use clap::Args;

use crate::cli::{print_json_report, OutputFormat};
use crate::core::config::DatatypeConfig;
use crate::core::types::{AnnotationKind, Datatype};
use crate::parsing::annotation::compute_annotation_stats;

#[derive(Args)]
pub struct SniffArgs {
    /// File to probe
    #[arg(required = true)]
    pub input: PathBuf,

    /// Annotation grammar to check against
    #[arg(short, long, value_enum, required_unless_present = "datatype")]
    pub kind: Option<AnnotationKind>,

    /// Any registered datatype extension (e.g. gmapdb, gmap_snps, tally.iit)
    #[arg(short, long, conflicts_with = "kind")]
    pub datatype: Option<String>,
}

impl SniffArgs {
    fn resolve_datatype(&self) -> anyhow::Result<Datatype> {
        match (&self.datatype, self.kind) {
            (Some(ext), _) => {
                Datatype::from_extension(ext).ok_or_else(|| anyhow!("Unknown datatype '{ext}'"))
            }
            (None, Some(kind)) => Ok(Datatype::Annotation(kind)),
            (None, None) => Err(anyhow!("Either --kind or --datatype is required")),
        }
    }
}

#[derive(Args)]
pub struct StatsArgs {
    /// Annotation file (plain or gzip compressed)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Datatype to report the statistics under
    #[arg(short, long, value_enum, default_value = "interval")]
    pub kind: AnnotationKind,
}

/// Execute sniff subcommand; a non-match is a normal result, not an error
///
/// # Errors
///
/// Returns an error for an unknown datatype or if the result cannot be serialized.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run_sniff(
    args: SniffArgs,
    format: OutputFormat,
    config: &DatatypeConfig,
) -> anyhow::Result<()> {
    let datatype = args.resolve_datatype()?;
    let matches = datatype.sniff(&args.input, config);

    match format {
        OutputFormat::Text => println!("{matches}"),
        OutputFormat::Json => {
            let report = serde_json::json!({
                "path": args.input.display().to_string(),
                "matches": matches,
            });
            print_json_report(datatype, &report)?;
        }
        OutputFormat::Tsv => println!("{}\t{datatype}\t{matches}", args.input.display()),
    }

    Ok(())
}

/// Execute stats subcommand
///
/// # Errors
///
/// Returns an error if the file cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run_stats(args: StatsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let stats = compute_annotation_stats(&args.input)?;

    match format {
        OutputFormat::Text => {
            println!("data_lines: {}", stats.data_lines);
            println!("annotations: {}", stats.annotations);
        }
        OutputFormat::Json => print_json_report(Datatype::Annotation(args.kind), &stats)?,
        OutputFormat::Tsv => {
            println!("data_lines\tannotations");
            println!("{}\t{}", stats.data_lines, stats.annotations);
        }
    }

    Ok(())
}
