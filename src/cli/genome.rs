use std::path::PathBuf;

use clap::Args;

use crate::cli::{print_json_report, OutputFormat};
use crate::core::config::DatatypeConfig;
use crate::core::metadata::IndexMetadata;
use crate::core::types::Datatype;
use crate::gmapdb::genome::extract_genome_metadata;
use crate::render::summary::{render_summary_document, write_summary_document};

#[derive(Args)]
pub struct GenomeArgs {
    /// Extra-files directory holding `<db>/<db>.*`
    #[arg(required = true)]
    pub dir: PathBuf,

    /// Rewrite this primary file with the plain-text summary
    #[arg(long)]
    pub write_summary: Option<PathBuf>,
}

/// Execute genome subcommand
///
/// # Errors
///
/// Returns an error if extraction faults or the summary cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: GenomeArgs, format: OutputFormat, config: &DatatypeConfig) -> anyhow::Result<()> {
    let meta = extract_genome_metadata(&args.dir, config)?;

    if let Some(path) = &args.write_summary {
        write_summary_document(&meta, path)?;
    }

    match format {
        OutputFormat::Text => print!("{}", render_summary_document(&meta)),
        OutputFormat::Json => print_json_report(Datatype::GmapDb, &meta)?,
        OutputFormat::Tsv => print_tsv(&meta),
    }

    Ok(())
}

fn print_tsv(meta: &IndexMetadata) {
    println!("chrom\tlength\tcircular");
    for (name, length) in meta.chromosome_lengths() {
        let circular = meta.circular.iter().any(|c| c == name);
        println!("{name}\t{length}\t{circular}");
    }
}
