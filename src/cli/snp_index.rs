use std::path::PathBuf;

use clap::Args;

use crate::cli::{print_json_report, OutputFormat};
use crate::core::types::Datatype;
use crate::gmapdb::snp_index::extract_snp_metadata;
use crate::render::summary::{render_snp_index_document, write_snp_index_document};

#[derive(Args)]
pub struct SnpIndexArgs {
    /// Extra-files directory holding `<db>.ref*3positions.<snp_tag>`
    #[arg(required = true)]
    pub dir: PathBuf,

    /// Rewrite this primary file with the HTML summary
    #[arg(long)]
    pub write_summary: Option<PathBuf>,
}

/// Execute snp-index subcommand
///
/// # Errors
///
/// Returns an error if extraction faults or the summary cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SnpIndexArgs, format: OutputFormat) -> anyhow::Result<()> {
    let meta = extract_snp_metadata(&args.dir)?;

    if let Some(path) = &args.write_summary {
        write_snp_index_document(&meta, path)?;
    }

    match format {
        OutputFormat::Text => print!("{}", render_snp_index_document(&meta)),
        OutputFormat::Json => print_json_report(Datatype::GmapSnpIndex, &meta)?,
        OutputFormat::Tsv => {
            println!("db_name\tsnps_name");
            println!("{}\t{}", meta.db_name, meta.snps_name);
        }
    }

    Ok(())
}
