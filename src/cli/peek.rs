use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Args;

use crate::cli::{print_json_report, OutputFormat};
use crate::core::config::DatatypeConfig;
use crate::core::types::Datatype;
use crate::render::preview::preview_dataset;

#[derive(Args)]
pub struct PeekArgs {
    /// Data file, or extra-files directory for gmapdb/gmapsnpindex
    #[arg(required = true)]
    pub input: PathBuf,

    /// Registered datatype extension (e.g. gmapdb, gmap_snps, splicesites.iit)
    #[arg(short, long)]
    pub datatype: String,

    /// Treat the dataset as purged from disk
    #[arg(long)]
    pub purged: bool,
}

/// Execute peek subcommand
///
/// # Errors
///
/// Returns an error for an unknown datatype or if the dataset cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PeekArgs, format: OutputFormat, config: &DatatypeConfig) -> anyhow::Result<()> {
    let datatype = Datatype::from_extension(&args.datatype)
        .ok_or_else(|| anyhow!("Unknown datatype '{}'", args.datatype))?;

    if datatype.is_composite() && !args.purged && !args.input.is_dir() {
        bail!(
            "{datatype} datasets are read from their extra-files directory, got {}",
            args.input.display()
        );
    }

    let preview = preview_dataset(datatype, &args.input, args.purged, config)?;

    match format {
        OutputFormat::Text => {
            println!("{}", preview.peek);
            println!("{}", preview.blurb);
        }
        OutputFormat::Json => print_json_report(datatype, &preview)?,
        OutputFormat::Tsv => {
            println!("blurb\tpeek");
            println!("{}\t{}", preview.blurb, preview.peek.replace('\n', "\\n"));
        }
    }

    Ok(())
}
