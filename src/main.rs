use clap::Parser;
use tracing_subscriber::EnvFilter;

use gmap_datatypes::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("gmap_datatypes=debug,info")
    } else {
        EnvFilter::new("gmap_datatypes=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Genome(args) => {
            cli::genome::run(args, cli.format, &config)?;
        }
        cli::Commands::SnpIndex(args) => {
            cli::snp_index::run(args, cli.format)?;
        }
        cli::Commands::Sniff(args) => {
            cli::annotation::run_sniff(args, cli.format, &config)?;
        }
        cli::Commands::Stats(args) => {
            cli::annotation::run_stats(args, cli.format)?;
        }
        cli::Commands::Peek(args) => {
            cli::peek::run(args, cli.format, &config)?;
        }
    }

    Ok(())
}
