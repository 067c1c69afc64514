use clap::Parser;
use tracing_subscriber::EnvFilter;

use locus_splitter::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Progress ([RUN] lines, reroot failures) is shown at info; --verbose adds per-line detail
    let filter = if cli.verbose {
        EnvFilter::new("locus_splitter=debug,info")
    } else {
        EnvFilter::new("locus_splitter=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Split(args) => {
            cli::split::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Loci(args) => {
            cli::loci::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
