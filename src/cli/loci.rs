use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::LocusIndexMap;
use crate::parsing::iqtree_log::parse_log_file;

#[derive(Args)]
pub struct LociArgs {
    /// IQ-TREE log file with the locus table
    #[arg(required = true)]
    pub logfile: PathBuf,
}

/// Execute loci subcommand
///
/// # Errors
///
/// Returns an error if the log cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LociArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let loci = parse_log_file(&args.logfile)?;

    if verbose {
        eprintln!("Parsed {} loci from {}", loci.len(), args.logfile.display());
    }

    match format {
        OutputFormat::Text => print_text_loci(&loci),
        OutputFormat::Json => print_json_loci(&loci)?,
        OutputFormat::Tsv => print_tsv_loci(&loci),
    }

    Ok(())
}

fn print_text_loci(loci: &LocusIndexMap) {
    if loci.is_empty() {
        println!("No loci found.");
        return;
    }

    let width = loci
        .iter()
        .map(|(index, _)| index.to_string().len())
        .max()
        .unwrap_or(1)
        .max("Index".len());

    println!("{:>width$}  Name", "Index");
    for (index, name) in loci.iter() {
        println!("{index:>width$}  {name}");
    }
    println!("\nTotal: {} loci", loci.len());
}

fn print_json_loci(loci: &LocusIndexMap) -> anyhow::Result<()> {
    let output: Vec<_> = loci
        .iter()
        .map(|(index, name)| {
            serde_json::json!({
                "index": index,
                "name": name,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_loci(loci: &LocusIndexMap) {
    println!("index\tname");
    for (index, name) in loci.iter() {
        println!("{index}\t{name}");
    }
}
