use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::core::LocusIndexMap;
use crate::parsing::iqtree_log::parse_log_file;
use crate::reroot::{PxrrRerooter, DEFAULT_PROGRAM};
use crate::splitting::{
    NameTransform, OutgroupSet, RerootConfig, SplitConfig, SplitReport, TreeSplitter,
};

/// Suffix appended to locus names when none is given
pub const DEFAULT_SUFFIX: &str = "_trimalauto";

#[derive(Args)]
pub struct SplitArgs {
    /// IQ-TREE log file with the locus table
    #[arg(short, long)]
    pub logfile: PathBuf,

    /// Multi-tree .treefile from IQ-TREE, one tree per locus per line
    #[arg(short, long, alias = "input_locus_trees")]
    pub input_locus_trees: PathBuf,

    /// Output directory for individual trees (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Suffix appended to each locus name; pass "" for none
    #[arg(short, long, default_value = DEFAULT_SUFFIX, allow_hyphen_values = true)]
    pub suffix: String,

    /// Only write trees whose <name><suffix>.fasta exists in this directory
    #[arg(short, long, alias = "fasta_directory")]
    pub fasta_directory: Option<PathBuf>,

    /// Comma-separated outgroup list, in preference order; enables rerooting
    #[arg(short, long, value_name = "OUTGROUPS")]
    pub reroot: Option<String>,

    /// Only reroot trees containing at least one outgroup; the rest are listed in no_outgroups.list
    #[arg(long, alias = "keep_only_outgroup", requires = "reroot")]
    pub keep_only_outgroup: bool,

    /// Regex rewrite applied to locus names before the suffix, as PATTERN/REPLACEMENT
    #[arg(long, value_name = "PATTERN/REPLACEMENT")]
    pub rename: Option<String>,

    /// Rerooting program, called as `<program> -t <tree> -r -g <outgroups> -o <tree>.rr`
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    pub pxrr: PathBuf,
}

impl SplitArgs {
    /// Validate the user-supplied settings into a [`SplitConfig`]
    ///
    /// # Errors
    ///
    /// Returns an error if the rename spec or the outgroup list is malformed.
    pub fn to_config(&self) -> anyhow::Result<SplitConfig> {
        let rename = self
            .rename
            .as_deref()
            .map(str::parse::<NameTransform>)
            .transpose()
            .context("Invalid --rename")?;

        let reroot = self
            .reroot
            .as_deref()
            .map(str::parse::<OutgroupSet>)
            .transpose()
            .context("Invalid --reroot")?
            .map(|outgroups| {
                RerootConfig::new(outgroups).with_require_outgroup(self.keep_only_outgroup)
            });

        Ok(SplitConfig::new(&self.output)
            .with_suffix(self.suffix.as_str())
            .with_fasta_dir(self.fasta_directory.clone())
            .with_rename(rename)
            .with_reroot(reroot))
    }
}

/// Execute split subcommand
///
/// # Errors
///
/// Returns an error if the settings are invalid, an input cannot be read, an
/// output cannot be written, or the rerooting program cannot be launched.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SplitArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Settings are checked before any input is touched
    let config = args.to_config()?;

    let loci = parse_log_file(&args.logfile)?;
    if verbose {
        eprintln!(
            "Parsed {} loci from {}",
            loci.len(),
            args.logfile.display()
        );
    }
    if loci.is_empty() {
        warn!("No locus table found in {}", args.logfile.display());
    }

    let has_fasta_dir = config.fasta_dir.is_some();
    let splitter = TreeSplitter::new(config, PxrrRerooter::new(&args.pxrr));
    let report = splitter.split_file(&args.input_locus_trees, &loci)?;
    let rerooting = splitter.config().reroot.is_some();

    match format {
        OutputFormat::Text => print_text_summary(&report, has_fasta_dir, rerooting),
        OutputFormat::Json => print_json_summary(&loci, &report)?,
        OutputFormat::Tsv => print_tsv_summary(&report),
    }

    Ok(())
}

fn print_text_summary(report: &SplitReport, has_fasta_dir: bool, rerooting: bool) {
    let outcome = &report.outcome;

    println!("Trees written: {}", outcome.written);
    if has_fasta_dir {
        println!(
            "Trees skipped (missing fasta): {}",
            outcome.skipped_missing_companion
        );
    }
    if rerooting {
        println!("Trees rerooted: {}", outcome.rerooted);
        println!("Trees reroot failed: {}", outcome.reroot_failed);
        println!("Trees without specified outgroups: {}", outcome.no_outgroup);
    }

    for list in &report.list_files {
        if list.ends_with(crate::core::REROOT_FAILED_LIST) {
            println!("Wrote reroot-failures list: {}", list.display());
        } else {
            println!("Wrote no-outgroups list: {}", list.display());
        }
    }
}

fn print_json_summary(loci: &LocusIndexMap, report: &SplitReport) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "loci": loci.len(),
        "outcome": report.outcome,
        "list_files": report
            .list_files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(report: &SplitReport) {
    let outcome = &report.outcome;
    println!("written\tskipped_missing_fasta\trerooted\treroot_failed\tno_outgroup");
    println!(
        "{}\t{}\t{}\t{}\t{}",
        outcome.written,
        outcome.skipped_missing_companion,
        outcome.rerooted,
        outcome.reroot_failed,
        outcome.no_outgroup,
    );
}
