//! Command-line interface for locus-splitter.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **split**: Split an IQ-TREE multi-tree file into one tree file per locus
//! - **loci**: Print the locus index to name mapping parsed from an IQ-TREE log
//!
//! ## Usage
//!
//! ```text
//! # Split, keeping only loci with an alignment in fasta/
//! locus-splitter split -l loci.nex.log -i loci.treefile -o trees/ -f fasta/
//!
//! # Split and reroot with pxrr, skipping trees without any outgroup
//! locus-splitter split -l loci.nex.log -i loci.treefile -o trees/ \
//!     -r Danio_rerio,Lepisosteus_oculatus --keep-only-outgroup
//!
//! # Check the mapping before splitting
//! locus-splitter loci loci.nex.log --format tsv
//! ```

use clap::{Parser, Subcommand};

pub mod loci;
pub mod split;

#[derive(Parser)]
#[command(name = "locus-splitter")]
#[command(version)]
#[command(about = "Split IQ-TREE multi-tree output into per-locus tree files")]
#[command(
    long_about = "locus-splitter turns an IQ-TREE batch run (one best tree per locus per line, plus the run log) into one tree file per locus.\n\nLocus names come from the partition table in the log. Trees can be gated on the presence of a matching fasta alignment and rerooted with phyx's pxrr, in preparation for SortaDate-style dating pipelines."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for reports
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a multi-tree file into per-locus tree files
    Split(split::SplitArgs),

    /// Print the locus table parsed from an IQ-TREE log
    Loci(loci::LociArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
