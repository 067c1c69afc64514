//! # locus-splitter
//!
//! Split IQ-TREE multi-tree output into one tree file per locus.
//!
//! A partitioned IQ-TREE batch run leaves two artefacts behind: a `.treefile` with one
//! best tree per locus per line, and a run log whose partition table lists each locus's
//! index and name. Downstream dating pipelines (SortaDate and friends) want one file per
//! locus, named after the locus, and usually rooted on an outgroup.
//!
//! `locus-splitter` joins the two by line number:
//!
//! - **Log parsing**: the partition table becomes a [`LocusIndexMap`], with IQ-TREE's
//!   `p<N>_` prefixes removed from the names
//! - **Splitting**: each mapped tree line is written to `<name><suffix>.treefile`
//! - **Companion gating**: optionally skip loci without a `<name><suffix>.fasta`
//! - **Renaming**: optional regex rewrite of locus names
//! - **Rerooting**: optionally run `pxrr` on every tree, or only on those that contain
//!   one of the outgroups, recording failures instead of aborting
//!
//! ## Example
//!
//! ```rust,no_run
//! use locus_splitter::parsing::iqtree_log::parse_log_file;
//! use locus_splitter::{PxrrRerooter, RerootConfig, SplitConfig, TreeSplitter};
//! use std::path::Path;
//!
//! let loci = parse_log_file(Path::new("loci.nex.log")).unwrap();
//!
//! let reroot = RerootConfig::new("Danio_rerio,Lepisosteus_oculatus".parse().unwrap())
//!     .with_require_outgroup(true);
//! let config = SplitConfig::new("trees")
//!     .with_suffix("_trimalauto")
//!     .with_reroot(Some(reroot));
//!
//! let splitter = TreeSplitter::new(config, PxrrRerooter::default());
//! let report = splitter.split_file(Path::new("loci.treefile"), &loci).unwrap();
//! println!("Trees written: {}", report.outcome.written);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Locus map and run outcome types
//! - [`parsing`]: IQ-TREE log parser
//! - [`splitting`]: Tree splitter, outgroup matching and name rewriting
//! - [`reroot`]: External rerooting tool
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod reroot;
pub mod splitting;

// Re-export commonly used types for convenience
pub use crate::core::locus::LocusIndexMap;
pub use crate::core::outcome::RunOutcome;
pub use reroot::{PxrrRerooter, RerootError, Rerooter};
pub use splitting::{
    ConfigError, NameTransform, OutgroupSet, RerootConfig, SplitConfig, SplitError, SplitReport,
    TreeSplitter,
};
