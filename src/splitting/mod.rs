//! Splitting a multi-tree file into per-locus tree files.
//!
//! IQ-TREE writes one best tree per locus per line; the line number is the locus
//! index from the log's partition table. [`TreeSplitter`] joins the two:
//!
//! 1. Lines whose number is not a known locus index are skipped
//! 2. The locus name is optionally rewritten by a [`NameTransform`]
//! 3. `<name><suffix>.fasta` must exist when a companion directory is configured
//! 4. The tree is written to `<output>/<name><suffix>.treefile`
//! 5. With rerooting configured, the tree is handed to a [`Rerooter`](crate::reroot::Rerooter),
//!    optionally only when it contains one of the outgroups
//!
//! Per-locus conditions never abort the run; they are counted in a
//! [`RunOutcome`](crate::core::RunOutcome).

use thiserror::Error;

use crate::reroot::RerootError;

pub mod outgroup;
pub mod rename;
pub mod splitter;

pub use outgroup::OutgroupSet;
pub use rename::NameTransform;
pub use splitter::{RerootConfig, SplitConfig, SplitReport, TreeSplitter};

/// Problems with user-supplied settings, detected before any tree is read
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("rename spec '{0}' must have the form PATTERN/REPLACEMENT")]
    MalformedRename(String),

    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("outgroup list contains no names")]
    EmptyOutgroups,
}

/// Fatal errors while splitting
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("cannot create output directory {path}: {source}")]
    CreateOutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open tree file {path}: {source}")]
    OpenTrees {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error while reading trees: {0}")]
    ReadTrees(#[source] std::io::Error),

    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Reroot(#[from] RerootError),
}
