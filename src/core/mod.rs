//! Core data types shared by the log parser and the tree splitter.
//!
//! - [`LocusIndexMap`]: 1-based locus ordinal to cleaned locus name, built once from the
//!   IQ-TREE log and read-only afterwards
//! - [`RunOutcome`]: per-run counters plus the `no_outgroups.list` / `reroot_failed.list`
//!   contents

pub mod locus;
pub mod outcome;

pub use locus::LocusIndexMap;
pub use outcome::{ListWriteError, RunOutcome, NO_OUTGROUPS_LIST, REROOT_FAILED_LIST};
