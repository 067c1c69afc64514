use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// File name of the list of trees that lacked every configured outgroup
pub const NO_OUTGROUPS_LIST: &str = "no_outgroups.list";

/// File name of the list of trees whose rerooting invocation failed
pub const REROOT_FAILED_LIST: &str = "reroot_failed.list";

/// A list artefact that could not be written
#[derive(Error, Debug)]
#[error("cannot write {}: {source}", .path.display())]
pub struct ListWriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Counters and exception lists accumulated over one split run.
///
/// Every per-locus condition that is not a fatal error ends up here, so the
/// final report accounts for each mapped tree line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// Trees written to `<output>/<name><suffix>.treefile`
    pub written: usize,
    /// Trees not written because `<name><suffix>.fasta` was missing
    pub skipped_missing_companion: usize,
    /// Trees successfully rerooted by the external tool
    pub rerooted: usize,
    /// Trees whose rerooting invocation exited non-zero
    pub reroot_failed: usize,
    /// Trees left unrerooted because no configured outgroup occurs in them
    pub no_outgroup: usize,
    /// Written tree files lacking every outgroup, in input order
    pub no_outgroup_files: Vec<PathBuf>,
    /// Written tree files whose rerooting failed, in input order
    pub reroot_failed_files: Vec<PathBuf>,
}

impl RunOutcome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_written(&mut self) {
        self.written += 1;
    }

    pub fn record_missing_companion(&mut self) {
        self.skipped_missing_companion += 1;
    }

    pub fn record_rerooted(&mut self) {
        self.rerooted += 1;
    }

    pub fn record_no_outgroup(&mut self, tree_file: PathBuf) {
        self.no_outgroup += 1;
        self.no_outgroup_files.push(tree_file);
    }

    pub fn record_reroot_failure(&mut self, tree_file: PathBuf) {
        self.reroot_failed += 1;
        self.reroot_failed_files.push(tree_file);
    }

    /// Persist the exception lists into `output_dir`.
    ///
    /// `no_outgroups.list` is always written, even when empty, so every
    /// rerooting run leaves an auditable record. `reroot_failed.list` is only
    /// written when at least one invocation failed. Returns the paths written.
    ///
    /// # Errors
    ///
    /// Returns `ListWriteError`, naming the list file, if it cannot be created or written.
    pub fn write_lists(&self, output_dir: &Path) -> Result<Vec<PathBuf>, ListWriteError> {
        let mut written = Vec::with_capacity(2);

        let no_outgroups = output_dir.join(NO_OUTGROUPS_LIST);
        write_path_list(&no_outgroups, &self.no_outgroup_files)?;
        written.push(no_outgroups);

        if !self.reroot_failed_files.is_empty() {
            let failed = output_dir.join(REROOT_FAILED_LIST);
            write_path_list(&failed, &self.reroot_failed_files)?;
            written.push(failed);
        }

        Ok(written)
    }
}

/// Write one path per line, newline-terminated.
fn write_path_list(path: &Path, entries: &[PathBuf]) -> Result<(), ListWriteError> {
    let write = || -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for entry in entries {
            writeln!(out, "{}", entry.display())?;
        }
        out.flush()
    };
    write().map_err(|source| ListWriteError {
        path: path.to_path_buf(),
        source,
    })
}
