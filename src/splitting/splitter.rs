use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::core::{LocusIndexMap, RunOutcome};
use crate::parsing::lines::UniversalLines;
use crate::reroot::{RerootError, Rerooter, REROOTED_EXTENSION};
use crate::splitting::outgroup::OutgroupSet;
use crate::splitting::rename::NameTransform;
use crate::splitting::SplitError;

/// Extension of every per-locus tree file
pub const TREE_EXTENSION: &str = "treefile";

/// Extension of the companion alignment checked with `fasta_dir`
pub const COMPANION_EXTENSION: &str = "fasta";

/// Rerooting settings; present only when rerooting was requested
#[derive(Debug, Clone)]
pub struct RerootConfig {
    /// Outgroups in preference order
    pub outgroups: OutgroupSet,
    /// Leave trees containing none of the outgroups unrerooted
    pub require_outgroup: bool,
}

impl RerootConfig {
    #[must_use]
    pub fn new(outgroups: OutgroupSet) -> Self {
        Self {
            outgroups,
            require_outgroup: false,
        }
    }

    #[must_use]
    pub fn with_require_outgroup(mut self, require: bool) -> Self {
        self.require_outgroup = require;
        self
    }
}

/// Everything the splitter needs to know about one run
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub output_dir: PathBuf,
    /// Appended verbatim to each locus name
    pub suffix: String,
    /// Directory that must contain `<name><suffix>.fasta` for a tree to be written
    pub fasta_dir: Option<PathBuf>,
    pub rename: Option<NameTransform>,
    pub reroot: Option<RerootConfig>,
}

impl SplitConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            suffix: String::new(),
            fasta_dir: None,
            rename: None,
            reroot: None,
        }
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_fasta_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.fasta_dir = dir;
        self
    }

    #[must_use]
    pub fn with_rename(mut self, rename: Option<NameTransform>) -> Self {
        self.rename = rename;
        self
    }

    #[must_use]
    pub fn with_reroot(mut self, reroot: Option<RerootConfig>) -> Self {
        self.reroot = reroot;
        self
    }
}

/// Result of [`TreeSplitter::split_file`]
#[derive(Debug, Clone)]
pub struct SplitReport {
    pub outcome: RunOutcome,
    /// List artefacts written to the output directory
    pub list_files: Vec<PathBuf>,
}

/// Splits a multi-tree file line by line against a [`LocusIndexMap`]
pub struct TreeSplitter<R> {
    config: SplitConfig,
    rerooter: R,
}

impl<R: Rerooter> TreeSplitter<R> {
    pub fn new(config: SplitConfig, rerooter: R) -> Self {
        Self { config, rerooter }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Split `trees` into the output directory, creating it if needed.
    ///
    /// When rerooting is configured the exception lists are persisted after
    /// the last line is processed.
    ///
    /// # Errors
    ///
    /// Returns `SplitError` if the output directory cannot be created, the tree
    /// file cannot be read, an output file cannot be written, or the rerooting
    /// tool cannot be launched.
    pub fn split_file(&self, trees: &Path, loci: &LocusIndexMap) -> Result<SplitReport, SplitError> {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|source| SplitError::CreateOutputDir {
            path: output_dir.display().to_string(),
            source,
        })?;

        let file = File::open(trees).map_err(|source| SplitError::OpenTrees {
            path: trees.display().to_string(),
            source,
        })?;

        let outcome = self.split_reader(BufReader::new(file), loci)?;

        let list_files = if self.config.reroot.is_some() {
            outcome
                .write_lists(output_dir)
                .map_err(|e| SplitError::Write {
                    path: e.path.display().to_string(),
                    source: e.source,
                })?
        } else {
            Vec::new()
        };

        Ok(SplitReport {
            outcome,
            list_files,
        })
    }

    /// Process every line of `reader`, writing tree files into the output directory.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`. Does not create the output
    /// directory or write the list artefacts.
    ///
    /// # Errors
    ///
    /// Same conditions as [`split_file`](Self::split_file), minus directory creation.
    pub fn split_reader<B: BufRead>(
        &self,
        reader: B,
        loci: &LocusIndexMap,
    ) -> Result<RunOutcome, SplitError> {
        let mut outcome = RunOutcome::new();

        for (i, line) in UniversalLines::new(reader).enumerate() {
            let line = line.map_err(SplitError::ReadTrees)?;
            let line = String::from_utf8(line).map_err(|e| {
                SplitError::ReadTrees(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            })?;
            // Tree line numbers are 1-based, like the log's locus indices
            let line_num = i + 1;
            if let Some(name) = loci.get(line_num) {
                self.process_tree(line_num, name, &line, &mut outcome)?;
            }
        }

        Ok(outcome)
    }

    /// File stem shared by the tree file and its companion fasta
    #[must_use]
    pub fn locus_basename(&self, name: &str) -> String {
        let name = match &self.config.rename {
            Some(transform) => transform.apply(name),
            None => name.to_string(),
        };
        format!("{name}{}", self.config.suffix)
    }

    fn process_tree(
        &self,
        line_num: usize,
        name: &str,
        tree: &str,
        outcome: &mut RunOutcome,
    ) -> Result<(), SplitError> {
        let basename = self.locus_basename(name);

        if let Some(fasta_dir) = &self.config.fasta_dir {
            let companion = fasta_dir.join(format!("{basename}.{COMPANION_EXTENSION}"));
            if !companion.exists() {
                debug!("Line {line_num}: {} missing, skipping", companion.display());
                outcome.record_missing_companion();
                return Ok(());
            }
        }

        let tree_file = self
            .config
            .output_dir
            .join(format!("{basename}.{TREE_EXTENSION}"));
        std::fs::write(&tree_file, format!("{}\n", tree.trim_end())).map_err(|source| {
            SplitError::Write {
                path: tree_file.display().to_string(),
                source,
            }
        })?;
        outcome.record_written();
        debug!("Line {line_num}: wrote {}", tree_file.display());

        if let Some(reroot) = &self.config.reroot {
            self.reroot_tree(reroot, tree, tree_file, outcome)?;
        }

        Ok(())
    }

    fn reroot_tree(
        &self,
        reroot: &RerootConfig,
        tree: &str,
        tree_file: PathBuf,
        outcome: &mut RunOutcome,
    ) -> Result<(), SplitError> {
        if reroot.require_outgroup {
            match reroot.outgroups.first_present(tree) {
                Some(found) => debug!("{}: found outgroup {found}", tree_file.display()),
                None => {
                    info!("{}: no outgroup present, not rerooting", tree_file.display());
                    outcome.record_no_outgroup(tree_file);
                    return Ok(());
                }
            }
        }

        let rerooted = rerooted_path(&tree_file);
        match self
            .rerooter
            .reroot(&tree_file, &reroot.outgroups, &rerooted)
        {
            Ok(()) => outcome.record_rerooted(),
            Err(e @ RerootError::Failed { .. }) => {
                error!("Rerooting failed for {}: {e}", tree_file.display());
                outcome.record_reroot_failure(tree_file);
            }
            Err(e @ RerootError::Launch { .. }) => return Err(e.into()),
        }

        Ok(())
    }
}

/// `<tree_file>.rr`, next to the tree file
fn rerooted_path(tree_file: &Path) -> PathBuf {
    let mut path = tree_file.as_os_str().to_owned();
    path.push(REROOTED_EXTENSION);
    PathBuf::from(path)
}
