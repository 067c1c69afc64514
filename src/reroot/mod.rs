//! Rerooting through an external tool.
//!
//! The [`Rerooter`] trait is the seam between the splitter and the outside world;
//! [`PxrrRerooter`] drives phyx's `pxrr`, and tests substitute their own implementation.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::info;

use crate::splitting::outgroup::OutgroupSet;

/// Default rerooting program
pub const DEFAULT_PROGRAM: &str = "pxrr";

/// Extension appended to a tree file's name to form the rerooted sibling
pub const REROOTED_EXTENSION: &str = ".rr";

#[derive(Error, Debug)]
pub enum RerootError {
    /// The program could not be started at all
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but reported failure
    #[error("'{program}' exited with {}", describe_exit(.code))]
    Failed { program: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Reroots a single tree file on an ordered outgroup list.
pub trait Rerooter {
    /// Reroot `input` on `outgroups`, writing the result to `output`.
    ///
    /// # Errors
    ///
    /// Returns `RerootError::Launch` if the tool cannot be run and
    /// `RerootError::Failed` if it reports failure.
    fn reroot(&self, input: &Path, outgroups: &OutgroupSet, output: &Path)
        -> Result<(), RerootError>;
}

/// Invokes `pxrr -t <input> -r -g <outgroups> -o <output>` and waits for it.
#[derive(Debug, Clone)]
pub struct PxrrRerooter {
    program: OsString,
}

impl PxrrRerooter {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, input: &Path, outgroups: &OutgroupSet, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-t")
            .arg(input)
            .arg("-r")
            .arg("-g")
            .arg(outgroups.joined())
            .arg("-o")
            .arg(output);
        cmd
    }
}

impl Default for PxrrRerooter {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Rerooter for PxrrRerooter {
    fn reroot(
        &self,
        input: &Path,
        outgroups: &OutgroupSet,
        output: &Path,
    ) -> Result<(), RerootError> {
        let program = self.program.to_string_lossy().into_owned();
        info!(
            "[RUN] {program} -t {} -r -g {} -o {}",
            input.display(),
            outgroups.joined(),
            output.display()
        );

        let status = self
            .command(input, outgroups, output)
            .status()
            .map_err(|source| RerootError::Launch {
                program: program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(RerootError::Failed {
                program,
                code: status.code(),
            })
        }
    }
}
