//! External build command invocation
//!
//! Each sub-project is built by its own toolchain, invoked as an opaque
//! command. The `BuildRunner` trait is the seam between the pipeline and
//! that external process, so tests can substitute a mock that populates
//! build output without spawning anything.
//!
//! The command's exit status is reported back but is not the success
//! signal by default: some component build tooling exits non-zero on
//! warnings while still producing valid output, so the pipeline checks the
//! shape of the output directory instead. Strict mode (see
//! `PackageContext::strict_build`) makes a non-zero exit fatal.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::Result;

/// Outcome of one external build command invocation.
#[derive(Debug, Clone)]
pub struct BuildExit {
    /// Process exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured standard error, used for diagnostics on failure.
    pub stderr: String,
}

impl BuildExit {
    /// Whether the build command itself reported success.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Trait for invoking a sub-project's build command - allows mocking in
/// tests.
pub trait BuildRunner: Send + Sync {
    /// Run the build command synchronously to completion in
    /// `project_root`. Spawn failures are errors; a non-zero exit is not,
    /// and is reported through `BuildExit` for the caller to judge.
    fn run_build(&self, project_root: &Path) -> Result<BuildExit>;
}

/// Default `BuildRunner` that invokes the sub-project's npm build script,
/// non-interactively and with output coloring disabled.
pub struct NpmBuildRunner;

impl BuildRunner for NpmBuildRunner {
    fn run_build(&self, project_root: &Path) -> Result<BuildExit> {
        let output = Command::new("npm")
            .args([
                "run",
                "build",
                "--",
                "--noColor",
                "--buildSource",
                "MSBuild",
                "--buildMode",
                "development",
            ])
            .current_dir(project_root)
            .stdin(Stdio::null())
            .output()?;

        Ok(BuildExit {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
