//! Stage orchestration for the packaging pipeline
//!
//! Runs the stages in order, handing each stage the output of the one
//! before it. The first error aborts the run; the archive is only written
//! after everything else succeeded.

use std::path::PathBuf;

use log::info;

use super::{phase1, phase2, phase3, phase4, phase5};
use crate::builder::BuildRunner;
use crate::config::PackageContext;
use crate::error::Result;

/// Outcome of one successful packaging run.
#[derive(Debug, Clone)]
pub struct PackageSummary {
    /// Qualified names of the packaged components, in reference order.
    pub components: Vec<String>,
    /// Path of the produced archive file.
    pub archive: PathBuf,
    /// Number of files written into the archive.
    pub archived_files: usize,
}

/// Run the full packaging pipeline for one solution.
pub fn execute_package(
    ctx: &PackageContext,
    runner: &dyn BuildRunner,
) -> Result<PackageSummary> {
    info!("packaging solution at {}", ctx.solution_root.display());

    let references = phase1::execute(ctx)?;
    info!("resolved {} sub-project reference(s)", references.len());

    let identities = phase2::execute(ctx, runner, &references)?;

    phase3::prepare(ctx)?;
    phase3::place(ctx, &identities)?;

    let components = phase4::execute(ctx, &identities)?;

    let archived_files = phase5::execute(ctx)?;

    Ok(PackageSummary {
        components,
        archive: ctx.archive_file.clone(),
        archived_files,
    })
}
