//! Stage 2: Building sub-projects and extracting identities
//!
//! Every resolved sub-project is built as an independent parallel task
//! (rayon fan-out); no two tasks touch the same directory, so no locking
//! is needed beyond the join barrier. The stage waits for all tasks; the
//! results come back in the original reference order regardless of
//! completion order, because the parallel iterator collects positionally.
//!
//! For each sub-project the task:
//! 1. reads the build configuration and its required `outDir` setting,
//! 2. invokes the external build command through the `BuildRunner` seam,
//! 3. verifies the output-directory shape (exactly one component folder),
//! 4. extracts the component identity from the manifest inside it.
//!
//! A non-zero build exit is logged but non-fatal by default; the output
//! shape is the actual success signal, since some component build tooling
//! exits non-zero on warnings while still producing valid output. Strict
//! mode makes the non-zero exit itself fatal. There is no timeout on the
//! external command: a hung sub-project build hangs the run.

use std::fs;

use log::{info, warn};
use rayon::prelude::*;

use super::{ComponentIdentity, SubProjectReference};
use crate::builder::BuildRunner;
use crate::config::{BuildConfig, PackageContext};
use crate::error::{Error, Result};
use crate::manifest::control;

/// Executes Stage 2: build all sub-projects and collect their identities,
/// in reference order.
pub fn execute(
    ctx: &PackageContext,
    runner: &dyn BuildRunner,
    references: &[SubProjectReference],
) -> Result<Vec<ComponentIdentity>> {
    references
        .par_iter()
        .map(|reference| build_sub_project(ctx, runner, reference))
        .collect()
}

/// Build one sub-project and derive its component identity.
fn build_sub_project(
    ctx: &PackageContext,
    runner: &dyn BuildRunner,
    reference: &SubProjectReference,
) -> Result<ComponentIdentity> {
    let label = reference.label();

    let build_config = BuildConfig::from_project_root(&reference.root)?;
    let output_root = reference.root.join(build_config.out_dir(&reference.root)?);

    info!("building sub-project {}", label);
    let exit = runner.run_build(&reference.root)?;
    if !exit.success() {
        if ctx.strict_build {
            return Err(Error::BuildOutput {
                project: label,
                message: format!(
                    "build command exited with {:?}: {}",
                    exit.code,
                    exit.stderr.trim()
                ),
            });
        }
        warn!(
            "build command for {} exited with {:?}; relying on output shape",
            label, exit.code
        );
    }

    // The build may not create the directory when it produces nothing;
    // create it so the shape check below reports the real problem.
    fs::create_dir_all(&output_root)?;

    let mut entries = fs::read_dir(&output_root)?
        .collect::<std::io::Result<Vec<_>>>()?;
    if entries.len() != 1 {
        return Err(Error::BuildOutput {
            project: label,
            message: format!(
                "expected exactly one entry in build output {}, found {}",
                output_root.display(),
                entries.len()
            ),
        });
    }

    let entry = entries.remove(0);
    let name = entry
        .file_name()
        .into_string()
        .map_err(|raw| Error::BuildOutput {
            project: label.clone(),
            message: format!("component folder name is not valid UTF-8: {:?}", raw),
        })?;
    if !entry.path().is_dir() {
        return Err(Error::BuildOutput {
            project: label,
            message: format!("build output entry {} is not a directory", name),
        });
    }

    let manifest_path = output_root.join(&name).join("ControlManifest.xml");
    let manifest_name = manifest_path.display().to_string();
    let xml = fs::read_to_string(&manifest_path).map_err(|e| Error::ManifestParse {
        path: manifest_name.clone(),
        message: e.to_string(),
    })?;
    let namespace = control::control_namespace(&xml, &manifest_name)?;

    info!("sub-project {} built component {}.{}", label, namespace, name);
    Ok(ComponentIdentity {
        name,
        namespace,
        path: output_root,
    })
}
