//! Stage 4: Merging component identities into the package documents
//!
//! Rewrites the three package-level documents in place inside the output
//! directory: the solution manifest's root component list, the
//! customization registry's custom control list, and the content-type
//! index's override list. The qualified names are computed once here and
//! fed to all three rewriters, so the identifier a component is registered
//! under is identical across the documents by construction.

use std::fs;
use std::path::Path;

use log::info;

use super::layout::{CONTENT_TYPES_FILE, CUSTOMIZATIONS_FILE, SOLUTION_FILE};
use super::ComponentIdentity;
use crate::config::PackageContext;
use crate::error::{Error, Result};
use crate::manifest::{content_types, customizations, solution};

/// Executes Stage 4: rewrite the three package documents with the current
/// component set. Returns the qualified names, in component order.
pub fn execute(ctx: &PackageContext, components: &[ComponentIdentity]) -> Result<Vec<String>> {
    let qualified_names = components
        .iter()
        .map(|c| c.qualified_name(&ctx.publisher_prefix))
        .collect::<Vec<_>>();
    info!(
        "merging {} component(s) into package documents",
        qualified_names.len()
    );

    rewrite_file(&ctx.output_dir.join(SOLUTION_FILE), |xml, path| {
        solution::rewrite(xml, &qualified_names, path)
    })?;
    rewrite_file(&ctx.output_dir.join(CUSTOMIZATIONS_FILE), |xml, path| {
        customizations::rewrite(xml, &qualified_names, path)
    })?;
    rewrite_file(&ctx.output_dir.join(CONTENT_TYPES_FILE), |xml, path| {
        content_types::rewrite(xml, &qualified_names, path)
    })?;

    Ok(qualified_names)
}

/// Read, rewrite, and write back one package document.
fn rewrite_file(
    file: &Path,
    rewrite: impl Fn(&str, &str) -> Result<String>,
) -> Result<()> {
    let path = file.display().to_string();
    let xml = fs::read_to_string(file).map_err(|e| Error::ManifestParse {
        path: path.clone(),
        message: e.to_string(),
    })?;
    let merged = rewrite(&xml, &path)?;
    fs::write(file, merged).map_err(|e| Error::ManifestWrite {
        path,
        message: e.to_string(),
    })
}
