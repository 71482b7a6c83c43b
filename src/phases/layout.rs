//! Stage 3: Output directory layout
//!
//! Two steps. `prepare` clears the output directory so every run starts
//! from a clean slate and stale files from earlier runs cannot leak into
//! the package. `place` then copies the skeleton templates to their
//! package names, writes the content-type map skeleton, and copies each
//! component's build artifacts under `Controls/<qualified-name>/`.
//!
//! The layout produced here is exactly what Stage 6 archives:
//!
//! ```text
//! <output>/
//!   solution.xml
//!   customizations.xml
//!   [Content_Types].xml
//!   Controls/
//!     <prefix>_<namespace>.<name>/
//!       ControlManifest.xml
//!       ... build artifacts ...
//! ```

use std::fs;
use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use super::ComponentIdentity;
use crate::config::PackageContext;
use crate::error::{Error, Result};
use crate::manifest::{content_types, CONTROLS_DIR};

/// Package name of the solution manifest.
pub const SOLUTION_FILE: &str = "solution.xml";

/// Package name of the customization registry.
pub const CUSTOMIZATIONS_FILE: &str = "customizations.xml";

/// Package name of the content-type map.
pub const CONTENT_TYPES_FILE: &str = "[Content_Types].xml";

/// Executes the prepare step: reset the output directory to empty.
pub fn prepare(ctx: &PackageContext) -> Result<()> {
    if ctx.output_dir.exists() {
        debug!("clearing output directory {}", ctx.output_dir.display());
        fs::remove_dir_all(&ctx.output_dir)?;
    }
    fs::create_dir_all(&ctx.output_dir)?;
    Ok(())
}

/// Executes the place step: copy templates and component artifacts into
/// the prepared output directory.
pub fn place(ctx: &PackageContext, components: &[ComponentIdentity]) -> Result<()> {
    copy_template(
        &ctx.solution_template(),
        &ctx.output_dir.join(SOLUTION_FILE),
    )?;
    copy_template(
        &ctx.customizations_template(),
        &ctx.output_dir.join(CUSTOMIZATIONS_FILE),
    )?;
    fs::write(
        ctx.output_dir.join(CONTENT_TYPES_FILE),
        content_types::SKELETON,
    )?;

    let controls_root = ctx.output_dir.join(CONTROLS_DIR);
    for component in components {
        let qualified = component.qualified_name(&ctx.publisher_prefix);
        let dest = controls_root.join(&qualified);
        if dest.exists() {
            return Err(Error::Packaging {
                message: format!(
                    "two components resolve to the same qualified name {}",
                    qualified
                ),
            });
        }
        info!("placing component {} -> {}", qualified, dest.display());
        copy_dir_recursive(&component.component_dir(), &dest)?;
    }
    Ok(())
}

fn copy_template(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest).map_err(|e| Error::Packaging {
        message: format!(
            "cannot copy template {} to {}: {}",
            source.display(),
            dest.display(),
            e
        ),
    })?;
    Ok(())
}

fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| Error::Packaging {
            message: format!("cannot walk {}: {}", source.display(), e),
        })?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::Packaging {
                message: format!("cannot relativize {}: {}", entry.path().display(), e),
            })?;
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
