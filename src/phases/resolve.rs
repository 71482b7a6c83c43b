//! Stage 1: Resolving sub-project references
//!
//! Reads the project descriptor (`<solution>.cdsproj`) from the solution
//! root and resolves every `ProjectReference` include path to the
//! sub-project's root directory (the directory containing the referenced
//! descriptor file, not the file itself).
//!
//! The order of the resolved references matches the descriptor order, and
//! every later stage preserves it, so the merged documents and the archive
//! layout are deterministic across runs with the same reference list.
//! There is no valid package with zero sub-projects: an absent or empty
//! reference list fails here, before any build is attempted.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::debug;

use super::SubProjectReference;
use crate::config::{self, PackageContext};
use crate::error::{Error, Result};

/// Executes Stage 1: resolve the ordered sub-project reference list.
pub fn execute(ctx: &PackageContext) -> Result<Vec<SubProjectReference>> {
    let descriptor = ctx.descriptor_path()?;
    let content = fs::read_to_string(&descriptor).map_err(|e| Error::Configuration {
        message: format!("cannot read project descriptor {}: {}", descriptor.display(), e),
        hint: Some("run from the solution root, or pass --solution-dir".to_string()),
    })?;

    let includes =
        config::parse_project_references(&content, &descriptor.display().to_string())?;
    if includes.is_empty() {
        return Err(Error::Configuration {
            message: format!(
                "project descriptor {} lists no project references",
                descriptor.display()
            ),
            hint: Some("a package needs at least one referenced sub-project".to_string()),
        });
    }

    let references = includes
        .iter()
        .map(|include| {
            let root = resolve_reference_root(&ctx.solution_root, include)?;
            debug!("resolved project reference {} -> {}", include, root.display());
            Ok(SubProjectReference::new(root))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(references)
}

/// Resolve one include path to the referenced sub-project's root directory.
///
/// Include paths are written by Windows-based tooling and may use
/// backslash separators; they are normalized before resolution. Relative
/// paths are resolved against the solution root.
fn resolve_reference_root(solution_root: &Path, include: &str) -> Result<PathBuf> {
    let normalized = include.replace('\\', "/");
    let include_path = PathBuf::from(&normalized);
    let descriptor_path = if include_path.is_absolute() {
        include_path
    } else {
        solution_root.join(include_path)
    };

    let parent = descriptor_path
        .parent()
        .ok_or_else(|| Error::Configuration {
            message: format!("project reference \"{}\" has no parent directory", include),
            hint: None,
        })?;

    // Normalize away `.` and `..` segments so output paths stay readable;
    // the referenced project does not need to exist yet (its build will
    // fail later with a precise error if it is missing).
    Ok(normalize_path(parent))
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(Component::ParentDir);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SKELETON_DIR;
    use tempfile::TempDir;

    fn scaffold(references: &[&str]) -> (TempDir, PackageContext) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("sample");
        fs::create_dir_all(root.join(SKELETON_DIR)).unwrap();
        fs::write(
            root.join(SKELETON_DIR).join("Solution.xml"),
            r#"<ImportExportXml><SolutionManifest><Publisher>
                <UniqueName>pcf</UniqueName>
                <CustomizationPrefix>pcf</CustomizationPrefix>
              </Publisher><RootComponents /></SolutionManifest></ImportExportXml>"#,
        )
        .unwrap();

        let entries = references
            .iter()
            .map(|r| format!(r#"<ProjectReference Include="{}" />"#, r))
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(
            root.join("sample.cdsproj"),
            format!("<Project><ItemGroup>{}</ItemGroup></Project>", entries),
        )
        .unwrap();

        let ctx = PackageContext::new(root, "package", "Solution.zip", false).unwrap();
        (temp, ctx)
    }

    #[test]
    fn test_resolve_references_in_order() {
        let (_temp, ctx) =
            scaffold(&[r"..\alpha\alpha.pcfproj", r"..\beta\beta.pcfproj"]);
        let references = execute(&ctx).unwrap();
        assert_eq!(references.len(), 2);
        assert_eq!(references[0].label(), "alpha");
        assert_eq!(references[1].label(), "beta");
        // `..` segments are resolved against the solution root.
        assert!(!references[0]
            .root
            .components()
            .any(|c| c == Component::ParentDir));
    }

    #[test]
    fn test_resolve_keeps_duplicates() {
        let (_temp, ctx) = scaffold(&["sub/alpha/alpha.pcfproj", "sub/alpha/alpha.pcfproj"]);
        let references = execute(&ctx).unwrap();
        assert_eq!(references.len(), 2);
        assert_eq!(references[0], references[1]);
    }

    #[test]
    fn test_empty_reference_list_is_configuration_error() {
        let (_temp, ctx) = scaffold(&[]);
        let err = execute(&ctx).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("no project references"));
    }

    #[test]
    fn test_missing_descriptor_is_configuration_error() {
        let (_temp, ctx) = scaffold(&["sub/alpha/alpha.pcfproj"]);
        fs::remove_file(ctx.descriptor_path().unwrap()).unwrap();
        let err = execute(&ctx).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/work/solution/../alpha")),
            PathBuf::from("/work/alpha")
        );
        assert_eq!(
            normalize_path(Path::new("/work/./alpha")),
            PathBuf::from("/work/alpha")
        );
    }
}
