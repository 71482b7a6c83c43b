//! # Configuration and Pipeline Context
//!
//! This module defines the typed views over the two configuration inputs
//! the packager consumes, plus the immutable context value threaded through
//! every pipeline stage:
//!
//! - **Project descriptor** (`<solution>.cdsproj`, XML): the parent
//!   project's list of `ProjectReference` entries, one per sub-project.
//! - **Sub-project build configuration** (`pcfconfig.json`): per
//!   sub-project settings; the packager only consumes the `outDir` setting
//!   that names the build output directory.
//! - **`PackageContext`**: publisher identity and resolved paths for one
//!   packaging run. Built once before the pipeline starts and never
//!   mutated, so no stage reads process-wide state.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::manifest::{self, solution};

/// Directory inside the solution root that holds the skeleton templates.
pub const SKELETON_DIR: &str = "src/Other";

/// File name of the per-sub-project build configuration.
pub const BUILD_CONFIG_FILE: &str = "pcfconfig.json";

/// Parse the `ProjectReference` include paths out of a project descriptor.
///
/// Returns the include paths in document order, duplicates preserved.
/// Malformed XML or a reference without an `Include` attribute is a
/// `ManifestParse` error; an empty result is legal here and rejected by
/// the reference resolver, which knows whether the run can proceed.
pub fn parse_project_references(xml: &str, path: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut includes = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"ProjectReference" {
                    includes.push(manifest::require_attr(e, b"Include", path)?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(manifest::parse_err(path, e.to_string())),
            Ok(_) => {}
        }
    }
    Ok(includes)
}

/// Typed view of a sub-project's `pcfconfig.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Build output directory, relative to the sub-project root.
    #[serde(default)]
    out_dir: Option<String>,
}

impl BuildConfig {
    /// Load the build configuration from a sub-project root.
    pub fn from_project_root(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(BUILD_CONFIG_FILE);
        let content = fs::read_to_string(&config_path).map_err(|e| Error::Configuration {
            message: format!("cannot read {}: {}", config_path.display(), e),
            hint: Some(format!(
                "every referenced sub-project needs a {}",
                BUILD_CONFIG_FILE
            )),
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Configuration {
            message: format!("invalid {}: {}", config_path.display(), e),
            hint: None,
        })
    }

    /// The output directory setting, required for packaging.
    pub fn out_dir(&self, project_root: &Path) -> Result<&str> {
        self.out_dir.as_deref().ok_or_else(|| Error::Configuration {
            message: format!(
                "missing \"outDir\" setting in {}",
                project_root.join(BUILD_CONFIG_FILE).display()
            ),
            hint: Some("set \"outDir\" in pcfconfig.json".to_string()),
        })
    }
}

/// Immutable context for one packaging run.
///
/// Carries the publisher identity (read once from the solution manifest
/// template before any mutation) and the resolved output locations. Every
/// pipeline stage receives a shared reference; nothing in the pipeline
/// mutates it.
#[derive(Debug, Clone)]
pub struct PackageContext {
    /// Absolute path of the solution root (directory holding the
    /// descriptor and the skeleton templates).
    pub solution_root: PathBuf,
    /// Absolute path of the package output directory.
    pub output_dir: PathBuf,
    /// Absolute path of the archive file to produce.
    pub archive_file: PathBuf,
    /// Publisher unique name from the solution manifest template.
    pub publisher_name: String,
    /// Publisher customization prefix, the prefix of every qualified name.
    pub publisher_prefix: String,
    /// When set, a non-zero build exit is fatal instead of relying on the
    /// output-directory shape alone.
    pub strict_build: bool,
}

impl PackageContext {
    /// Build the context for a run, reading the publisher record from the
    /// unmodified solution manifest template.
    pub fn new(
        solution_root: PathBuf,
        output_dir: &str,
        archive_file: &str,
        strict_build: bool,
    ) -> Result<Self> {
        let template = solution_root.join(SKELETON_DIR).join("Solution.xml");
        let template_name = template.display().to_string();
        let xml = fs::read_to_string(&template).map_err(|e| Error::Configuration {
            message: format!("cannot read solution template {}: {}", template_name, e),
            hint: Some(format!(
                "the solution root must contain {}/Solution.xml",
                SKELETON_DIR
            )),
        })?;
        let publisher = solution::read_publisher(&xml, &template_name)?;

        Ok(Self {
            output_dir: solution_root.join(output_dir),
            archive_file: solution_root.join(archive_file),
            solution_root,
            publisher_name: publisher.unique_name,
            publisher_prefix: publisher.customization_prefix,
            strict_build,
        })
    }

    /// Path of the solution manifest template.
    pub fn solution_template(&self) -> PathBuf {
        self.solution_root.join(SKELETON_DIR).join("Solution.xml")
    }

    /// Path of the customization registry template.
    pub fn customizations_template(&self) -> PathBuf {
        self.solution_root
            .join(SKELETON_DIR)
            .join("Customizations.xml")
    }

    /// Path of the project descriptor, named after the solution root
    /// directory (`<dirname>.cdsproj`).
    pub fn descriptor_path(&self) -> Result<PathBuf> {
        let dir_name = self
            .solution_root
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Configuration {
                message: format!(
                    "cannot derive a descriptor name from solution root {}",
                    self.solution_root.display()
                ),
                hint: None,
            })?;
        Ok(self.solution_root.join(format!("{}.cdsproj", dir_name)))
    }
}
