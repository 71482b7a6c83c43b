//! Implementation of the 6 stages of the packaging pipeline.
//!
//! ## Overview
//!
//! A packaging run follows 6 stages:
//! 1. Resolving - Read the project descriptor and resolve sub-project roots
//! 2. Building - Build every sub-project in parallel and extract identities
//! 3. Layout: Prepare - Clear the output directory for a fresh assembly
//! 4. Layout: Place - Copy skeleton templates and component build outputs
//! 5. Merging - Rewrite the three package documents with the component set
//! 6. Archiving - Compress the output directory into the solution archive
//!
//! Data flows one direction through the stages: reference list ->
//! component identities -> merged documents and copied files -> archive.
//! Any error aborts the whole run; the archive file is only created after
//! every earlier stage succeeded, so a failed run never leaves a
//! half-written archive.

use std::path::PathBuf;

use crate::manifest;

// Stage modules
pub mod archive;
pub mod build;
pub mod layout;
pub mod merge;
pub mod orchestrator;
pub mod resolve;

// Stage aliases, in pipeline order
pub use archive as phase5;
pub use build as phase2;
pub use layout as phase3;
pub use merge as phase4;
pub use resolve as phase1;

/// A resolved reference to one sub-project.
///
/// Immutable once resolved; one per `ProjectReference` entry in the
/// descriptor, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubProjectReference {
    /// Absolute path of the sub-project root directory.
    pub root: PathBuf,
}

impl SubProjectReference {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Short label for log and error messages.
    pub fn label(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }
}

/// Identity of one built component, derived once per sub-project build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentIdentity {
    /// Component name: the sole folder name under the build output root.
    pub name: String,
    /// Namespace declared in the component manifest.
    pub namespace: String,
    /// Absolute path of the build output root.
    pub path: PathBuf,
}

impl ComponentIdentity {
    /// The component's qualified name under the given publisher prefix.
    pub fn qualified_name(&self, prefix: &str) -> String {
        manifest::qualified_name(prefix, &self.namespace, &self.name)
    }

    /// Directory holding the component's build artifacts (the lone folder
    /// inside the build output root).
    pub fn component_dir(&self) -> PathBuf {
        self.path.join(&self.name)
    }
}

#[cfg(test)]
mod stage_tests {
    use super::*;

    #[test]
    fn test_sub_project_reference_label() {
        let reference = SubProjectReference::new(PathBuf::from("/work/components/alpha"));
        assert_eq!(reference.label(), "alpha");
    }

    #[test]
    fn test_component_identity_qualified_name() {
        let identity = ComponentIdentity {
            name: "Alpha".to_string(),
            namespace: "ns1".to_string(),
            path: PathBuf::from("/work/components/alpha/out"),
        };
        assert_eq!(identity.qualified_name("pcf"), "pcf_ns1.Alpha");
    }

    #[test]
    fn test_component_identity_component_dir() {
        let identity = ComponentIdentity {
            name: "Alpha".to_string(),
            namespace: "ns1".to_string(),
            path: PathBuf::from("/work/components/alpha/out"),
        };
        assert_eq!(
            identity.component_dir(),
            PathBuf::from("/work/components/alpha/out/Alpha")
        );
    }
}
