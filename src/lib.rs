//! # Solution Packager Library
//!
//! This library provides the core functionality for assembling a component
//! solution package: resolving sub-project references from a project
//! descriptor, building every sub-project, merging the resulting component
//! identities into the package-level documents, and compressing the result
//! into a distributable archive. It is designed to be used by the
//! `solution-packager` command-line tool but can also be embedded in other
//! build tooling.
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: Typed views over the project descriptor
//!   and the per-sub-project build configuration, plus the immutable
//!   `PackageContext` threaded through every stage.
//! - **Build invocation (`builder`)**: The `BuildRunner` seam over the
//!   external per-sub-project build command, mockable in tests.
//! - **Manifests (`manifest`)**: Readers and rewriters for the XML
//!   documents the packager touches: component manifests, the solution
//!   manifest, the customization registry, and the content-type index.
//! - **Phases (`phases`)**: The staged pipeline that orchestrates a
//!   packaging run end to end.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::execute_package`, which
//! executes the following high-level steps:
//!
//! 1.  **Resolving**: Read the project descriptor and resolve the ordered
//!     sub-project reference list.
//! 2.  **Building**: Build every sub-project in parallel and extract one
//!     component identity per sub-project.
//! 3.  **Layout**: Reset the output directory, copy the skeleton templates
//!     and every component's build artifacts into place.
//! 4.  **Merging**: Rewrite the three package documents with the component
//!     set under their qualified names.
//! 5.  **Archiving**: Compress the output directory into the solution
//!     archive.

pub mod builder;
pub mod config;
pub mod error;
pub mod manifest;
pub mod output;
pub mod phases;
