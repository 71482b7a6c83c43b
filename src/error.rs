//! # Error Handling
//!
//! Centralized error handling for `solution-packager`, built on `thiserror`.
//!
//! The `Error` enum mirrors the failure taxonomy of the packaging pipeline:
//!
//! - **`Configuration`**: a missing or invalid project descriptor, an empty
//!   project-reference list, or a missing build setting (`outDir`).
//! - **`BuildOutput`**: a sub-project build did not produce the expected
//!   single-folder output (missing, empty, or ambiguous output directory).
//! - **`ManifestParse`**: malformed XML or an unexpected document shape at
//!   any read site (project descriptor, component manifest, or one of the
//!   three package-level documents).
//! - **`ManifestWrite`**: a rewritten package document could not be
//!   serialized or written back.
//! - **`Packaging`**: filesystem copy failures, qualified-name collisions,
//!   and archive write/flush failures.
//!
//! Every error is fatal to the run: the pipeline never retries and never
//! produces a partial package. The `Result<T>` alias is used throughout the
//! library to propagate these errors up to the CLI boundary.

use thiserror::Error;

/// Main error type for solution-packager operations
#[derive(Error, Debug)]
pub enum Error {
    /// The project descriptor, reference list, or a sub-project build
    /// setting is missing or invalid.
    ///
    /// Includes an optional hint about how to fix the configuration.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Configuration {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A sub-project build did not leave its output directory in the
    /// expected shape (exactly one component folder).
    #[error("Build output error for {project}: {message}")]
    BuildOutput { project: String, message: String },

    /// An XML document could not be parsed, or did not have the expected
    /// shape.
    #[error("Manifest parse error in {path}: {message}")]
    ManifestParse { path: String, message: String },

    /// A rewritten package document could not be serialized or written.
    #[error("Manifest write error for {path}: {message}")]
    ManifestWrite { path: String, message: String },

    /// A filesystem copy, naming collision, or archive failure during
    /// package assembly.
    #[error("Packaging error: {message}")]
    Packaging { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
