//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `solution-packager` command-line tool. Each subcommand is defined in its
//! own file to keep the logic separated and maintainable.
//!
//! Each command module typically contains an `Args` struct defining the
//! command-specific options, derived using `clap`, and an `execute`
//! function that takes the parsed `Args` and calls into the
//! `solution_packager` library to perform the core logic.

pub mod build;
pub mod completions;
