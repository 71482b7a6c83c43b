//! Build command implementation
//!
//! The build command executes the full packaging pipeline: resolve the
//! sub-project references from the project descriptor, build every
//! sub-project in parallel, lay out and merge the package documents, and
//! compress the result into the solution archive.

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use solution_packager::builder::NpmBuildRunner;
use solution_packager::config::PackageContext;
use solution_packager::output::{emoji, OutputConfig};
use solution_packager::phases::orchestrator;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Output directory for the assembled package, relative to the
    /// solution root
    #[arg(short, long, value_name = "DIR", default_value = "package")]
    pub output: String,

    /// File name of the solution archive, relative to the solution root
    #[arg(short, long, value_name = "NAME", default_value = "Solution.zip")]
    pub file: String,

    /// Solution root directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub solution_dir: Option<PathBuf>,

    /// Treat a non-zero sub-project build exit as fatal
    #[arg(long)]
    pub strict: bool,

    /// Show detailed progress information
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the build command
pub fn execute(args: BuildArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();

    let solution_dir = match args.solution_dir {
        Some(dir) => dir,
        None => env::current_dir().context("cannot determine current directory")?,
    };
    let solution_root = solution_dir
        .canonicalize()
        .with_context(|| format!("solution directory not found: {}", solution_dir.display()))?;

    if !args.quiet {
        println!(
            "{} Packaging solution: {}",
            emoji(output, "📦", "[PACK]"),
            solution_root.display()
        );
        println!();
    }

    let ctx = PackageContext::new(solution_root, &args.output, &args.file, args.strict)?;
    if !args.quiet && args.verbose {
        println!("   publisher: {} ({})", ctx.publisher_name, ctx.publisher_prefix);
        println!("   output directory: {}", ctx.output_dir.display());
        println!("   archive file: {}", ctx.archive_file.display());
        println!();
    }
    let runner = NpmBuildRunner;

    match orchestrator::execute_package(&ctx, &runner) {
        Ok(summary) => {
            let duration = start_time.elapsed();

            if !args.quiet {
                println!(
                    "{} Packaged successfully in {:.2}s",
                    emoji(output, "✅", "[OK]"),
                    duration.as_secs_f64()
                );
                println!("   {} component(s):", summary.components.len());
                for component in &summary.components {
                    println!("     {}", component);
                }
                println!(
                    "   {} file(s) archived to: {}",
                    summary.archived_files,
                    summary.archive.display()
                );
            }

            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                println!("{} Packaging failed", emoji(output, "❌", "[FAIL]"));
                println!();
            }
            Err(e.into())
        }
    }
}
