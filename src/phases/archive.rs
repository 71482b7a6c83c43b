//! Stage 5: Archiving the assembled package
//!
//! Compresses the output directory into a single zip archive. Entry names
//! are relative to the output directory root with `/` separators, so the
//! archive root holds `solution.xml`, `customizations.xml`,
//! `[Content_Types].xml` and the `Controls/` tree directly. Entries are
//! written in sorted path order, making the archive layout deterministic.
//!
//! The archive file is created only after every earlier stage succeeded;
//! a failed walk or write aborts with the partial file left behind for
//! inspection, never silently truncated.

use std::fs::File;
use std::io;
use std::path::Path;

use log::info;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::PackageContext;
use crate::error::{Error, Result};

/// Executes Stage 5: zip the output directory into the archive file.
/// Returns the number of file entries written.
pub fn execute(ctx: &PackageContext) -> Result<usize> {
    let file = File::create(&ctx.archive_file).map_err(|e| Error::Packaging {
        message: format!(
            "cannot create archive {}: {}",
            ctx.archive_file.display(),
            e
        ),
    })?;

    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut file_count = 0usize;

    let walker = WalkDir::new(&ctx.output_dir)
        .min_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| Error::Packaging {
            message: format!("cannot walk {}: {}", ctx.output_dir.display(), e),
        })?;
        let name = entry_name(&ctx.output_dir, entry.path())?;

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", name), options)
                .map_err(|e| archive_err(&name, e))?;
        } else {
            zip.start_file(name.as_str(), options)
                .map_err(|e| archive_err(&name, e))?;
            let mut source = File::open(entry.path())?;
            io::copy(&mut source, &mut zip).map_err(|e| archive_err(&name, e))?;
            file_count += 1;
        }
    }

    let file = zip.finish().map_err(|e| Error::Packaging {
        message: format!("cannot finalize archive: {}", e),
    })?;
    file.sync_all()?;

    info!(
        "archived {} file(s) into {}",
        file_count,
        ctx.archive_file.display()
    );
    Ok(file_count)
}

/// Archive entry name for a path inside the output directory: relative,
/// `/`-separated regardless of platform.
fn entry_name(output_dir: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(output_dir).map_err(|e| Error::Packaging {
        message: format!("cannot relativize {}: {}", path.display(), e),
    })?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::Packaging {
            message: format!("archive entry {} is not valid UTF-8", relative.display()),
        })?;
    Ok(parts.join("/"))
}

fn archive_err(name: &str, error: impl std::fmt::Display) -> Error {
    Error::Packaging {
        message: format!("cannot archive {}: {}", name, error),
    }
}
