//! Recursive directory processing
//!
//! Walks a directory tree, skipping ignored directory names, localizes
//! every file matching the extension filter, and rewrites files in place
//! when their content changed. A dry
//! run reports what would change without writing anything. Each file is an
//! independent pipeline invocation against the shared read-only dictionary;
//! a scan error in one file never corrupts it (no partial output) and never
//! stops the rest of the walk.

use crate::dictionary::Dictionary;
use crate::error::ScanError;
use crate::localize_source;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Why a single file could not be processed
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Counters for one directory run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Files matching the extension filter that were read and scanned
    pub files_scanned: usize,
    /// Files whose localized content differs from the original
    pub files_changed: usize,
    /// Files actually rewritten (zero in a dry run)
    pub files_written: usize,
    /// Files that could not be read, scanned, or written
    pub files_errored: usize,
    /// Directory entries that could not be walked
    pub walk_errors: usize,
}

/// Reject extension filters containing globs or a leading dot
///
/// Extensions are given bare ("js", "json"); "*.js" and ".js" are refused
/// so the filter semantics stay unambiguous.
pub fn validate_file_extensions(file_extensions: &[String]) -> bool {
    file_extensions
        .iter()
        .all(|ext| !ext.starts_with('.') && !ext.contains('*'))
}

fn is_directory_ignored(entry: &DirEntry, ignored_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| ignored_dirs.iter().any(|dir| name == dir))
            .unwrap_or(false)
}

fn is_matching_file(file_name: Option<&str>, file_extensions: &[String]) -> bool {
    match file_name {
        Some(name) => {
            file_extensions.is_empty()
                || file_extensions
                    .iter()
                    .any(|ext| name.ends_with(&format!(".{ext}")))
        }
        None => false,
    }
}

/// Localize a single file, rewriting it in place when it changed
///
/// Returns whether the localized content differs from the original. With
/// `dry_run` set, nothing is written.
pub fn process_file(
    path: &Path,
    dictionary: &Dictionary,
    dry_run: bool,
) -> Result<bool, ProcessError> {
    let source = fs::read_to_string(path)?;
    let output = localize_source(&source, dictionary)?;

    if output == source {
        debug!(path = %path.display(), "no translatable words matched");
        return Ok(false);
    }

    info!(path = %path.display(), "translatable words found");
    if !dry_run {
        fs::write(path, output)?;
        info!(path = %path.display(), "file rewritten");
    }
    Ok(true)
}

/// Walk `directory` recursively and localize every matching file
///
/// Directories whose name appears in `ignored_dirs` are pruned without
/// descending into them (typically `node_modules` or `.git`).
pub fn process_directory(
    directory: &Path,
    file_extensions: &[String],
    ignored_dirs: &[String],
    dictionary: &Dictionary,
    dry_run: bool,
) -> ProcessSummary {
    let mut summary = ProcessSummary::default();

    let walker = WalkDir::new(directory)
        .into_iter()
        .filter_entry(|entry| !is_directory_ignored(entry, ignored_dirs));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "could not read directory entry");
                summary.walk_errors += 1;
                continue;
            }
        };

        if !entry.file_type().is_file()
            || !is_matching_file(entry.file_name().to_str(), file_extensions)
        {
            continue;
        }

        summary.files_scanned += 1;
        match process_file(entry.path(), dictionary, dry_run) {
            Ok(true) => {
                summary.files_changed += 1;
                if !dry_run {
                    summary.files_written += 1;
                }
            }
            Ok(false) => {}
            Err(error) => {
                warn!(path = %entry.path().display(), %error, "could not process file");
                summary.files_errored += 1;
            }
        }
    }

    summary
}
