//! Conversion driver.
//!
//! Walks a directory of `.usfm` files, parses each one, resolves the
//! canonical book number, and upserts the verses into the BBLX module
//! database. Parse-level problems are collected across all files and
//! reported once at the end of the run.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::books;
use crate::db::bblx::BblxDbHandle;
use crate::logger::{info, warn};
use crate::types::{ConvertError, ModuleMetadata, RunReport};
use crate::usfm;
use crate::USFM_EXTENSION;

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub metadata: ModuleMetadata,
}

/// List the `.usfm` files directly inside `input_dir`.
///
/// Directory listing order is filesystem-dependent, so the result is
/// sorted by path for deterministic processing order.
fn usfm_files(input_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == USFM_EXTENSION)
                .unwrap_or(false)
        })
        .collect();

    files.sort();

    files
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run a full conversion.
///
/// Returns `Ok` with a [`RunReport`] when the run completed; the report
/// carries any recoverable errors (malformed markers, unknown book
/// codes). Precondition violations and I/O or database faults return a
/// [`ConvertError`] instead, and no further files are attempted.
///
/// The preconditions are checked before the output store is touched, so
/// a fatal precondition leaves no partially written module behind.
pub fn run(options: &ConvertOptions) -> Result<RunReport, ConvertError> {
    let input_dir = &options.input_dir;

    if !input_dir.is_dir() {
        return Err(ConvertError::InputDirMissing(input_dir.clone()));
    }

    let files = usfm_files(input_dir);
    if files.is_empty() {
        return Err(ConvertError::NoUsfmFiles(input_dir.clone()));
    }

    let db = BblxDbHandle::open_or_create(&options.output_file)?;
    db.insert_details(&options.metadata)?;

    let mut report = RunReport::default();

    for file_path in &files {
        let name = file_name_of(file_path);
        info(&format!("Processing {} ...", name));

        let (verses, issues) =
            usfm::parse_file(file_path).map_err(|e| ConvertError::ReadFailed {
                path: file_path.clone(),
                source: e,
            })?;

        for issue in &issues {
            warn(&issue.to_string());
        }
        report.errors.extend(issues.iter().map(|i| i.to_string()));

        // Book resolution needs a first verse to read the book code from.
        // A file with zero verses contributes nothing beyond whatever the
        // parser already reported.
        let Some(first) = verses.first() else {
            continue;
        };

        let book_number = books::book_number(&first.book_id);
        if book_number == books::UNRESOLVED_BOOK {
            let msg = format!("Unknown book ID {} in {}", first.book_id, name);
            warn(&msg);
            report.errors.push(msg);
            continue;
        }

        let inserted = db.upsert_verses(book_number, &verses)?;
        report.verses_inserted += inserted;
        report.files_processed += 1;
    }

    info(&format!(
        "Done: {} files, {} verses, {} errors",
        report.files_processed,
        report.verses_inserted,
        report.errors.len()
    ));

    Ok(report)
}
