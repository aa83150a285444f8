use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// A single verse extracted from a USFM file.
///
/// `book_id` holds the raw three-letter USFM code from the file's `\id`
/// line, or an empty string when no `\id` line was seen. Chapter 0 means
/// the verse appeared before any `\c` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub book_id: String,
    pub chapter: i32,
    pub verse: i32,
    pub text: String,
}

/// A recoverable problem found while parsing one line of a USFM file.
///
/// Issues are collected, never thrown: the parser keeps going with the
/// next line and the offending line contributes no text.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message} at line {line} in {file}")]
pub struct ParseIssue {
    pub file: String,
    pub line: usize,
    pub message: String,
}

impl ParseIssue {
    pub fn new(file: &str, line: usize, message: String) -> Self {
        ParseIssue {
            file: file.to_string(),
            line,
            message,
        }
    }
}

/// The values written to the one-row-per-run `Details` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub description: String,
    pub abbreviation: String,
    pub comments: String,
    pub version: String,
    pub publish_date: String,
    pub publisher: String,
    pub creator: String,
    pub language: String,
}

pub static DEFAULT_COMMENTS: &'static str = "Generated from USFM files";
pub static DEFAULT_VERSION: &'static str = "1.0";
pub static DEFAULT_PUBLISH_DATE: &'static str = "2025-09-03";
pub static DEFAULT_PUBLISHER: &'static str = "bblx";
pub static DEFAULT_CREATOR: &'static str = "bblx";

impl ModuleMetadata {
    pub fn new(description: &str, abbreviation: &str, language: &str) -> Self {
        ModuleMetadata {
            description: description.to_string(),
            abbreviation: abbreviation.to_string(),
            comments: DEFAULT_COMMENTS.to_string(),
            version: DEFAULT_VERSION.to_string(),
            publish_date: DEFAULT_PUBLISH_DATE.to_string(),
            publisher: DEFAULT_PUBLISHER.to_string(),
            creator: DEFAULT_CREATOR.to_string(),
            language: language.to_string(),
        }
    }
}

/// Summary of a conversion run.
///
/// A run either succeeds cleanly (`errors` is empty), completes with
/// recoverable errors, or fails outright with a `ConvertError` before a
/// report exists. The three outcomes are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub files_processed: usize,
    pub verses_inserted: usize,
    pub errors: Vec<String>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn save_json(&self, path: &Path) -> Result<(), String> {
        let contents = match serde_json::to_string_pretty(self) {
            Ok(s) => s,
            Err(e) => return Err(format!("Failed to serialize report: {}", e)),
        };

        let mut file = match File::create(path) {
            Ok(file) => file,
            Err(e) => return Err(format!("Failed to create file: {}", e)),
        };

        match file.write_all(contents.as_bytes()) {
            Ok(_) => Ok(()),
            Err(e) => Err(format!("Failed to write file: {}", e)),
        }
    }
}

/// Fatal conversion failures. Parse-level problems are not represented
/// here, they are collected into the RunReport instead.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Input directory does not exist: {0:?}")]
    InputDirMissing(PathBuf),

    #[error("No .usfm files found in the input directory: {0:?}")]
    NoUsfmFiles(PathBuf),

    #[error("Failed to read {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Db(#[from] anyhow::Error),
}
