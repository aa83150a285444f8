//! USFM parsing logic.
//!
//! Parses the line-oriented backslash-marker format into verse records.
//! One logical book per file, one pass over the lines, no lookahead.

use std::fs;
use std::io;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{ParseIssue, VerseRecord};

lazy_static! {
    // Chapter and verse tokens must be digits only, "3b" or "X" are rejected.
    static ref RE_NUMBER: Regex = Regex::new(r"^\d+$").expect("Invalid regex");
}

/// Markers which carry book metadata and contribute no scripture text.
/// Matched as line prefixes.
static METADATA_MARKERS: [&'static str; 9] = [
    "\\id", "\\ide", "\\usfm", "\\h", "\\toc1", "\\toc2", "\\toc3", "\\mt1", "\\mt2",
];

/// Structural role of one trimmed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind<'a> {
    /// Metadata marker line. Carries the book code token when the line
    /// is an `\id` line that has one.
    Metadata { book_code: Option<&'a str> },
    /// `\c` marker with its raw chapter number token.
    Chapter { number: &'a str },
    /// `\v` marker with its raw verse number token and the rest of the line.
    Verse { number: &'a str, rest: &'a str },
    /// `\p` or `\s1` prefixed line. Word boundary only, content dropped.
    ParagraphBreak,
    /// Continuation text or an unrecognized marker, buffered verbatim.
    PlainText { text: &'a str },
}

fn classify(line: &str) -> LineKind<'_> {
    if METADATA_MARKERS.iter().any(|m| line.starts_with(m)) {
        let book_code = if line.starts_with("\\id ") {
            line.split_whitespace().nth(1)
        } else {
            None
        };
        return LineKind::Metadata { book_code };
    }

    if let Some(remainder) = line.strip_prefix("\\c ") {
        // Tolerate extra whitespace after the marker, take the first token.
        let number = remainder.split_whitespace().next().unwrap_or("");
        return LineKind::Chapter { number };
    }

    if let Some(remainder) = line.strip_prefix("\\v ") {
        // Single-space split: `\v  1 text` yields an empty number token,
        // which is then reported as invalid.
        let mut parts = remainder.splitn(2, ' ');
        let number = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("");
        return LineKind::Verse { number, rest };
    }

    if line.starts_with("\\p") || line.starts_with("\\s1") {
        return LineKind::ParagraphBreak;
    }

    LineKind::PlainText { text: line }
}

fn parse_number(token: &str) -> Option<i32> {
    if RE_NUMBER.is_match(token) {
        // Out-of-range numbers are treated like any other invalid token.
        token.parse().ok()
    } else {
        None
    }
}

/// Mutable parsing state, created fresh per file.
#[derive(Debug, Default)]
struct ParserState {
    book_id: Option<String>,
    chapter: i32,
    verse: i32,
    buffer: Vec<String>,
}

impl ParserState {
    /// Emit the currently open verse, if there is one.
    ///
    /// A verse is only emitted when a verse number is open (> 0) and at
    /// least one text fragment accumulated. When no verse is open the
    /// buffer is kept: stray text ahead of the first `\v` merges into it.
    fn close_verse(&mut self, verses: &mut Vec<VerseRecord>) {
        if !self.buffer.is_empty() && self.verse > 0 {
            verses.push(VerseRecord {
                book_id: self.book_id.clone().unwrap_or_default(),
                chapter: self.chapter,
                verse: self.verse,
                text: self.buffer.join(" "),
            });
            self.buffer.clear();
        }
    }
}

/// Parse USFM text into verse records and recoverable parse issues.
///
/// `file_label` only appears in issue messages. Verses are returned in
/// encounter order, issues in encounter order. A malformed chapter or
/// verse line is recorded and dropped, parsing continues with the state
/// unchanged.
pub fn parse_str(content: &str, file_label: &str) -> (Vec<VerseRecord>, Vec<ParseIssue>) {
    let mut state = ParserState::default();
    let mut verses: Vec<VerseRecord> = Vec::new();
    let mut issues: Vec<ParseIssue> = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        match classify(line) {
            LineKind::Metadata { book_code } => {
                // First \id wins, later \id lines are tolerated silently.
                if state.book_id.is_none() {
                    if let Some(code) = book_code {
                        state.book_id = Some(code.to_string());
                    }
                }
            }

            LineKind::Chapter { number } => {
                state.close_verse(&mut verses);
                match parse_number(number) {
                    Some(n) => {
                        state.chapter = n;
                        state.verse = 0;
                    }
                    None => {
                        issues.push(ParseIssue::new(
                            file_label,
                            line_num,
                            format!("Invalid chapter number '{}'", number),
                        ));
                    }
                }
            }

            LineKind::Verse { number, rest } => {
                state.close_verse(&mut verses);
                match parse_number(number) {
                    Some(n) => {
                        state.verse = n;
                        // Seed the buffer even when the rest is empty, so
                        // that a bare `\v 5` still emits once closed.
                        state.buffer.push(rest.to_string());
                    }
                    None => {
                        issues.push(ParseIssue::new(
                            file_label,
                            line_num,
                            format!("Invalid verse number '{}'", number),
                        ));
                    }
                }
            }

            LineKind::ParagraphBreak => {
                // No text contribution. The word boundary between the
                // surrounding fragments comes from the space-join at
                // verse close.
            }

            LineKind::PlainText { text } => {
                state.buffer.push(text.to_string());
            }
        }
    }

    state.close_verse(&mut verses);

    (verses, issues)
}

/// Parse a single `.usfm` file. The file path becomes the issue label.
pub fn parse_file(path: &Path) -> io::Result<(Vec<VerseRecord>, Vec<ParseIssue>)> {
    let content = fs::read_to_string(path)?;
    let label = path.display().to_string();
    Ok(parse_str(&content, &label))
}
