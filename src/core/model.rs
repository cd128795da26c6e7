// LogSift - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use crate::util::error::ScanError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Mapping rows
// =============================================================================

/// One row of the error-code mapping table after forward-fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    /// Trimmed error code; empty when the cell was blank.
    pub error_code: String,

    /// Root cause. `None` only for rows before the first row that named one.
    pub cause: Option<String>,

    /// Trimmed corrective action; empty when the cell was blank.
    pub corrective_action: String,
}

/// Raw cell values of one source row, before trimming and forward-fill.
///
/// Produced by the spreadsheet/CSV adapters in `platform::mapping_source`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMappingRecord {
    pub err_code: Option<String>,
    pub cause: Option<String>,
    pub action: Option<String>,
}

impl RawMappingRecord {
    /// Convenience constructor used by adapters and tests.
    pub fn new(err_code: Option<&str>, cause: Option<&str>, action: Option<&str>) -> Self {
        Self {
            err_code: err_code.map(str::to_string),
            cause: cause.map(str::to_string),
            action: action.map(str::to_string),
        }
    }

    /// True when every cell is absent or whitespace.
    pub fn is_blank(&self) -> bool {
        [&self.err_code, &self.cause, &self.action]
            .iter()
            .all(|cell| cell.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}

/// Where the loaded mapping table came from. Shown in the About view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSourceInfo {
    /// Full path of the file that was read.
    pub path: PathBuf,

    /// Numeric version parsed from `mapping_table<N>`.
    pub version: u64,
}

impl MappingSourceInfo {
    /// File name for display.
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

// =============================================================================
// Cause resolution
// =============================================================================

/// Outcome of looking up an error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    /// The mapping table failed to load (or has no rows).
    TableUnavailable,

    /// The code was blank after trimming.
    InvalidInput,

    /// No row carries this error code.
    NotFound,

    /// The code's cause and the newline-joined, sorted, deduplicated actions.
    Found { cause: String, actions: String },
}

impl ResolveResult {
    /// Cause and action text as the Help view presents them.
    pub fn display_texts(&self) -> (String, String) {
        match self {
            Self::TableUnavailable => (
                "Mapping table not loaded.".to_string(),
                constants::NO_ACTION_TEXT.to_string(),
            ),
            Self::InvalidInput => (
                "Please enter an error code.".to_string(),
                String::new(),
            ),
            Self::NotFound => (
                "No matching error code found.".to_string(),
                constants::NO_ACTION_TEXT.to_string(),
            ),
            Self::Found { cause, actions } => (cause.clone(), actions.clone()),
        }
    }
}

// =============================================================================
// Scan results
// =============================================================================

/// One captured log line that satisfied the search expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// File name without directories, for the results table.
    #[serde(rename = "file")]
    pub file_display_name: String,

    /// Full path, used to reopen the file for context.
    #[serde(rename = "path")]
    pub file_path: PathBuf,

    /// 1-based line number within the file.
    #[serde(rename = "line")]
    pub line_number: u64,

    /// The matched line with surrounding whitespace removed.
    pub text: String,
}

/// Lines processed so far against the total counted before the scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanProgress {
    pub lines_processed: u64,
    pub total_lines: u64,
}

impl ScanProgress {
    /// Integer percentage, floored and clamped to 0..=100.
    ///
    /// A scan over files with no lines at all is reported as complete.
    pub fn percent(&self) -> u8 {
        if self.total_lines == 0 {
            return 100;
        }
        let pct = self.lines_processed.saturating_mul(100) / self.total_lines;
        pct.min(100) as u8
    }

    /// Fraction in 0.0..=1.0 for progress bars.
    pub fn fraction(&self) -> f32 {
        f32::from(self.percent()) / 100.0
    }
}

/// Lifecycle phase of a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Steps are being accepted.
    Scanning,
    /// Every file was exhausted and the matches were handed out.
    Done,
    /// The operator cancelled; matches were discarded.
    Cancelled,
    /// A file became unreadable mid-scan; partial matches were handed out.
    Failed,
}

impl SessionState {
    /// True once no further steps will do any work.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Scanning)
    }
}

/// Result of a single `ScanSession::step` call.
#[derive(Debug)]
pub enum StepOutcome {
    /// Work was done; more remains.
    InProgress(ScanProgress),

    /// Every file has been scanned. Matches are in file order then line order.
    Done(Vec<MatchRecord>),

    /// A file could not be read mid-scan. Matches found before it are kept.
    Failed {
        error: ScanError,
        matches: Vec<MatchRecord>,
    },

    /// The session was already terminal; nothing happened.
    Inactive(SessionState),
}

// =============================================================================
// Context
// =============================================================================

/// One line of a context window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextLine {
    pub line_number: u64,
    pub text: String,
    pub is_target: bool,
}

/// Lines surrounding a match, target line marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBlock {
    pub file_path: PathBuf,
    pub target_line: u64,
    pub lines: Vec<ContextLine>,
}

impl fmt::Display for ContextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            let marker = if line.is_target {
                constants::CONTEXT_TARGET_MARKER
            } else {
                constants::CONTEXT_PLAIN_MARKER
            };
            write!(f, "{marker}Line {}: {}", line.line_number, line.text)?;
        }
        Ok(())
    }
}

/// File name component of `path`, falling back to the full path.
pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_floors_and_clamps() {
        let p = ScanProgress {
            lines_processed: 2,
            total_lines: 3,
        };
        assert_eq!(p.percent(), 66);

        let over = ScanProgress {
            lines_processed: 9,
            total_lines: 8,
        };
        assert_eq!(over.percent(), 100);
    }

    #[test]
    fn test_percent_with_no_lines_is_complete() {
        assert_eq!(ScanProgress::default().percent(), 100);
    }

    #[test]
    fn test_context_block_marks_target() {
        let block = ContextBlock {
            file_path: PathBuf::from("a.log"),
            target_line: 2,
            lines: vec![
                ContextLine {
                    line_number: 1,
                    text: "first".to_string(),
                    is_target: false,
                },
                ContextLine {
                    line_number: 2,
                    text: "second".to_string(),
                    is_target: true,
                },
            ],
        };
        assert_eq!(block.to_string(), "    Line 1: first\n>>> Line 2: second");
    }

    #[test]
    fn test_blank_raw_record() {
        assert!(RawMappingRecord::new(None, Some("  "), None).is_blank());
        assert!(!RawMappingRecord::new(Some("E1"), None, None).is_blank());
    }
}
