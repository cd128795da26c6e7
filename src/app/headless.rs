// LogSift - app/headless.rs
//
// Terminal-mode operations behind the CLI flags. Each runs a whole
// operation to completion and reports failures as `LogSiftError`.

use crate::app::context;
use crate::app::scan::{partition_by_extension, ScanSession};
use crate::core::export;
use crate::core::model::{ContextBlock, MatchRecord, StepOutcome};
use crate::core::search::SearchExpression;
use crate::platform::config::AppConfig;
use crate::util::error::{Result, ScanError};
use std::path::{Path, PathBuf};

/// Result of a completed or failed terminal scan.
#[derive(Debug)]
pub struct SearchReport {
    /// Matches in file order then line order. Partial when `failure` is set.
    pub matches: Vec<MatchRecord>,

    /// Set when a file became unreadable mid-scan.
    pub failure: Option<ScanError>,

    /// Inputs dropped for not having an accepted extension.
    pub skipped: Vec<PathBuf>,
}

/// Scan `files` for `raw` to the end.
///
/// Errors before a session exists (no files, empty expression, unreadable
/// file) are returned as `Err`. A mid-scan failure is reported in the
/// `SearchReport` with the matches found before it.
pub fn search(files: Vec<PathBuf>, config: &AppConfig, raw: &str) -> Result<SearchReport> {
    let (files, skipped) = partition_by_extension(files, &config.file_extensions);
    for path in &skipped {
        tracing::warn!(path = %path.display(), "Skipped: not a log file");
    }

    let expression = SearchExpression::parse(raw)?;
    let mut session = ScanSession::prepare(files, expression)?;

    let (matches, failure) = match session.run_to_end(|p| {
        tracing::trace!(percent = p.percent(), "Scan progress");
    }) {
        StepOutcome::Done(matches) => (matches, None),
        StepOutcome::Failed { error, matches } => (matches, Some(error)),
        StepOutcome::InProgress(_) | StepOutcome::Inactive(_) => (Vec::new(), None),
    };

    Ok(SearchReport {
        matches,
        failure,
        skipped,
    })
}

/// Write `matches` to `dest`, format chosen by extension.
pub fn export_matches(matches: &[MatchRecord], dest: &Path) -> Result<usize> {
    Ok(export::export_to_file(matches, dest)?)
}

/// Context window around `line` of `file` with the configured radius.
pub fn context_for(file: &Path, line: u64, config: &AppConfig) -> Result<ContextBlock> {
    Ok(context::extract(file, line, config.context_radius)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::{ExtractError, LogSiftError};

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_search_collects_matches_and_skips_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let log = write(&dir, "a.log", "ok\nALARM E1\n");
        let txt = write(&dir, "b.txt", "ALARM E2\n");

        let report = search(vec![log, txt.clone()], &AppConfig::default(), "alarm").unwrap();
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].line_number, 2);
        assert!(report.failure.is_none());
        assert_eq!(report.skipped, vec![txt]);
    }

    #[test]
    fn test_search_errors_are_scan_errors() {
        let dir = tempfile::tempdir().unwrap();
        let log = write(&dir, "a.log", "x\n");

        let err = search(vec![log], &AppConfig::default(), " ; ").unwrap_err();
        assert!(matches!(err, LogSiftError::Scan(ScanError::EmptySearch)), "got {err:?}");

        let err = search(Vec::new(), &AppConfig::default(), "x").unwrap_err();
        assert!(matches!(err, LogSiftError::Scan(ScanError::NoFiles)), "got {err:?}");
        assert!(err.to_string().starts_with("Scan error: "));
    }

    #[test]
    fn test_context_missing_file_is_extract_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone.log");
        let err = context_for(&gone, 1, &AppConfig::default()).unwrap_err();
        assert!(
            matches!(err, LogSiftError::Extract(ExtractError::NotFound { .. })),
            "got {err:?}"
        );
    }

    #[test]
    fn test_export_error_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing_dir").join("out.csv");
        let err = export_matches(&[], &dest).unwrap_err();
        assert!(matches!(err, LogSiftError::Export(_)), "got {err:?}");
    }
}
