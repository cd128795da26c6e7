// LogSift - app/scan.rs
//
// Incremental multi-file scan engine.
//
// Architecture:
//   - `ScanSession::prepare` counts lines across all files up front so
//     progress has a fixed denominator.
//   - `ScanSession::step` performs one bounded unit of work (open one file or
//     consume one line) and returns control to the caller. The GUI calls it
//     from its frame loop; the CLI calls it in a plain loop.
//   - `ScanSession::cancel` may be called between any two steps. Every later
//     step is a no-op reporting the terminal state.
//
// Single-threaded: a session is driven by exactly one caller at a time.

use crate::core::model::{
    display_name, MatchRecord, ScanProgress, SessionState, StepOutcome,
};
use crate::core::search::SearchExpression;
use crate::platform::fs;
use crate::util::error::ScanError;
use std::path::PathBuf;

/// The file currently being scanned, read fully when opened.
#[derive(Debug)]
struct OpenFile {
    path: PathBuf,
    display_name: String,
    lines: Vec<String>,
    /// Number of lines consumed so far; also the last 1-based line number.
    consumed: usize,
}

impl OpenFile {
    fn is_exhausted(&self) -> bool {
        self.consumed >= self.lines.len()
    }
}

/// Cursor state of one scan run.
#[derive(Debug)]
pub struct ScanSession {
    files: Vec<PathBuf>,
    expression: SearchExpression,
    /// Index into `files` of the next file to open.
    next_file: usize,
    current: Option<OpenFile>,
    matches: Vec<MatchRecord>,
    progress: ScanProgress,
    state: SessionState,
}

impl ScanSession {
    /// Count lines across `files` and create a session ready to step.
    ///
    /// Fails with `NoFiles` on an empty list or `Unreadable` naming the first
    /// file that cannot be read. No session exists after a failure.
    pub fn prepare(files: Vec<PathBuf>, expression: SearchExpression) -> Result<Self, ScanError> {
        if files.is_empty() {
            return Err(ScanError::NoFiles);
        }

        let mut total_lines: u64 = 0;
        for path in &files {
            let count = fs::count_lines(path).map_err(|e| ScanError::Unreadable {
                path: path.clone(),
                source: e,
            })?;
            tracing::trace!(file = %path.display(), lines = count, "Counted lines");
            total_lines += count;
        }

        tracing::info!(
            files = files.len(),
            total_lines,
            search = expression.raw(),
            "Scan prepared"
        );

        Ok(Self {
            files,
            expression,
            next_file: 0,
            current: None,
            matches: Vec::new(),
            progress: ScanProgress {
                lines_processed: 0,
                total_lines,
            },
            state: SessionState::Scanning,
        })
    }

    /// Advance the scan by one unit of work.
    pub fn step(&mut self) -> StepOutcome {
        if self.state.is_terminal() {
            return StepOutcome::Inactive(self.state);
        }

        if self.current.is_none() {
            return self.open_next_file();
        }

        if let Some(file) = self.current.as_mut() {
            if let Some(line) = file.lines.get(file.consumed) {
                file.consumed += 1;
                self.progress.lines_processed += 1;

                if self.expression.matches(line) {
                    let text = line.trim().to_string();
                    tracing::trace!(
                        file = %file.display_name,
                        line = file.consumed,
                        text = %preview(&text),
                        "Match"
                    );
                    self.matches.push(MatchRecord {
                        file_display_name: file.display_name.clone(),
                        file_path: file.path.clone(),
                        line_number: file.consumed as u64,
                        text,
                    });
                }
            }

            if file.is_exhausted() {
                tracing::debug!(file = %file.path.display(), lines = file.consumed, "File scanned");
                self.current = None;
            }
        }

        StepOutcome::InProgress(self.progress)
    }

    /// Stop the scan and discard its matches.
    ///
    /// Has no effect on a session that already finished.
    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.state = SessionState::Cancelled;
        self.current = None;
        self.matches.clear();
        tracing::info!(
            lines_processed = self.progress.lines_processed,
            total_lines = self.progress.total_lines,
            "Scan cancelled"
        );
    }

    pub fn progress(&self) -> ScanProgress {
        self.progress
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn expression(&self) -> &SearchExpression {
        &self.expression
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Matches captured so far (empty after cancellation).
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Drive the session until it reaches a terminal outcome.
    ///
    /// `on_progress` sees every intermediate progress value. Used by the
    /// headless CLI and tests; the GUI steps a bounded number per frame.
    pub fn run_to_end<F>(&mut self, mut on_progress: F) -> StepOutcome
    where
        F: FnMut(ScanProgress),
    {
        loop {
            match self.step() {
                StepOutcome::InProgress(p) => on_progress(p),
                outcome => return outcome,
            }
        }
    }

    fn open_next_file(&mut self) -> StepOutcome {
        let Some(path) = self.files.get(self.next_file).cloned() else {
            self.state = SessionState::Done;
            let matches = std::mem::take(&mut self.matches);
            tracing::info!(
                files = self.files.len(),
                lines = self.progress.lines_processed,
                matches = matches.len(),
                "Scan complete"
            );
            return StepOutcome::Done(matches);
        };
        self.next_file += 1;

        match fs::read_lines_lossy(&path) {
            Ok(lines) => {
                tracing::debug!(file = %path.display(), lines = lines.len(), "Opened file");
                let file = OpenFile {
                    display_name: display_name(&path),
                    path,
                    lines,
                    consumed: 0,
                };
                if !file.is_exhausted() {
                    self.current = Some(file);
                }
                StepOutcome::InProgress(self.progress)
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "File unreadable mid-scan");
                self.state = SessionState::Failed;
                StepOutcome::Failed {
                    error: ScanError::ReadFailed { path, source: e },
                    matches: std::mem::take(&mut self.matches),
                }
            }
        }
    }
}

/// Keep only files with an accepted extension.
///
/// Returns the accepted files and the rejected ones, both in input order.
pub fn partition_by_extension(
    files: Vec<PathBuf>,
    extensions: &[String],
) -> (Vec<PathBuf>, Vec<PathBuf>) {
    files
        .into_iter()
        .partition(|p: &PathBuf| fs::has_extension(p, extensions))
}

fn preview(text: &str) -> &str {
    let limit = crate::util::constants::DEBUG_MAX_LINE_PREVIEW;
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_log(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn expr(s: &str) -> SearchExpression {
        SearchExpression::parse(s).unwrap()
    }

    #[test]
    fn test_prepare_rejects_empty_list() {
        let result = ScanSession::prepare(Vec::new(), expr("x"));
        assert!(matches!(result, Err(ScanError::NoFiles)));
    }

    #[test]
    fn test_prepare_reports_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_log(&dir, "a.log", "x\n");
        let missing = dir.path().join("missing.log");
        let result = ScanSession::prepare(vec![good, missing.clone()], expr("x"));
        match result {
            Err(ScanError::Unreadable { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Unreadable, got {other:?}"),
        }
    }

    #[test]
    fn test_two_files_single_match() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_log(&dir, "a.log", "boot\nready\nidle\n");
        let b = write_log(&dir, "b.log", "l1\nl2\nrequest timeout\nl4\nl5\n");

        let mut session = ScanSession::prepare(vec![a, b.clone()], expr("timeout")).unwrap();
        assert_eq!(session.progress().total_lines, 8);

        let mut last = 0u8;
        let outcome = session.run_to_end(|p| {
            assert!(p.percent() >= last);
            assert!(p.percent() <= 100);
            last = p.percent();
        });

        assert_eq!(last, 100);
        assert_eq!(session.progress().lines_processed, 8);
        match outcome {
            StepOutcome::Done(matches) => {
                assert_eq!(matches.len(), 1);
                assert_eq!(matches[0].file_path, b);
                assert_eq!(matches[0].file_display_name, "b.log");
                assert_eq!(matches[0].line_number, 3);
                assert_eq!(matches[0].text, "request timeout");
            }
            other => panic!("expected Done, got {other:?}"),
        }
        assert_eq!(session.state(), SessionState::Done);
    }

    #[test]
    fn test_step_consumes_one_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_log(&dir, "a.log", "one\ntwo\n");
        let mut session = ScanSession::prepare(vec![a], expr("zzz")).unwrap();

        // First step opens the file without consuming a line.
        assert!(matches!(
            session.step(),
            StepOutcome::InProgress(p) if p.lines_processed == 0
        ));
        assert!(matches!(
            session.step(),
            StepOutcome::InProgress(p) if p.lines_processed == 1 && p.percent() == 50
        ));
        assert!(matches!(
            session.step(),
            StepOutcome::InProgress(p) if p.lines_processed == 2 && p.percent() == 100
        ));
        assert!(matches!(session.step(), StepOutcome::Done(ref m) if m.is_empty()));
    }

    #[test]
    fn test_empty_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let empty = write_log(&dir, "empty.log", "");
        let a = write_log(&dir, "a.log", "ALARM raised\n");
        let mut session = ScanSession::prepare(vec![empty, a], expr("alarm")).unwrap();

        match session.run_to_end(|_| {}) {
            StepOutcome::Done(matches) => {
                assert_eq!(matches.len(), 1);
                assert_eq!(matches[0].line_number, 1);
            }
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[test]
    fn test_cancel_discards_matches_and_rejects_steps() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_log(&dir, "a.log", "err\nerr\nerr\nerr\n");
        let mut session = ScanSession::prepare(vec![a], expr("err")).unwrap();

        session.step();
        session.step();
        session.step();
        assert_eq!(session.matches().len(), 2);

        session.cancel();
        assert_eq!(session.state(), SessionState::Cancelled);
        assert!(session.matches().is_empty());

        let before = session.progress();
        assert!(matches!(
            session.step(),
            StepOutcome::Inactive(SessionState::Cancelled)
        ));
        assert_eq!(session.progress(), before);
    }

    #[test]
    fn test_file_removed_mid_scan_keeps_partial_matches() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_log(&dir, "a.log", "fault one\n");
        let b = write_log(&dir, "b.log", "fault two\n");
        let mut session = ScanSession::prepare(vec![a, b.clone()], expr("fault")).unwrap();

        session.step(); // open a
        session.step(); // consume a:1
        std::fs::remove_file(&b).unwrap();

        match session.step() {
            StepOutcome::Failed { error, matches } => {
                assert!(matches!(error, ScanError::ReadFailed { ref path, .. } if *path == b));
                assert_eq!(matches.len(), 1);
                assert_eq!(matches[0].text, "fault one");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(matches!(
            session.step(),
            StepOutcome::Inactive(SessionState::Failed)
        ));
    }

    #[test]
    fn test_partition_by_extension() {
        let files = vec![
            PathBuf::from("/x/a.log"),
            PathBuf::from("/x/b.txt"),
            PathBuf::from("/x/C.LOG"),
        ];
        let (ok, rejected) = partition_by_extension(files, &["log".to_string()]);
        assert_eq!(ok, vec![PathBuf::from("/x/a.log"), PathBuf::from("/x/C.LOG")]);
        assert_eq!(rejected, vec![PathBuf::from("/x/b.txt")]);
    }
}
