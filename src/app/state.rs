// LogSift - app/state.rs
//
// Application state management. Holds the selected files, the active scan
// session, results, lookup state, and navigation between views.
// Owned by the eframe::App implementation; free of egui so the whole
// workflow is testable headlessly.

use crate::app::context;
use crate::app::mapping_store::LoadedMapping;
use crate::app::scan::{partition_by_extension, ScanSession};
use crate::core::export;
use crate::core::model::{MatchRecord, ResolveResult, ScanProgress, StepOutcome};
use crate::core::resolver;
use crate::core::search::SearchExpression;
use crate::platform::config::AppConfig;
use std::path::{Path, PathBuf};

/// Placeholder shown in the context pane before a match is selected.
pub const CONTEXT_PLACEHOLDER: &str = "> Log File <";

/// The closed set of screens the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Help,
    About,
    ModeChoice,
    ManualSearch,
    Analyzing,
    NothingFound,
    Results,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,

    /// Shared, load-once mapping table.
    pub mapping: &'static LoadedMapping,

    /// Screen currently shown.
    pub view: View,

    /// Navigation requested by a panel, applied at the start of the next frame.
    pub pending_view: Option<View>,

    /// Log files accepted for scanning, in selection order.
    pub selected_files: Vec<PathBuf>,

    /// Manual search input.
    pub search_input: String,

    /// Help view input and last lookup.
    pub lookup_input: String,
    pub lookup_result: Option<ResolveResult>,

    /// Active scan, if any.
    pub session: Option<ScanSession>,
    pub progress: ScanProgress,

    /// Set by the Cancel button; honoured at the top of the next tick.
    pub request_cancel: bool,

    /// Matches of the most recent completed (or failed) scan.
    pub matches: Vec<MatchRecord>,
    pub selected_match: Option<usize>,
    pub context_text: String,

    /// Modal message for the operator (validation failures, scan errors).
    pub notice: Option<String>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings accumulated this run.
    pub warnings: Vec<String>,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state.
    pub fn new(config: AppConfig, mapping: &'static LoadedMapping, debug_mode: bool) -> Self {
        let mut warnings = Vec::new();
        if let Some(w) = &mapping.warning {
            warnings.push(w.clone());
        }
        Self {
            config,
            mapping,
            view: View::Home,
            pending_view: None,
            selected_files: Vec::new(),
            search_input: String::new(),
            lookup_input: String::new(),
            lookup_result: None,
            session: None,
            progress: ScanProgress::default(),
            request_cancel: false,
            matches: Vec::new(),
            selected_match: None,
            context_text: CONTEXT_PLACEHOLDER.to_string(),
            notice: mapping.warning.clone(),
            status_message: "Ready. Use Search File to pick log files.".to_string(),
            warnings,
            debug_mode,
        }
    }

    /// Request a switch to `view` at the next frame.
    pub fn navigate(&mut self, view: View) {
        self.pending_view = Some(view);
    }

    /// Accept a file selection from the picker.
    ///
    /// Files without an accepted extension are dropped. If none remain, the
    /// operator is told and nothing changes.
    pub fn select_files(&mut self, files: Vec<PathBuf>) {
        if files.is_empty() {
            self.selected_files.clear();
            return;
        }

        let (accepted, rejected) = partition_by_extension(files, &self.config.file_extensions);
        if accepted.is_empty() {
            self.notice = Some(format!(
                "Please select only {} files.",
                self.extension_list()
            ));
            return;
        }
        for path in &rejected {
            let msg = format!("'{}' skipped: not a log file", path.display());
            tracing::warn!("{}", msg);
            self.warnings.push(msg);
        }

        tracing::info!(files = accepted.len(), "Log files selected");
        self.status_message = format!("{} file(s) selected.", accepted.len());
        self.selected_files = accepted;
        self.navigate(View::ModeChoice);
    }

    /// Start scanning the selected files for `raw_expression`.
    ///
    /// On failure the operator sees the reason and stays where they were.
    pub fn start_scan(&mut self, raw_expression: &str) {
        let started = SearchExpression::parse(raw_expression)
            .and_then(|expr| ScanSession::prepare(self.selected_files.clone(), expr));

        match started {
            Ok(session) => {
                self.progress = session.progress();
                self.session = Some(session);
                self.request_cancel = false;
                self.matches.clear();
                self.selected_match = None;
                self.context_text = CONTEXT_PLACEHOLDER.to_string();
                self.status_message = format!("Analyzing for \"{}\"...", raw_expression.trim());
                self.navigate(View::Analyzing);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Scan not started");
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Start an Auto-mode scan with the configured fixed expression.
    pub fn start_auto_scan(&mut self) {
        let term = self.config.auto_search_term.clone();
        self.start_scan(&term);
    }

    /// One scheduler tick: honour a pending cancel, then run up to `budget`
    /// steps of the active session.
    ///
    /// Returns true while the scan still needs more ticks.
    pub fn tick_scan(&mut self, budget: usize) -> bool {
        if self.request_cancel {
            self.request_cancel = false;
            self.cancel_scan();
            return false;
        }

        let Some(session) = self.session.as_mut() else {
            return false;
        };

        for _ in 0..budget.max(1) {
            match session.step() {
                StepOutcome::InProgress(progress) => self.progress = progress,
                StepOutcome::Done(matches) => {
                    self.progress = session.progress();
                    self.finish_scan(matches, None);
                    return false;
                }
                StepOutcome::Failed { error, matches } => {
                    self.progress = session.progress();
                    self.finish_scan(matches, Some(error.to_string()));
                    return false;
                }
                StepOutcome::Inactive(_) => {
                    self.session = None;
                    return false;
                }
            }
        }
        true
    }

    /// Cancel the active scan and return to the mode choice.
    pub fn cancel_scan(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }
        self.matches.clear();
        self.progress = ScanProgress::default();
        self.status_message = "Scan cancelled.".to_string();
        self.navigate(View::ModeChoice);
    }

    fn finish_scan(&mut self, matches: Vec<MatchRecord>, failure: Option<String>) {
        self.session = None;
        self.status_message = match &failure {
            Some(error) => format!("Scan stopped: {error}. Showing {} match(es) found so far.", matches.len()),
            None => format!("Scan complete: {} match(es).", matches.len()),
        };
        if let Some(error) = failure {
            self.notice = Some(error.clone());
            self.warnings.push(error);
        }
        self.matches = matches;
        self.selected_match = None;
        self.context_text = CONTEXT_PLACEHOLDER.to_string();

        if self.matches.is_empty() {
            self.navigate(View::NothingFound);
        } else {
            self.navigate(View::Results);
        }
    }

    /// Look up the Help view's input in the mapping table.
    pub fn lookup(&mut self) {
        let result = resolver::resolve(&self.mapping.table, &self.lookup_input);
        if result == ResolveResult::InvalidInput {
            self.notice = Some("Please enter an error code.".to_string());
        }
        self.lookup_result = Some(result);
    }

    /// Select a result row and load its context.
    pub fn select_match(&mut self, index: usize) {
        let Some(record) = self.matches.get(index) else {
            return;
        };
        self.selected_match = Some(index);
        self.context_text = match context::extract(
            &record.file_path,
            record.line_number,
            self.config.context_radius,
        ) {
            Ok(block) => block.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Context unavailable");
                e.to_string()
            }
        };
    }

    /// Write the current matches to `path`.
    pub fn export_matches(&mut self, path: &Path) {
        match export::export_to_file(&self.matches, path) {
            Ok(count) => {
                self.status_message = format!("Exported {count} match(es) to {}", path.display());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Forget the file selection and go back to the start.
    pub fn go_home(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }
        self.selected_files.clear();
        self.matches.clear();
        self.selected_match = None;
        self.navigate(View::Home);
    }

    /// Extensions formatted for messages, e.g. ".log".
    pub fn extension_list(&self) -> String {
        self.config
            .file_extensions
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The selected match, if any.
    pub fn selected_record(&self) -> Option<&MatchRecord> {
        self.selected_match.and_then(|idx| self.matches.get(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapping::MappingTable;
    use crate::core::model::RawMappingRecord;

    fn leak_mapping(table: MappingTable) -> &'static LoadedMapping {
        Box::leak(Box::new(LoadedMapping {
            table,
            warning: None,
        }))
    }

    fn state() -> AppState {
        AppState::new(AppConfig::default(), leak_mapping(MappingTable::empty()), false)
    }

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_select_files_rejects_non_log_selection() {
        let mut s = state();
        s.select_files(vec![PathBuf::from("/tmp/readme.txt")]);
        assert!(s.selected_files.is_empty());
        assert_eq!(s.notice.as_deref(), Some("Please select only .log files."));
        assert_eq!(s.pending_view, None);
    }

    #[test]
    fn test_select_files_drops_others_and_navigates() {
        let mut s = state();
        s.select_files(vec![PathBuf::from("/tmp/a.log"), PathBuf::from("/tmp/b.txt")]);
        assert_eq!(s.selected_files, vec![PathBuf::from("/tmp/a.log")]);
        assert_eq!(s.warnings.len(), 1);
        assert_eq!(s.pending_view, Some(View::ModeChoice));
    }

    #[test]
    fn test_tick_scan_to_results_and_context() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.log", "ok\nALARM high temp\nok\n");
        let mut s = state();
        s.select_files(vec![a]);
        s.start_auto_scan();
        assert_eq!(s.pending_view, Some(View::Analyzing));

        let mut ticks = 0;
        while s.tick_scan(2) {
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(s.progress.percent(), 100);
        assert_eq!(s.pending_view, Some(View::Results));
        assert_eq!(s.matches.len(), 1);

        s.select_match(0);
        assert!(s.context_text.contains(">>> Line 2: ALARM high temp"));
        assert!(s.context_text.contains("    Line 1: ok"));
    }

    #[test]
    fn test_no_matches_routes_to_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.log", "quiet\n");
        let mut s = state();
        s.select_files(vec![a]);
        s.start_scan("error");
        while s.tick_scan(100) {}
        assert_eq!(s.pending_view, Some(View::NothingFound));
    }

    #[test]
    fn test_cancel_flag_checked_at_tick() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.log", "x\nx\nx\nx\n");
        let mut s = state();
        s.select_files(vec![a]);
        s.start_scan("x");
        assert!(s.tick_scan(2));

        s.request_cancel = true;
        assert!(!s.tick_scan(2));
        assert!(s.session.is_none());
        assert!(s.matches.is_empty());
        assert_eq!(s.pending_view, Some(View::ModeChoice));
    }

    #[test]
    fn test_empty_search_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.log", "x\n");
        let mut s = state();
        s.select_files(vec![a]);
        s.pending_view = None;
        s.start_scan("   ");
        assert!(s.session.is_none());
        assert!(s.notice.is_some());
        assert_eq!(s.pending_view, None);
    }

    #[test]
    fn test_lookup_uses_shared_table() {
        let table = MappingTable::from_records(vec![
            RawMappingRecord::new(Some("E001"), Some("Power Fail"), Some("Restart PSU")),
            RawMappingRecord::new(None, None, Some("Check Fuse")),
        ]);
        let mut s = AppState::new(AppConfig::default(), leak_mapping(table), false);
        s.lookup_input = "E001".to_string();
        s.lookup();
        assert_eq!(
            s.lookup_result,
            Some(ResolveResult::Found {
                cause: "Power Fail".to_string(),
                actions: "Check Fuse\nRestart PSU".to_string(),
            })
        );
    }

    #[test]
    fn test_lookup_without_table() {
        let mut s = state();
        s.lookup_input = "E001".to_string();
        s.lookup();
        assert_eq!(s.lookup_result, Some(ResolveResult::TableUnavailable));
    }
}
