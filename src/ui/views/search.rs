// LogSift - ui/views/search.rs
//
// The search flow before results exist: mode choice, manual expression
// entry, the progress screen, and the no-match screen.

use super::{action_button, Screen};
use crate::app::state::{AppState, View};
use crate::ui::theme;

pub struct ModeChoiceScreen;

impl Screen for ModeChoiceScreen {
    fn title(&self) -> &'static str {
        "Choose mode"
    }

    fn render(&self, ui: &mut egui::Ui, state: &mut AppState) {
        selected_files_summary(ui, state);
        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if action_button(ui, "Manual") {
                state.navigate(View::ManualSearch);
            }
            if action_button(ui, "Auto") {
                state.start_auto_scan();
            }
            if action_button(ui, "Home") {
                state.go_home();
            }
        });
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(format!(
                "Auto searches for \"{}\".",
                state.config.auto_search_term
            ))
            .small()
            .weak(),
        );
    }
}

pub struct ManualSearchScreen;

impl Screen for ManualSearchScreen {
    fn title(&self) -> &'static str {
        "Manual search"
    }

    fn on_activate(&self, state: &mut AppState) {
        state.search_input.clear();
    }

    fn render(&self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.label("Search terms (separate several with ',' or ';'):");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.search_input)
                .hint_text("e.g. timeout, E042")
                .desired_width(theme::PANEL_WIDTH),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if action_button(ui, "Start Search") || submitted {
                let raw = state.search_input.clone();
                state.start_scan(&raw);
            }
            if action_button(ui, "Back") {
                state.navigate(View::ModeChoice);
            }
            if action_button(ui, "Home") {
                state.go_home();
            }
        });
    }
}

pub struct AnalyzingScreen;

impl Screen for AnalyzingScreen {
    fn title(&self) -> &'static str {
        "Analyzing..."
    }

    fn render(&self, ui: &mut egui::Ui, state: &mut AppState) {
        let progress = state.progress;
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.add(
                egui::ProgressBar::new(progress.fraction())
                    .desired_width(theme::PROGRESS_WIDTH)
                    .text(format!("{}%", progress.percent())),
            );
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(format!(
                    "{} / {} lines",
                    progress.lines_processed, progress.total_lines
                ))
                .small()
                .weak(),
            );
            ui.add_space(16.0);
            if action_button(ui, "Cancel") {
                state.request_cancel = true;
            }
        });
    }
}

pub struct NothingFoundScreen;

impl Screen for NothingFoundScreen {
    fn title(&self) -> &'static str {
        "Nothing found"
    }

    fn render(&self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.label("No line in the selected files matched the search.");
        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if action_button(ui, "Back") {
                state.navigate(View::ModeChoice);
            }
            if action_button(ui, "Home") {
                state.go_home();
            }
        });
    }
}

fn selected_files_summary(ui: &mut egui::Ui, state: &AppState) {
    ui.label(format!("{} file(s) selected:", state.selected_files.len()));
    egui::ScrollArea::vertical()
        .id_salt("selected_files")
        .max_height(120.0)
        .show(ui, |ui| {
            for path in &state.selected_files {
                ui.label(egui::RichText::new(path.display().to_string()).monospace().small());
            }
        });
}
