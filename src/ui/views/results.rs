// LogSift - ui/views/results.rs
//
// Match table (virtual scrolling) above a context pane for the selected
// row, plus export and navigation buttons.

use super::{action_button, Screen};
use crate::app::state::{AppState, View};
use crate::ui::theme;
use crate::util::constants::CONTEXT_TARGET_MARKER;

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn title(&self) -> &'static str {
        "Results"
    }

    fn render(&self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.horizontal(|ui| {
            ui.label(format!("{} match(es)", state.matches.len()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if action_button(ui, "Home") {
                    state.go_home();
                }
                if action_button(ui, "Back") {
                    state.navigate(View::ModeChoice);
                }
                if action_button(ui, "Export JSON") {
                    export_dialog(state, "json");
                }
                if action_button(ui, "Export CSV") {
                    export_dialog(state, "csv");
                }
            });
        });
        ui.separator();

        egui::TopBottomPanel::bottom("context_pane")
            .resizable(true)
            .default_height(theme::CONTEXT_PANE_HEIGHT)
            .show_inside(ui, |ui| render_context(ui, &state.context_text));

        egui::CentralPanel::default().show_inside(ui, |ui| render_table(ui, state));
    }
}

fn render_table(ui: &mut egui::Ui, state: &mut AppState) {
    let total = state.matches.len();
    let mut clicked = None;

    egui::ScrollArea::vertical()
        .id_salt("match_table")
        .auto_shrink([false, false])
        .show_rows(ui, theme::ROW_HEIGHT, total, |ui, range| {
            for idx in range {
                let Some(record) = state.matches.get(idx) else {
                    continue;
                };
                let is_selected = state.selected_match == Some(idx);
                let label = format!(
                    "{:<24} Line {:<7} {}",
                    record.file_display_name, record.line_number, record.text
                );
                let response =
                    ui.selectable_label(is_selected, egui::RichText::new(label).monospace());
                if response.clicked() {
                    clicked = Some(idx);
                }
                response.on_hover_text(record.file_path.display().to_string());
            }
        });

    if let Some(idx) = clicked {
        state.select_match(idx);
    }
}

fn render_context(ui: &mut egui::Ui, text: &str) {
    ui.strong("Context");
    egui::ScrollArea::both()
        .id_salt("context_text")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for line in text.lines() {
                let rich = egui::RichText::new(line).monospace();
                if line.starts_with(CONTEXT_TARGET_MARKER) {
                    ui.label(rich.color(theme::CONTEXT_TARGET_TEXT).strong());
                } else {
                    ui.label(rich);
                }
            }
        });
}

fn export_dialog(state: &mut AppState, extension: &str) {
    let (filter, default_name) = match extension {
        "json" => ("JSON", "matches.json"),
        _ => ("CSV", "matches.csv"),
    };
    if let Some(path) = rfd::FileDialog::new()
        .set_title("Export matches")
        .add_filter(filter, &[extension])
        .set_file_name(default_name)
        .save_file()
    {
        state.export_matches(&path);
    }
}
