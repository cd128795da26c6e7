// LogSift - ui/views/header.rs
//
// Top bar shared by every view: Search File / Help / About, with the
// button of the current section highlighted.

use crate::app::state::{AppState, View};
use crate::ui::theme;

/// Which header button a view belongs to.
fn section(view: View) -> Option<&'static str> {
    match view {
        View::Home => None,
        View::Help => Some("Help"),
        View::About => Some("About"),
        View::ModeChoice
        | View::ManualSearch
        | View::Analyzing
        | View::NothingFound
        | View::Results => Some("Search"),
    }
}

/// Render the header bar.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let active = section(state.view);
    let scanning = state.session.is_some();

    ui.horizontal(|ui| {
        if header_button(ui, "Search File", active == Some("Search"), !scanning) {
            pick_log_files(state);
        }
        if header_button(ui, "Help", active == Some("Help"), !scanning) {
            state.navigate(View::Help);
        }
        if header_button(ui, "About", active == Some("About"), !scanning) {
            state.navigate(View::About);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mapping = match state.mapping.table.source() {
                Some(src) => format!("Mapping: {}", src.file_name()),
                None => "Mapping: not loaded".to_string(),
            };
            ui.label(egui::RichText::new(mapping).small().weak());
        });
    });
}

fn header_button(ui: &mut egui::Ui, label: &str, active: bool, enabled: bool) -> bool {
    let mut button = egui::Button::new(egui::RichText::new(label).strong());
    if active {
        button = button.fill(theme::ACTIVE_TAB_BG);
    }
    ui.add_enabled_ui(enabled, |ui| ui.add_sized(theme::HEADER_BUTTON_SIZE, button).clicked())
        .inner
}

/// Open the native picker and hand the selection to the state.
fn pick_log_files(state: &mut AppState) {
    let extensions: Vec<&str> = state.config.file_extensions.iter().map(String::as_str).collect();
    if let Some(files) = rfd::FileDialog::new()
        .set_title("Select one or more log files")
        .add_filter("Log Files", &extensions)
        .add_filter("All Files", &["*"])
        .pick_files()
    {
        state.select_files(files);
    }
}
