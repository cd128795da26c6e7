// LogSift - ui/views/home.rs
//
// Landing screen with usage instructions.

use super::Screen;
use crate::app::state::AppState;
use crate::ui::theme;

const INSTRUCTIONS: &[&str] = &[
    "1. 'Search File' opens a file dialog to choose one or more log files to analyse.",
    "2. 'Help' looks up an error code and shows its cause and corrective actions.",
    "3. 'About' shows information about the application and the loaded mapping table.",
];

pub struct HomeScreen;

impl Screen for HomeScreen {
    fn title(&self) -> &'static str {
        "Instructions"
    }

    fn on_activate(&self, state: &mut AppState) {
        state.selected_files.clear();
        state.status_message = "Ready. Use Search File to pick log files.".to_string();
    }

    fn render(&self, ui: &mut egui::Ui, _state: &mut AppState) {
        ui.vertical_centered(|ui| {
            ui.set_max_width(theme::PANEL_WIDTH);
            ui.add_space(12.0);
            for line in INSTRUCTIONS {
                ui.label(*line);
                ui.add_space(6.0);
            }
        });
    }
}
