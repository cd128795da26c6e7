// LogSift - ui/views/about.rs
//
// About screen: what the tool does and which mapping table is loaded.

use super::Screen;
use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants;

pub struct AboutScreen;

impl Screen for AboutScreen {
    fn title(&self) -> &'static str {
        "About the Application"
    }

    fn render(&self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.vertical_centered(|ui| {
            ui.set_max_width(theme::PANEL_WIDTH);
            ui.add_space(8.0);
            ui.label(egui::RichText::new(constants::APP_NAME).size(28.0).strong());
            ui.label(
                egui::RichText::new(format!("v{}", constants::APP_VERSION))
                    .size(14.0)
                    .weak(),
            );

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            ui.label("Log file analysis with error code mapping.");
            ui.label("Search log files for error codes and review the lines around each match.");

            ui.add_space(12.0);
            ui.strong("Mapping table");
            match state.mapping.table.source() {
                Some(src) => {
                    ui.label(format!("{} (version {})", src.file_name(), src.version));
                    ui.label(format!("{} rows", state.mapping.table.len()));
                }
                None => {
                    ui.colored_label(theme::WARNING_TEXT, "Not loaded");
                    if let Some(w) = &state.mapping.warning {
                        ui.label(egui::RichText::new(w).small());
                    }
                }
            }

            ui.add_space(8.0);
            ui.separator();
            ui.label(egui::RichText::new("Built with Rust & egui").small().weak());
        });
    }
}
