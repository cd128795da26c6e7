// LogSift - ui/views/help.rs
//
// Error code lookup: code input, Cause box, Corrective Actions box.

use super::{action_button, Screen};
use crate::app::state::AppState;
use crate::ui::theme;

pub struct HelpScreen;

impl Screen for HelpScreen {
    fn title(&self) -> &'static str {
        "Input error code and press Enter"
    }

    fn on_activate(&self, state: &mut AppState) {
        state.lookup_input.clear();
        state.lookup_result = None;
    }

    fn render(&self, ui: &mut egui::Ui, state: &mut AppState) {
        if !state.mapping.table.is_loaded() {
            ui.colored_label(
                theme::WARNING_TEXT,
                "Mapping table not loaded. Lookups are unavailable.",
            );
            ui.add_space(6.0);
        }

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.lookup_input)
                    .hint_text("Input Error Code")
                    .desired_width(theme::PANEL_WIDTH - 140.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if action_button(ui, "Enter") || submitted {
                state.lookup();
            }
        });

        ui.add_space(10.0);

        let (cause, actions) = state
            .lookup_result
            .as_ref()
            .map(|r| r.display_texts())
            .unwrap_or_default();

        ui.columns(2, |cols| {
            result_box(&mut cols[0], "Cause", &cause);
            result_box(&mut cols[1], "Corrective Actions", &actions);
        });
    }
}

fn result_box(ui: &mut egui::Ui, heading: &str, body: &str) {
    ui.vertical_centered(|ui| ui.strong(heading));
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_height(130.0);
        ui.set_width(ui.available_width());
        egui::ScrollArea::vertical()
            .id_salt(heading)
            .show(ui, |ui| {
                ui.label(body);
            });
    });
}
