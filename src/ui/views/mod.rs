// LogSift - ui/views/mod.rs
//
// One `Screen` per `View` variant. The GUI asks `screen_for(view)` for the
// panel to render and calls `on_activate` once whenever the view changes.

pub mod about;
pub mod header;
pub mod help;
pub mod home;
pub mod results;
pub mod search;

use crate::app::state::{AppState, View};

/// Capability shared by every screen.
pub trait Screen {
    /// Heading shown above the screen body.
    fn title(&self) -> &'static str;

    /// Reset per-visit state. Called once each time the view becomes active.
    fn on_activate(&self, _state: &mut AppState) {}

    /// Draw the screen body into the central panel.
    fn render(&self, ui: &mut egui::Ui, state: &mut AppState);
}

/// The screen implementing `view`.
pub fn screen_for(view: View) -> &'static dyn Screen {
    match view {
        View::Home => &home::HomeScreen,
        View::Help => &help::HelpScreen,
        View::About => &about::AboutScreen,
        View::ModeChoice => &search::ModeChoiceScreen,
        View::ManualSearch => &search::ManualSearchScreen,
        View::Analyzing => &search::AnalyzingScreen,
        View::NothingFound => &search::NothingFoundScreen,
        View::Results => &results::ResultsScreen,
    }
}

/// Switch to any pending view, running its activation hook.
pub fn apply_navigation(state: &mut AppState) {
    if let Some(next) = state.pending_view.take() {
        tracing::debug!(from = ?state.view, to = ?next, "View change");
        screen_for(next).on_activate(state);
        state.view = next;
    }
}

/// A fixed-size button, as used across the screens.
pub(crate) fn action_button(ui: &mut egui::Ui, label: &str) -> bool {
    ui.add_sized(crate::ui::theme::ACTION_BUTTON_SIZE, egui::Button::new(label))
        .clicked()
}
