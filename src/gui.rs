// LogSift - gui.rs
//
// Top-level eframe::App implementation.
// Drives the cooperative scan one budget of steps per frame and routes the
// central panel to the active view's screen.

use crate::app::state::{AppState, View};
use crate::ui;
use crate::ui::theme;

/// The LogSift application.
pub struct LogSiftApp {
    pub state: AppState,
}

impl LogSiftApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LogSiftApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::views::apply_navigation(&mut self.state);

        // Advance the scan; keep repainting until it leaves the Analyzing view.
        if self.state.view == View::Analyzing
            && self.state.tick_scan(self.state.config.steps_per_frame)
        {
            ctx.request_repaint();
        }
        if self.state.pending_view.is_some() {
            ctx.request_repaint();
        }

        // Header
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui::views::header::render(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(theme::STATUS_BG))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&self.state.status_message).color(theme::STATUS_TEXT));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.state.debug_mode {
                            ui.label(egui::RichText::new("DEBUG").color(theme::WARNING_TEXT));
                        }
                        let warnings = self.state.warnings.len();
                        if warnings > 0 {
                            ui.label(
                                egui::RichText::new(format!("{warnings} warning(s)"))
                                    .color(theme::WARNING_TEXT),
                            )
                            .on_hover_text(self.state.warnings.join("\n"));
                        }
                    });
                });
            });

        // Central panel (active screen)
        let screen = ui::views::screen_for(self.state.view);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(screen.title());
            ui.separator();
            screen.render(ui, &mut self.state);
        });

        render_notice(ctx, &mut self.state);
    }
}

/// Modal-ish message window for validation failures and scan errors.
fn render_notice(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.notice.clone() else {
        return;
    };
    let mut dismissed = false;
    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });
    if dismissed {
        state.notice = None;
    }
}
