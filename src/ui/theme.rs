// LogSift - ui/theme.rs
//
// Colours and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Header button fill when its view is active.
pub const ACTIVE_TAB_BG: Color32 = Color32::from_rgb(208, 208, 255);

/// Target line colour in the context pane.
pub const CONTEXT_TARGET_TEXT: Color32 = Color32::from_rgb(250, 204, 21); // Amber 400

/// Warning text colour (mapping not loaded, partial results).
pub const WARNING_TEXT: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600

/// Status bar colours.
pub const STATUS_BG: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Layout constants.
pub const PANEL_WIDTH: f32 = 620.0;
pub const HEADER_BUTTON_SIZE: [f32; 2] = [100.0, 28.0];
pub const ACTION_BUTTON_SIZE: [f32; 2] = [120.0, 32.0];
pub const CONTEXT_PANE_HEIGHT: f32 = 220.0;
pub const ROW_HEIGHT: f32 = 20.0;
pub const PROGRESS_WIDTH: f32 = 400.0;
