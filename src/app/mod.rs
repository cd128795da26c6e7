// LogSift - app/mod.rs
//
// Application layer: scan sessions, context extraction, terminal-mode
// operations, the shared mapping table, and GUI-facing state.
// Dependencies: core layer, platform helpers.
// Must NOT depend on: ui.

pub mod context;
pub mod headless;
pub mod mapping_store;
pub mod scan;
pub mod state;
