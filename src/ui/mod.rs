// LogSift - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state), core (read-only models), egui, rfd.
// Must NOT depend on: platform, direct I/O.

pub mod theme;
pub mod views;
