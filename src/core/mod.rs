// LogSift - core/mod.rs
//
// Core business logic layer: data model, mapping table, cause resolution,
// search expressions, export.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod mapping;
pub mod model;
pub mod resolver;
pub mod search;
