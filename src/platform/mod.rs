// LogSift - platform/mod.rs
//
// Platform abstraction layer: filesystem helpers, config.toml, mapping
// table sources.

pub mod config;
pub mod fs;
pub mod mapping_source;
