// LogPage - platform/mod.rs
//
// Platform abstraction layer: config directories, config.toml, file access.
// Dependencies: standard library, directories, glob, memmap2, core model types.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
