// LogPage - app/mod.rs
//
// Application layer: request validation and orchestration.
// Dependencies: core, platform.

pub mod request;
