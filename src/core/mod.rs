// LogPage - core/mod.rs
//
// Core business logic layer: line parsing, timestamp shifting, filtering,
// tabularisation and pagination.
// Must NOT depend on: app, platform, or touch the filesystem directly.

pub mod export;
pub mod filter;
pub mod model;
pub mod paginate;
pub mod parser;
pub mod pipeline;
pub mod shift;
pub mod table;
