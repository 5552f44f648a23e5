//! Catalog hierarchy tooling library
//!
//! Command definitions, snapshot file handling and text rendering used by
//! the `catalog-hierarchy` binary (main.rs).

pub mod commands;
pub mod render;
pub mod snapshot;
