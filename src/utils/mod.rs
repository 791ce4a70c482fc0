//! Shared helpers for the publishing pipeline.

pub mod log;
pub mod path;
