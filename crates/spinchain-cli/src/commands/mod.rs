//! CLI command implementations.

pub mod build;
pub mod common;
pub mod schedule;
pub mod version;
