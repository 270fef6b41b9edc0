//! CLI command implementations

pub mod docker;
pub mod engine;
pub mod version;
