//! # marvin-core
//!
//! Core library for the Marvin CLI providing:
//! - The environment configuration record (`MARVIN_HOME`, `MARVIN_DATA_PATH`,
//!   `TOOLBOX_VERSION`) captured once at startup
//! - Error types shared by the command handlers

pub mod config;
pub mod error;

pub use config::MarvinEnv;
pub use error::{Error, Result};
