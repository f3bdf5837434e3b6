//! Command implementations for the resweep CLI.

pub mod run;
pub mod show_config;
