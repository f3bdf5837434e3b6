//! Config command implementation.

use crate::config::load_config;
use anyhow::Context;
use std::path::Path;

/// Print the effective configuration as TOML.
pub fn execute(explicit: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(explicit)?;
    let rendered = config.to_toml().context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
