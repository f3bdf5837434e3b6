//! CLI configuration loading and merging.

use anyhow::Context;
use resweep_core::BatchConfig;
use std::path::Path;

/// Load and merge batch configuration.
///
/// Configuration precedence:
/// 1. CLI arguments (applied by the caller)
/// 2. Environment variables
/// 3. Explicit `--config` file, or else local (./.resweeprc) over global
///    (~/.resweep/config.toml)
/// 4. Defaults
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<BatchConfig> {
    match explicit {
        Some(path) => {
            let mut config = BatchConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            config.apply_env().context("Invalid environment override")?;
            Ok(config)
        }
        None => BatchConfig::discover_and_load().context("Failed to load configuration"),
    }
}
