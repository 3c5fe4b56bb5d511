use std::{fs, path::Path};

use anyhow::{Context, Result};
use risk_engine::RulesConfig;

/// Turn limit applied to simulated games when neither the command line nor the rules
/// file sets one.
pub const DEFAULT_SIMULATION_TURNS: u32 = 500;

/// Reads rule overrides from a TOML file. Missing keys keep their defaults.
pub fn load(path: Option<&Path>) -> Result<RulesConfig> {
    let Some(path) = path else {
        return Ok(RulesConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules from {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid rules in {}", path.display()))
}

pub fn parse(text: &str) -> Result<RulesConfig> {
    Ok(toml::from_str(text)?)
}
