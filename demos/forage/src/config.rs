//! Run configuration: TOML file, then command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use em_agent::AgentSeed;
use em_core::{MarketConfig, Position};
use serde::Deserialize;

/// Everything `forage` needs for one run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForageConfig {
    pub market:            MarketConfig,
    pub agents:            Vec<AgentSeed>,
    /// Draw the grid every this many steps; 0 draws only the first and last
    /// frames.
    pub render_every:      u64,
    /// Write agent snapshots every this many steps; 0 disables them.
    pub snapshot_interval: u64,
    /// Probability that the scripted oracle answers with unparseable text.
    pub garble_rate:       f64,
}

impl Default for ForageConfig {
    fn default() -> Self {
        let quadrants = [
            ("Agent_1", "Risk-averse", (2, 2)),
            ("Agent_2", "Cooperative", (6, 2)),
            ("Agent_3", "Competitive", (2, 6)),
            ("Agent_4", "Risk-averse", (6, 6)),
        ];
        Self {
            market:            MarketConfig::default(),
            agents:            quadrants
                .into_iter()
                .map(|(name, persona, (x, y))| AgentSeed::new(name, persona).at(Position::new(x, y)))
                .collect(),
            render_every:      10,
            snapshot_interval: 10,
            garble_rate:       0.02,
        }
    }
}

impl ForageConfig {
    /// Parse a TOML document.  Missing keys take their default values.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.market.validate()?;
        if !(0.0..=1.0).contains(&config.garble_rate) {
            anyhow::bail!("garble_rate must be in [0, 1], got {}", config.garble_rate);
        }
        Ok(config)
    }

    /// Load `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Self::from_toml(&text).with_context(|| format!("parsing {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }
}
