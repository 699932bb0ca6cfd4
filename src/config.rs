use std::{fs, path::Path, str::FromStr};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use crate::arrival_detector::ArrivalThresholds;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arrival: ArrivalThresholds,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            arrival: ArrivalThresholds::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_json(&content)?;
        info!("config loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Config> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.arrival.validate()?;
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| anyhow!("invalid log level: {}", self.log_level))
    }
}
