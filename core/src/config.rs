use crate::{
    error::{DashboardError, DashboardResult},
    population::DEFAULT_POPULATION_SIZE,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on generated users; the dashboard is an in-memory snapshot.
pub const MAX_POPULATION_SIZE: usize = 1_000_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardConfig {
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Master seed. `None` draws a fresh one from OS entropy per snapshot.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_population_size() -> usize {
    DEFAULT_POPULATION_SIZE
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            seed: None,
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    /// In tests, use DashboardConfig::default_test().
    pub fn load(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("config: loaded {} ({config:?})", path.display());
        Ok(config)
    }

    /// Small, seeded config for unit and integration tests.
    pub fn default_test() -> Self {
        Self {
            population_size: 50,
            seed: Some(42),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.population_size > MAX_POPULATION_SIZE {
            return Err(DashboardError::InvalidConfig {
                reason: format!(
                    "population_size {} exceeds maximum {MAX_POPULATION_SIZE}",
                    self.population_size
                ),
            });
        }
        Ok(())
    }
}
