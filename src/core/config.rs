//! Engine configuration
//!
//! Accuracy/runtime knobs for the lattice and simulation engines.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{PricingError, PricingResult};

/// Smallest lattice step count accepted from configuration
pub const MIN_LATTICE_STEPS: usize = 10;
/// Smallest simulation count accepted from configuration
pub const MIN_SIMULATION_COUNT: usize = 1000;

/// Configuration shared by the pricing engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Binomial tree depth
    /// Default: 100
    pub lattice_steps: usize,

    /// Number of Monte Carlo draws per pricing call
    /// Default: 100_000
    pub simulation_count: usize,

    /// Seed of the Monte Carlo generator
    /// Default: 42
    pub seed: u64,

    /// Time steps of a generated GBM path (one trading year)
    /// Default: 252
    pub path_steps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lattice_steps: 100,
            simulation_count: 100_000,
            seed: 42,
            path_steps: 252,
        }
    }
}

impl EngineConfig {
    /// Fast settings: shallow tree, few draws
    pub fn fast() -> Self {
        Self {
            lattice_steps: 50,
            simulation_count: 10_000,
            ..Default::default()
        }
    }

    /// Accurate settings: deep tree, many draws
    pub fn accurate() -> Self {
        Self {
            lattice_steps: 1000,
            simulation_count: 500_000,
            ..Default::default()
        }
    }

    /// Restore the default settings
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the minimums that interactive callers enforce
    pub fn validate(&self) -> PricingResult<()> {
        if self.lattice_steps < MIN_LATTICE_STEPS {
            return Err(PricingError::config(format!(
                "lattice_steps must be at least {}, got {}",
                MIN_LATTICE_STEPS, self.lattice_steps
            )));
        }
        if self.simulation_count < MIN_SIMULATION_COUNT {
            return Err(PricingError::config(format!(
                "simulation_count must be at least {}, got {}",
                MIN_SIMULATION_COUNT, self.simulation_count
            )));
        }
        if self.path_steps == 0 {
            return Err(PricingError::config("path_steps must be positive"));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> PricingResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> PricingResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!("Loaded engine config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.lattice_steps, 100);
        assert_eq!(config.simulation_count, 100_000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.path_steps, 252);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json_str(r#"{"lattice_steps": 500}"#).unwrap();
        assert_eq!(config.lattice_steps, 500);
        assert_eq!(config.simulation_count, 100_000);
    }

    #[test]
    fn test_minimums() {
        let too_shallow = EngineConfig::from_json_str(r#"{"lattice_steps": 5}"#);
        assert!(matches!(too_shallow, Err(PricingError::Config(_))));

        let too_few = EngineConfig {
            simulation_count: 999,
            ..Default::default()
        };
        assert!(too_few.validate().is_err());

        let garbage = EngineConfig::from_json_str("{ not json");
        assert!(matches!(garbage, Err(PricingError::Serialization(_))));
    }

    #[test]
    fn test_reset() {
        let mut config = EngineConfig::accurate();
        config.seed = 7;
        config.reset();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let res = EngineConfig::from_json_file("/nonexistent/engine.json");
        assert!(matches!(res, Err(PricingError::Io(_))));
    }
}
