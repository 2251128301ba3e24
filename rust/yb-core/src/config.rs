//! Unified configuration schema (YAML).
//!
//! Every section has defaults, so an empty file is a valid config.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSection,

    /// Difficulty key used when none is given on the command line.
    #[serde(default = "default_difficulty")]
    pub difficulty: String,

    /// Per-difficulty overrides applied over the built-in profile table.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileOverride>,

    #[serde(default)]
    pub simulation: SimulationSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineSection::default(),
            difficulty: default_difficulty(),
            profiles: BTreeMap::new(),
            simulation: SimulationSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

/// Decision engine limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineSection {
    /// Hard ceiling on `simulations × candidates` for one keep decision.
    #[serde(default = "default_max_rollouts")]
    pub max_rollouts_per_decision: u32,
    /// Evaluate candidates on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

fn default_max_rollouts() -> u32 {
    16_000
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            max_rollouts_per_decision: default_max_rollouts(),
            parallel: false,
        }
    }
}

/// Optional replacement values for one difficulty profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverride {
    #[serde(default)]
    pub simulations: Option<u32>,
    #[serde(default)]
    pub bonus_weight: Option<f64>,
    #[serde(default)]
    pub rarity_weight: Option<f64>,
    #[serde(default)]
    pub zero_penalty: Option<f64>,
    #[serde(default)]
    pub risk_bias: Option<f64>,
    #[serde(default)]
    pub mistake_chance: Option<f64>,
    #[serde(default)]
    pub hold_greed_threshold: Option<f64>,
    #[serde(default)]
    pub chase_yahtzee: Option<bool>,
}

/// Batch simulation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSection {
    #[serde(default = "default_games")]
    pub games: u32,
    /// Base seed; per-game seeds are derived from it.
    #[serde(default)]
    pub seed: u64,
}

fn default_games() -> u32 {
    200
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            games: default_games(),
            seed: 0,
        }
    }
}

/// NDJSON event logging.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSection {
    /// If set, decision and game events are appended here.
    #[serde(default)]
    pub decisions_path: Option<String>,
    /// 0 disables periodic flushing.
    #[serde(default = "default_flush_every_lines")]
    pub flush_every_lines: u64,
}

fn default_flush_every_lines() -> u64 {
    256
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            decisions_path: None,
            flush_every_lines: default_flush_every_lines(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.max_rollouts_per_decision < 1 {
            return Err(ConfigError::Invalid(
                "engine.max_rollouts_per_decision must be >= 1".to_string(),
            ));
        }
        if self.simulation.games < 1 {
            return Err(ConfigError::Invalid(
                "simulation.games must be >= 1".to_string(),
            ));
        }
        for (key, p) in &self.profiles {
            if p.simulations == Some(0) {
                return Err(ConfigError::Invalid(format!(
                    "profiles.{key}.simulations must be >= 1"
                )));
            }
            if let Some(m) = p.mistake_chance {
                if !(0.0..=1.0).contains(&m) {
                    return Err(ConfigError::Invalid(format!(
                        "profiles.{key}.mistake_chance must be in [0,1]"
                    )));
                }
            }
            let finite = [
                p.bonus_weight,
                p.rarity_weight,
                p.zero_penalty,
                p.risk_bias,
                p.hold_greed_threshold,
            ];
            if finite.iter().flatten().any(|v| !v.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "profiles.{key}: weights must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Serialize to YAML (for `yb profiles --yaml` and run snapshots).
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_yaml() {
        // Load the reference config file from the repo
        let config = Config::load("../../configs/default.yaml")
            .expect("Failed to load configs/default.yaml");

        assert_eq!(config.difficulty, "medium");
        assert_eq!(config.engine.max_rollouts_per_decision, 16_000);
        assert!(!config.engine.parallel);
        assert_eq!(config.simulation.games, 200);
        assert_eq!(config.simulation.seed, 0);
        assert_eq!(config.logging.decisions_path, None);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").expect("empty mapping is valid");
        assert_eq!(config.difficulty, "medium");
        assert_eq!(config.logging.flush_every_lines, 256);
        assert_eq!(config.engine.max_rollouts_per_decision, 16_000);
    }

    #[test]
    fn test_parse_profile_overrides() {
        let yaml = r#"
difficulty: hard
engine:
  parallel: true
profiles:
  hard:
    simulations: 600
    chase_yahtzee: false
simulation:
  games: 50
  seed: 7
"#;
        let config = Config::from_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(config.difficulty, "hard");
        assert!(config.engine.parallel);
        let hard = &config.profiles["hard"];
        assert_eq!(hard.simulations, Some(600));
        assert_eq!(hard.chase_yahtzee, Some(false));
        assert_eq!(hard.bonus_weight, None);
        assert_eq!(config.simulation.seed, 7);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_prob = "profiles:\n  easy:\n    mistake_chance: 1.5\n";
        assert!(matches!(
            Config::from_yaml(bad_prob),
            Err(ConfigError::Invalid(_))
        ));

        let zero_games = "simulation:\n  games: 0\n";
        assert!(matches!(
            Config::from_yaml(zero_games),
            Err(ConfigError::Invalid(_))
        ));

        let unknown_field = "profiles:\n  easy:\n    greed: 3\n";
        assert!(matches!(
            Config::from_yaml(unknown_field),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let invalid_yaml = "this is not: valid: yaml: {{{}}}";
        assert!(Config::from_yaml(invalid_yaml).is_err());
    }

    #[test]
    fn test_yaml_roundtrip_via_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut cfg = Config::default();
        cfg.simulation.games = 123;
        std::fs::write(&path, cfg.to_yaml().unwrap()).unwrap();
        let back = Config::load(&path).unwrap();
        assert_eq!(back.simulation.games, 123);
    }
}
