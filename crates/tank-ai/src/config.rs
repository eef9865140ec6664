//! Arena configuration, loaded from YAML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::BehaviourKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Simulation settings plus the tanks to spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Fixed frame time
    pub dt_seconds: f32,

    pub duration_seconds: f64,

    /// Seed for randomized effectors
    pub seed: u64,

    /// Movement and weapon tuning shared by every tank
    pub tank: TankTuning,

    pub tanks: Vec<TankSpawn>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            dt_seconds: 0.02,
            duration_seconds: 30.0,
            seed: 0,
            tank: TankTuning::default(),
            tanks: vec![
                TankSpawn {
                    name: Some("red".to_string()),
                    position: [-10.0, 0.0, 0.0],
                    yaw_degrees: 90.0,
                    behaviour: BehaviourKind::Unpredictable.index(),
                },
                TankSpawn {
                    name: Some("blue".to_string()),
                    position: [10.0, 0.0, 0.0],
                    yaw_degrees: -90.0,
                    behaviour: BehaviourKind::Frightened.index(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankTuning {
    /// Units per second at move rate 1
    pub move_speed: f32,

    /// Degrees per second at turn rate 1
    pub turn_speed_degrees: f32,

    pub reload_seconds: f32,

    /// Launch force for fire velocity 0
    pub min_launch_force: f32,

    /// Launch force for fire velocity 1
    pub max_launch_force: f32,
}

impl Default for TankTuning {
    fn default() -> Self {
        Self {
            move_speed: 12.0,
            turn_speed_degrees: 180.0,
            reload_seconds: 0.5,
            min_launch_force: 15.0,
            max_launch_force: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankSpawn {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub position: [f32; 3],

    #[serde(default)]
    pub yaw_degrees: f32,

    /// Behaviour selector; values outside 0..=3 get the idle tree
    #[serde(default)]
    pub behaviour: i32,
}

impl ArenaConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt_seconds.is_finite() && self.dt_seconds > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "dt_seconds must be positive, got {}",
                self.dt_seconds
            )));
        }
        if !(self.duration_seconds.is_finite() && self.duration_seconds >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "duration_seconds must be non-negative, got {}",
                self.duration_seconds
            )));
        }
        if self.tank.min_launch_force > self.tank.max_launch_force {
            return Err(ConfigError::Invalid(format!(
                "min_launch_force {} exceeds max_launch_force {}",
                self.tank.min_launch_force, self.tank.max_launch_force
            )));
        }
        if self.tank.reload_seconds < 0.0 {
            return Err(ConfigError::Invalid("reload_seconds must be non-negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ArenaConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(config.tanks.len(), 2);
        assert_eq!(config.tanks[0].behaviour, 3);
        assert_eq!(config.tanks[1].behaviour, 2);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let yaml = r#"
dt_seconds: 0.05
seed: 9
tank:
  move_speed: 6.0
tanks:
  - position: [0.0, 0.0, 5.0]
    behaviour: 1
  - name: dummy
    behaviour: 42
"#;
        let config = ArenaConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.dt_seconds, 0.05);
        assert_eq!(config.seed, 9);
        assert_eq!(config.tank.move_speed, 6.0);
        assert_eq!(config.tank.turn_speed_degrees, 180.0);
        assert_eq!(config.tanks.len(), 2);
        assert_eq!(config.tanks[0].position, [0.0, 0.0, 5.0]);
        assert_eq!(config.tanks[1].name.as_deref(), Some("dummy"));
        assert_eq!(config.tanks[1].behaviour, 42);
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        let err = ArenaConfig::from_yaml_str("dt_seconds: 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = ArenaConfig::from_yaml_str("tanks: [[").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ArenaConfig::load(Path::new("/nonexistent/arena.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/arena.yaml"));
    }
}
