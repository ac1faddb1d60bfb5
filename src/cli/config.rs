//! Configuration file support for CLI commands

use std::path::Path;

use anyhow::{Context, Result};

use crate::{learning::LearningParams, pipeline::TrainingConfig};

/// Load a training configuration from a JSON file.
///
/// Any field may be omitted; omitted fields take their defaults.
pub fn load_training_config(path: &Path) -> Result<TrainingConfig> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open config file {}", path.display()))?;
    let config: TrainingConfig = serde_json::from_reader(file)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Command-line overrides for the learning constants
#[derive(Debug, Clone, Copy, Default)]
pub struct LearningOverrides {
    pub initial_weight: Option<f64>,
    pub reward: Option<f64>,
    pub floor: Option<f64>,
}

impl LearningOverrides {
    /// Apply the overrides and validate the result
    pub fn apply(self, base: LearningParams) -> Result<LearningParams> {
        let params = LearningParams {
            initial_weight: self.initial_weight.unwrap_or(base.initial_weight),
            reward: self.reward.unwrap_or(base.reward),
            floor: self.floor.unwrap_or(base.floor),
        };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_config_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"num_episodes": 42, "learning": {{"reward": 0.5}}}}"#).unwrap();

        let config = load_training_config(file.path()).unwrap();
        assert_eq!(config.num_episodes, 42);
        assert_eq!(config.learning.reward, 0.5);
        assert_eq!(config.learning.floor, LearningParams::DEFAULT_FLOOR);
        assert!(config.carry_history);
    }

    #[test]
    fn overrides_are_validated() {
        let overrides = LearningOverrides {
            floor: Some(-1.0),
            ..LearningOverrides::default()
        };
        assert!(overrides.apply(LearningParams::default()).is_err());
    }
}
