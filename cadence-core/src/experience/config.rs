//! Configuration of [`StateActionExperienceHandler`](super::StateActionExperienceHandler).
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`StateActionExperienceHandler`](super::StateActionExperienceHandler).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ExperienceHandlerConfig {
    /// The number of experiences making a full training batch.
    pub batch_size: usize,
}

impl Default for ExperienceHandlerConfig {
    fn default() -> Self {
        Self { batch_size: 8 }
    }
}

impl ExperienceHandlerConfig {
    /// Sets the batch size.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size >= 1, "batch_size must be at least 1");
        Ok(())
    }

    /// Constructs [`ExperienceHandlerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b: Self = serde_yaml::from_reader(rdr)?;
        b.validate()?;
        Ok(b)
    }

    /// Saves [`ExperienceHandlerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_default_batch_size() {
        assert_eq!(ExperienceHandlerConfig::default().batch_size, 8);
    }

    #[test]
    fn test_serde_experience_handler_config() -> Result<()> {
        let config = ExperienceHandlerConfig::default().batch_size(32);
        let dir = TempDir::new("experience_handler_config")?;
        let path = dir.path().join("experience_handler.yaml");
        config.save(&path)?;
        assert_eq!(ExperienceHandlerConfig::load(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_zero_batch_size_is_rejected() -> Result<()> {
        assert!(ExperienceHandlerConfig::default().batch_size(0).validate().is_err());

        let dir = TempDir::new("experience_handler_config")?;
        let path = dir.path().join("experience_handler.yaml");
        std::fs::write(&path, "batch_size: 0\n")?;
        assert!(ExperienceHandlerConfig::load(&path).is_err());
        Ok(())
    }
}
