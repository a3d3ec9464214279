//! Configuration of [`LearningAgent`](super::LearningAgent).
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`LearningAgent`](super::LearningAgent).
///
/// It is written as the `agentConfiguration.json` entry of checkpoints.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
pub struct LearningAgentConfig {
    /// The maximum number of steps of an episode. `None` means no cap.
    pub max_episode_steps: Option<usize>,
}

impl LearningAgentConfig {
    /// Sets the maximum number of steps of an episode.
    pub fn max_episode_steps(mut self, v: Option<usize>) -> Self {
        self.max_episode_steps = v;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.max_episode_steps != Some(0),
            "max_episode_steps must be positive or unset"
        );
        Ok(())
    }

    /// Constructs [`LearningAgentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b: Self = serde_yaml::from_reader(rdr)?;
        b.validate()?;
        Ok(b)
    }

    /// Saves [`LearningAgentConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
