//! Configuration of [`CheckpointListener`](super::CheckpointListener).
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Configuration of [`CheckpointListener`](super::CheckpointListener).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct CheckpointConfig {
    /// Interval of saving checkpoints in environment steps.
    pub save_frequency: usize,

    /// Directory under which `model/` and `video/` are created.
    pub data_root: PathBuf,

    /// If `false`, nothing is written.
    pub save_data: bool,

    /// If `true`, archives are written on a background thread.
    pub background: bool,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            save_frequency: 100_000,
            data_root: default_data_root(),
            save_data: true,
            background: false,
        }
    }
}

fn default_data_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cadence")
}

impl CheckpointConfig {
    /// Sets the interval of saving checkpoints in environment steps.
    pub fn save_frequency(mut self, save_frequency: usize) -> Self {
        self.save_frequency = save_frequency;
        self
    }

    /// Sets the data root directory.
    pub fn data_root(mut self, data_root: impl AsRef<Path>) -> Self {
        self.data_root = data_root.as_ref().to_path_buf();
        self
    }

    /// Enables or disables writing.
    pub fn save_data(mut self, save_data: bool) -> Self {
        self.save_data = save_data;
        self
    }

    /// Writes archives on a background thread.
    pub fn background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// Directory of checkpoint archives.
    pub fn model_dir(&self) -> PathBuf {
        self.data_root.join("model")
    }

    /// Directory of episode recordings.
    pub fn video_dir(&self) -> PathBuf {
        self.data_root.join("video")
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.save_frequency >= 1, "save_frequency must be at least 1");
        Ok(())
    }

    /// Constructs [`CheckpointConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b: Self = serde_yaml::from_reader(rdr)?;
        b.validate()?;
        Ok(b)
    }

    /// Saves [`CheckpointConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
