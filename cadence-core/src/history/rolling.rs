//! In-memory history processor.
use super::HistoryProcessor;
use crate::Observation;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    collections::VecDeque,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Configuration of [`RollingHistoryProcessor`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RollingHistoryConfig {
    /// The number of observations kept in the history.
    pub history_length: usize,
}

impl Default for RollingHistoryConfig {
    fn default() -> Self {
        Self { history_length: 4 }
    }
}

impl RollingHistoryConfig {
    /// Sets the history length.
    pub fn history_length(mut self, v: usize) -> Self {
        self.history_length = v;
        self
    }
}

struct Monitor {
    path: PathBuf,
    frames: Vec<Observation>,
}

/// Keeps the last `history_length` observations in memory.
///
/// While monitoring, every recorded observation is kept as a frame; when the
/// monitor stops, the frames are written to the monitor file as JSON lines.
pub struct RollingHistoryProcessor {
    history_length: usize,
    history: VecDeque<Observation>,
    monitor: Option<Monitor>,
}

impl RollingHistoryProcessor {
    /// Constructs a history processor.
    pub fn new(config: &RollingHistoryConfig) -> Self {
        Self {
            history_length: config.history_length,
            history: VecDeque::with_capacity(config.history_length),
            monitor: None,
        }
    }

    /// Returns the number of frames recorded in the current session.
    pub fn n_recorded(&self) -> usize {
        self.monitor.as_ref().map_or(0, |m| m.frames.len())
    }
}

impl HistoryProcessor for RollingHistoryProcessor {
    fn history(&self) -> Vec<Observation> {
        self.history.iter().cloned().collect()
    }

    fn record(&mut self, obs: &Observation) {
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.frames.push(obs.clone());
        }
    }

    fn add(&mut self, obs: &Observation) {
        if self.history_length == 0 {
            return;
        }
        if self.history.len() == self.history_length {
            self.history.pop_front();
        }
        self.history.push_back(obs.clone());
    }

    fn start_monitor(&mut self, path: &Path) -> Result<()> {
        if self.monitor.is_some() {
            self.stop_monitor()?;
        }
        info!("Start monitoring to {:?}", path);
        self.monitor = Some(Monitor {
            path: path.to_path_buf(),
            frames: Vec::new(),
        });
        Ok(())
    }

    fn stop_monitor(&mut self) -> Result<()> {
        let monitor = match self.monitor.take() {
            Some(monitor) => monitor,
            None => return Ok(()),
        };

        let file = File::create(&monitor.path)
            .with_context(|| format!("Failed to create monitor file {:?}", monitor.path))?;
        let mut writer = BufWriter::new(file);
        for frame in monitor.frames.iter() {
            serde_json::to_writer(&mut writer, frame)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        info!(
            "Stop monitoring, {} frames written to {:?}",
            monitor.frames.len(),
            monitor.path
        );
        Ok(())
    }

    fn is_monitoring(&self) -> bool {
        self.monitor.is_some()
    }
}
