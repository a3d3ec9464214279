//! Listener saving checkpoints and recording episodes.
use super::{
    Checkpoint, CheckpointConfig, CheckpointWriter, CONFIGURATION_ENTRY, INFORMATION_ENTRY,
    POLICY_ENTRY,
};
use crate::listener::{AgentContext, AgentListener, ListenerResponse, StepInfo};
use anyhow::Result;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
};

/// Metadata written to the `agentInformation.json` entry of a checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointInfo {
    /// Name of the training procedure.
    pub training_name: String,

    /// Name of the environment.
    pub mdp_name: String,

    /// Total number of steps taken by the agent.
    pub step_counter: usize,

    /// Wall-clock time of the save, in milliseconds since the Unix epoch.
    pub millis_time: i64,
}

/// Saves a checkpoint every [`save_frequency`](CheckpointConfig::save_frequency)
/// steps and records episodes through the history processor of the agent.
///
/// Failures to save or record are logged and never stop the episode.
pub struct CheckpointListener {
    config: CheckpointConfig,
    writer: CheckpointWriter,
    steps_since_save: usize,
    episode_count: usize,
}

impl CheckpointListener {
    /// Constructs a listener.
    pub fn new(config: CheckpointConfig) -> Result<Self> {
        config.validate()?;
        let writer = match config.background {
            true => CheckpointWriter::background()?,
            false => CheckpointWriter::new(),
        };
        Ok(Self::with_writer(config, writer))
    }

    /// Constructs a listener writing archives through `writer`.
    pub fn with_writer(config: CheckpointConfig, writer: CheckpointWriter) -> Self {
        Self {
            config,
            writer,
            steps_since_save: 0,
            episode_count: 0,
        }
    }

    /// Configuration of the listener.
    pub fn config(&self) -> &CheckpointConfig {
        &self.config
    }

    /// The number of episodes this listener has seen end.
    pub fn episode_count(&self) -> usize {
        self.episode_count
    }

    /// Path of the archive saved at `total_step_count` steps.
    pub fn checkpoint_path(&self, id: &str, total_step_count: usize) -> PathBuf {
        self.config
            .model_dir()
            .join(format!("{}-{}.training", id, total_step_count))
    }

    /// Path of the recording of episode `episode`.
    pub fn video_path(&self, id: &str, episode: usize) -> PathBuf {
        self.config
            .video_dir()
            .join(format!("video-{}-{}.mp4", id, episode))
    }

    /// Saves a checkpoint of the agent in `ctx`.
    pub fn save<A>(&self, ctx: &AgentContext<'_, A>) -> Result<()> {
        if !self.config.save_data {
            return Ok(());
        }

        let info = CheckpointInfo {
            training_name: ctx.training_name().to_string(),
            mdp_name: ctx.mdp_name().to_string(),
            step_counter: ctx.total_step_count(),
            millis_time: chrono::Utc::now().timestamp_millis(),
        };
        let mut checkpoint = Checkpoint::new(self.checkpoint_path(ctx.id(), ctx.total_step_count()))
            .entry(CONFIGURATION_ENTRY, serde_json::to_vec(ctx.configuration())?)
            .entry(INFORMATION_ENTRY, serde_json::to_vec(&info)?);
        if let Some(net) = ctx.policy().neural_net() {
            let mut buf = Vec::new();
            net.save(&mut buf)?;
            checkpoint = checkpoint.entry(POLICY_ENTRY, buf);
        }

        self.writer.write(checkpoint)
    }

    fn start_recording<A>(&self, ctx: &mut AgentContext<'_, A>) -> Result<()> {
        let path = self.video_path(ctx.id(), self.episode_count);
        let hp = match ctx.history_processor() {
            Some(hp) => hp,
            None => return Ok(()),
        };
        fs::create_dir_all(self.config.video_dir())?;
        OpenOptions::new().write(true).create_new(true).open(&path)?;
        hp.start_monitor(&path)?;
        debug!("Started recording in {:?}", path);
        Ok(())
    }
}

impl<A> AgentListener<A> for CheckpointListener {
    fn on_before_episode(&mut self, ctx: &mut AgentContext<'_, A>) -> Result<ListenerResponse> {
        if self.config.save_data {
            if let Err(e) = self.start_recording(ctx) {
                warn!("Failed to start recording episode {}: {:#}", self.episode_count, e);
            }
        }
        Ok(ListenerResponse::Continue)
    }

    fn on_after_step(
        &mut self,
        ctx: &mut AgentContext<'_, A>,
        _step: &StepInfo,
    ) -> Result<ListenerResponse> {
        self.steps_since_save += 1;
        if self.steps_since_save >= self.config.save_frequency {
            self.steps_since_save = 0;
            if let Err(e) = self.save(ctx) {
                error!("Failed to save checkpoint: {:#}", e);
            }
        }
        Ok(ListenerResponse::Continue)
    }

    fn on_after_episode(&mut self, ctx: &mut AgentContext<'_, A>) -> Result<()> {
        if let Some(hp) = ctx.history_processor() {
            if hp.is_monitoring() {
                if let Err(e) = hp.stop_monitor() {
                    warn!("Failed to stop recording episode {}: {:#}", self.episode_count, e);
                }
            }
        }
        self.episode_count += 1;
        Ok(())
    }
}
