//! Writing of checkpoint archives.
use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Sender};
use log::{error, info, warn};
use std::{
    fs::{self, File},
    io::{Read, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    thread::JoinHandle,
};
use zip::{write::FileOptions, CompressionMethod, ZipArchive, ZipWriter};

/// A checkpoint to be written: the archive path and its named entries.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    /// Path of the archive.
    pub path: PathBuf,

    /// Entries of the archive, in order.
    pub entries: Vec<(String, Vec<u8>)>,
}

impl Checkpoint {
    /// Constructs an empty checkpoint at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: vec![],
        }
    }

    /// Appends an entry.
    pub fn entry(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.entries.push((name.into(), data));
        self
    }
}

struct BackgroundWriter {
    sender: Option<Sender<Checkpoint>>,
    handle: Option<JoinHandle<()>>,
}

impl Drop for BackgroundWriter {
    fn drop(&mut self) {
        // Closing the channel ends the loop of the writer thread after it
        // drained pending checkpoints.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Checkpoint writer thread panicked");
            }
        }
    }
}

/// Writes checkpoint archives one at a time.
///
/// Writers sharing a lock (see [`CheckpointWriter::with_lock`]) never write
/// concurrently. A background writer hands archives to a single thread and
/// returns immediately; dropping it waits for the pending archives.
pub struct CheckpointWriter {
    lock: Arc<Mutex<()>>,
    background: Option<BackgroundWriter>,
}

impl Default for CheckpointWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckpointWriter {
    /// Constructs a writer writing on the calling thread.
    pub fn new() -> Self {
        Self::with_lock(Arc::new(Mutex::new(())))
    }

    /// Constructs a writer writing on the calling thread, serialized with
    /// every other writer holding `lock`.
    pub fn with_lock(lock: Arc<Mutex<()>>) -> Self {
        Self {
            lock,
            background: None,
        }
    }

    /// Constructs a writer writing on a dedicated thread.
    pub fn background() -> Result<Self> {
        let lock = Arc::new(Mutex::new(()));
        let (sender, receiver) = unbounded::<Checkpoint>();
        let thread_lock = lock.clone();
        let handle = std::thread::Builder::new()
            .name("checkpoint-writer".into())
            .spawn(move || {
                for checkpoint in receiver.iter() {
                    let _guard = thread_lock.lock().unwrap_or_else(|e| e.into_inner());
                    if let Err(e) = write_archive(&checkpoint) {
                        error!("Failed to write checkpoint {:?}: {:#}", checkpoint.path, e);
                    }
                }
            })
            .context("Failed to spawn checkpoint writer thread")?;
        info!("Starts thread for writing checkpoints");

        Ok(Self {
            lock,
            background: Some(BackgroundWriter {
                sender: Some(sender),
                handle: Some(handle),
            }),
        })
    }

    /// Returns `true` if archives are written on a background thread.
    pub fn is_background(&self) -> bool {
        self.background.is_some()
    }

    /// Writes `checkpoint`, or queues it for the background thread.
    pub fn write(&self, checkpoint: Checkpoint) -> Result<()> {
        match self.background.as_ref().and_then(|bg| bg.sender.as_ref()) {
            Some(sender) => sender
                .send(checkpoint)
                .map_err(|_| anyhow::anyhow!("Checkpoint writer thread is gone")),
            None => {
                let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
                write_archive(&checkpoint)
            }
        }
    }
}

/// A temporary file removed on drop unless it was persisted.
struct TempArchive {
    path: PathBuf,
    persisted: bool,
}

impl TempArchive {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            persisted: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn persist(mut self, to: &Path) -> Result<()> {
        fs::rename(&self.path, to).context(format!("Failed to rename {:?}", self.path))?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempArchive {
    fn drop(&mut self) {
        if !self.persisted && self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!("Failed to remove {:?}: {}", self.path, e);
            }
        }
    }
}

/// Writes the archive to a temporary file next to its path and renames it, so
/// that a complete archive or no archive is found at the path.
fn write_archive(checkpoint: &Checkpoint) -> Result<()> {
    let path = checkpoint.path.as_path();
    if path.exists() {
        warn!("Checkpoint {:?} exists, skips saving", path);
        return Ok(());
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context(format!("Failed to create directory {:?}", dir))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = TempArchive::new(PathBuf::from(tmp));

    let file =
        File::create(tmp.path()).context(format!("Failed to create file {:?}", tmp.path()))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in checkpoint.entries.iter() {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(data)?;
    }
    zip.finish()?.sync_all()?;
    tmp.persist(path)?;

    info!("Saved checkpoint in {:?}", path);
    Ok(())
}

/// Reads an entry of a checkpoint archive.
pub fn read_checkpoint_entry(path: impl AsRef<Path>, name: &str) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let file = File::open(path).context(format!("Failed to open checkpoint {:?}", path))?;
    let mut archive = ZipArchive::new(file)?;
    let mut entry = archive
        .by_name(name)
        .context(format!("No entry {} in {:?}", name, path))?;
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn checkpoint(path: &Path, tag: &str) -> Checkpoint {
        Checkpoint::new(path)
            .entry("a.json", format!("{{\"tag\":\"{}\"}}", tag).into_bytes())
            .entry("b.bin", vec![1, 2, 3])
    }

    #[test]
    fn test_write_and_read() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = TempDir::new("checkpoint_writer")?;
        let path = dir.path().join("model").join("agent-10.training");

        CheckpointWriter::new().write(checkpoint(&path, "x"))?;

        assert!(path.exists());
        assert!(!dir.path().join("model").join("agent-10.training.tmp").exists());
        assert_eq!(read_checkpoint_entry(&path, "b.bin")?, vec![1, 2, 3]);
        assert_eq!(read_checkpoint_entry(&path, "a.json")?, b"{\"tag\":\"x\"}".to_vec());
        assert!(read_checkpoint_entry(&path, "c.bin").is_err());
        Ok(())
    }

    #[test]
    fn test_existing_archive_is_kept() -> Result<()> {
        let dir = TempDir::new("checkpoint_writer")?;
        let path = dir.path().join("agent-10.training");
        let writer = CheckpointWriter::new();
        writer.write(checkpoint(&path, "first"))?;
        writer.write(checkpoint(&path, "second"))?;
        assert_eq!(read_checkpoint_entry(&path, "a.json")?, b"{\"tag\":\"first\"}".to_vec());
        Ok(())
    }

    #[test]
    fn test_unfinished_archive_is_removed() -> Result<()> {
        let dir = TempDir::new("checkpoint_writer")?;
        let tmp = dir.path().join("agent-10.training.tmp");
        {
            let archive = TempArchive::new(tmp.clone());
            File::create(archive.path())?.write_all(b"partial")?;
        }
        assert!(!tmp.exists());

        // Renaming into a missing directory fails and leaves nothing behind.
        let archive = TempArchive::new(tmp.clone());
        File::create(archive.path())?.write_all(b"partial")?;
        let missing = dir.path().join("missing").join("agent-10.training");
        assert!(archive.persist(&missing).is_err());
        assert!(!tmp.exists());
        assert!(!missing.exists());

        let archive = TempArchive::new(tmp.clone());
        File::create(archive.path())?.write_all(b"complete")?;
        let path = dir.path().join("agent-10.training");
        archive.persist(&path)?;
        assert!(!tmp.exists());
        assert_eq!(fs::read(&path)?, b"complete".to_vec());
        Ok(())
    }

    #[test]
    fn test_background_writer_drains_on_drop() -> Result<()> {
        let dir = TempDir::new("checkpoint_writer")?;
        let paths: Vec<_> = (0..5)
            .map(|i| dir.path().join(format!("agent-{}.training", i)))
            .collect();
        {
            let writer = CheckpointWriter::background()?;
            assert!(writer.is_background());
            for p in paths.iter() {
                writer.write(checkpoint(p, "bg"))?;
            }
        }
        for p in paths.iter() {
            assert_eq!(read_checkpoint_entry(p, "b.bin")?, vec![1, 2, 3]);
        }
        Ok(())
    }
}
