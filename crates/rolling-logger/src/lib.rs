//! Rolling Logger
//!
//! A `tracing` subscriber that mirrors every event to stderr and to a log
//! file that rotates once it grows past a size limit. Only a bounded number
//! of rotated files is kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("failed to prepare log file: {0}")]
    Io(#[from] io::Error),
    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

/// Limits for the log files
#[derive(Debug, Clone)]
pub struct RollingConfig {
    /// Size at which the active file is rotated
    pub max_file_bytes: u64,
    /// Rotated files kept next to the active one
    pub max_rotated_files: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 5 * 1024 * 1024,
            max_rotated_files: 5,
        }
    }
}

struct Inner {
    dir: PathBuf,
    app_name: String,
    config: RollingConfig,
    file: File,
    written: u64,
}

impl Inner {
    fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.app_name))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let stamp = chrono::Local::now().format("%Y%m%dT%H%M%S%.6f");
        let rotated = self.dir.join(format!("{}.{}.log", self.app_name, stamp));
        fs::rename(self.active_path(), rotated)?;

        self.file = open_append(&self.active_path())?;
        self.written = 0;
        self.prune()
    }

    /// Remove the oldest rotated files beyond the configured count
    fn prune(&self) -> io::Result<()> {
        let mut rotated = rotated_files(&self.dir, &self.app_name)?;
        if rotated.len() <= self.config.max_rotated_files {
            return Ok(());
        }
        // Timestamps sort lexicographically, oldest first
        rotated.sort();
        let excess = rotated.len() - self.config.max_rotated_files;
        for path in rotated.into_iter().take(excess) {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Cloneable handle to the rotating file, usable as a `MakeWriter`
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RollingWriter {
    /// Open (or create) `<dir>/<app_name>.log` for appending
    pub fn new(dir: impl AsRef<Path>, app_name: &str, config: RollingConfig) -> Result<Self, LoggerError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.log", app_name));
        let file = open_append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                dir,
                app_name: app_name.to_string(),
                config,
                file,
                written,
            })),
        })
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log writer poisoned"))?;

        if inner.written > 0 && inner.written + buf.len() as u64 > inner.config.max_file_bytes {
            inner.rotate()?;
        }

        inner.file.write_all(buf)?;
        inner.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log writer poisoned"))?;
        inner.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install the global subscriber with default limits.
///
/// The filter comes from `RUST_LOG`, falling back to `info`.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, RollingConfig::default(), "info")
}

/// Install the global subscriber with explicit limits and fallback filter
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: RollingConfig,
    default_filter: &str,
) -> Result<(), LoggerError> {
    let writer = RollingWriter::new(log_dir, app_name, config)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn rotated_files(dir: &Path, app_name: &str) -> io::Result<Vec<PathBuf>> {
    let active = format!("{}.log", app_name);
    let prefix = format!("{}.", app_name);

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name != active && name.starts_with(&prefix) && name.ends_with(".log") {
            files.push(entry.path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> RollingConfig {
        RollingConfig {
            max_file_bytes: 64,
            max_rotated_files: 2,
        }
    }

    #[test]
    fn test_writes_to_active_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::new(dir.path(), "TodoLists", RollingConfig::default()).unwrap();

        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        let content = fs::read_to_string(dir.path().join("TodoLists.log")).unwrap();
        assert_eq!(content, "hello\n");
    }

    #[test]
    fn test_rotates_past_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::new(dir.path(), "TodoLists", small_config()).unwrap();

        let line = format!("{}\n", "x".repeat(40));
        for _ in 0..6 {
            writer.write_all(line.as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        let rotated = rotated_files(dir.path(), "TodoLists").unwrap();
        assert!(!rotated.is_empty());
        assert!(rotated.len() <= 2);

        let active = fs::metadata(dir.path().join("TodoLists.log")).unwrap().len();
        assert!(active <= 64);
    }
}
