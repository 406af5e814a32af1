use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "reel=info";

/// `<data_dir>/reel/reel.log`, or under the temp dir if there is no data dir
pub fn default_log_path() -> PathBuf {
  dirs::data_dir()
    .unwrap_or_else(std::env::temp_dir)
    .join("reel")
    .join("reel.log")
}

/// Split a log path into the directory to create and the file name
fn split_path(path: &Path) -> Result<(PathBuf, &std::ffi::OsStr)> {
  let file_name = path
    .file_name()
    .ok_or_else(|| eyre!("Log path {} has no file name", path.display()))?;
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  };
  Ok((dir, file_name))
}

/// Send tracing output to a file. The terminal belongs to the UI.
///
/// The returned guard flushes pending lines when dropped, so keep it alive
/// until the app exits.
pub fn init(log_file: Option<PathBuf>) -> Result<WorkerGuard> {
  let path = log_file.unwrap_or_else(default_log_path);
  let (dir, file_name) = split_path(&path)?;
  std::fs::create_dir_all(&dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, file_name));

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .try_init()
    .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

  Ok(guard)
}
