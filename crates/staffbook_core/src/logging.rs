//! Logging bootstrap for embedding programs.
//!
//! # Responsibility
//! - Start a rolling file logger at most once per process.
//! - Keep the `log` facade as the only logging surface used by the library.
//!
//! # Invariants
//! - Initialization with an identical config is idempotent.
//! - Initialization with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "staffbook";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    config: LoggingConfig,
    _handle: LoggerHandle,
}

/// Normalized logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LoggingConfig {
    /// Validates and normalizes a level name and a log directory.
    ///
    /// # Errors
    /// - Unknown level names.
    /// - Empty or relative directories.
    pub fn new(level: &str, log_dir: impl AsRef<Path>) -> Result<Self, String> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir.as_ref())?,
        })
    }

    /// Config using [`default_log_level`].
    pub fn with_default_level(log_dir: impl AsRef<Path>) -> Result<Self, String> {
        Self::new(default_log_level(), log_dir)
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Starts the process-wide file logger.
///
/// # Errors
/// - The directory cannot be created or the backend fails to start.
/// - Logging is already active with a different config.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let active = LOGGER.get_or_try_init(|| start_logger(config))?;
    if active.config != *config {
        return Err(format!(
            "logging already initialized with level `{}` at `{}`; refusing to switch to level `{}` at `{}`",
            active.config.level,
            active.config.log_dir.display(),
            config.level,
            config.log_dir.display()
        ));
    }
    Ok(())
}

/// Returns `(level, log_dir)` of the active logger, if any.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGER
        .get()
        .map(|active| (active.config.level, active.config.log_dir.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(config: &LoggingConfig) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&config.log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            config.log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(config.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", config.level))?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} version={}",
        config.level,
        config.log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        config: config.clone(),
        _handle: handle,
    })
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, String> {
    let text = log_dir.to_string_lossy();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = PathBuf::from(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, LoggingConfig};

    #[test]
    fn config_normalizes_level_names() {
        let dir = std::env::temp_dir();
        assert_eq!(LoggingConfig::new("INFO", &dir).unwrap().level(), "info");
        assert_eq!(
            LoggingConfig::new(" warning ", &dir).unwrap().level(),
            "warn"
        );
        assert!(LoggingConfig::new("verbose", &dir).is_err());
    }

    #[test]
    fn config_rejects_relative_and_empty_dirs() {
        let relative = LoggingConfig::new("info", "logs/dev").unwrap_err();
        assert!(relative.contains("absolute"));
        let empty = LoggingConfig::new("info", "  ").unwrap_err();
        assert!(empty.contains("empty"));
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let first_dir = tempfile::tempdir().unwrap();
        let second_dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig::new("info", first_dir.path()).unwrap();

        init_logging(&config).unwrap();
        init_logging(&config).unwrap();

        let level_conflict = LoggingConfig::new("debug", first_dir.path()).unwrap();
        assert!(init_logging(&level_conflict)
            .unwrap_err()
            .contains("refusing to switch"));

        let dir_conflict = LoggingConfig::new("info", second_dir.path()).unwrap();
        assert!(init_logging(&dir_conflict)
            .unwrap_err()
            .contains("refusing to switch"));

        let (level, dir) = logging_status().unwrap();
        assert_eq!(level, "info");
        assert_eq!(dir, first_dir.path());
    }
}
