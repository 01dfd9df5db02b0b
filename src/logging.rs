//! Tracing setup for the desktop app and the `cardioai-predict` tool.
//!
//! The desktop app logs to stdout and to one file per launch in
//! `.cardioai/logs`, keeping the newest [`KEEP_LOG_FILES`]. The tool logs
//! to stderr only so its stdout stays machine-readable.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

/// Log files kept in the logs folder after a launch.
pub const KEEP_LOG_FILES: usize = 10;
/// File names are `<prefix>_<YYYY-MM-DD_HH-MM-SS>.log`.
pub const LOG_FILE_PREFIX: &str = "cardioai";

const FILE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static INSTALLED: OnceLock<Installed> = OnceLock::new();

struct Installed {
    profile: LogProfile,
    _file_guard: Option<WorkerGuard>,
}

/// Which binary is logging; decides the sinks and the default filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogProfile {
    Desktop,
    Tool,
}

impl LogProfile {
    /// Directives used when `RUST_LOG` is unset or unparsable.
    pub const fn default_directives(self) -> &'static str {
        match self {
            // ureq and rustls are chatty at info for every health probe.
            LogProfile::Desktop => "info,ureq=warn,rustls=warn",
            LogProfile::Tool => "warn",
        }
    }

    fn filter(self, from_env: Option<&str>) -> EnvFilter {
        from_env
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(self.default_directives()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    Dirs(#[from] app_dirs::AppDirError),
    #[error("Log file error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to format log file time: {0}")]
    FormatTime(#[from] time::error::Format),
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install desktop logging. Later calls, from either profile, are no-ops.
pub fn init() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let log_dir = app_dirs::logs_dir()?;
    let file_name = log_file_name(local_now())?;
    let removed = prune_logs(&log_dir, KEEP_LOG_FILES.saturating_sub(1))?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&log_dir, &file_name));

    let subscriber = Registry::default()
        .with(LogProfile::Desktop.filter(env_directives().as_deref()))
        .with(fmt::layer().with_timer(line_timer()).with_writer(std::io::stdout))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(line_timer())
                .with_writer(writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = INSTALLED.set(Installed {
        profile: LogProfile::Desktop,
        _file_guard: Some(guard),
    });
    tracing::info!(
        "Logging to {} ({removed} old log files removed)",
        log_dir.join(&file_name).display()
    );
    Ok(())
}

/// Install tool logging on stderr, warnings by default. No file is written.
pub fn init_stderr() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let subscriber = Registry::default()
        .with(LogProfile::Tool.filter(env_directives().as_deref()))
        .with(fmt::layer().with_timer(line_timer()).with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = INSTALLED.set(Installed {
        profile: LogProfile::Tool,
        _file_guard: None,
    });
    Ok(())
}

/// The profile installed in this process, if any.
pub fn installed_profile() -> Option<LogProfile> {
    INSTALLED.get().map(|installed| installed.profile)
}

fn env_directives() -> Option<String> {
    std::env::var(EnvFilter::DEFAULT_ENV).ok()
}

fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn line_timer() -> fmt::time::OffsetTime<&'static [FormatItem<'static>]> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, LINE_STAMP)
}

fn log_file_name(at: OffsetDateTime) -> Result<String, LoggingError> {
    Ok(format!("{LOG_FILE_PREFIX}_{}.log", at.format(FILE_STAMP)?))
}

fn is_own_log(name: &str) -> bool {
    name.strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|rest| rest.ends_with(".log"))
}

/// Delete our oldest log files so at most `keep` remain; returns how many went.
///
/// Names embed a zero-padded timestamp, so lexical order is launch order.
/// Files that do not follow the naming scheme are left alone.
fn prune_logs(dir: &Path, keep: usize) -> Result<usize, LoggingError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LoggingError::Io { path, source }
    };
    let mut names: Vec<String> = fs::read_dir(dir)
        .map_err(io_err(dir))?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_own_log(name))
        .collect();
    if names.len() <= keep {
        return Ok(0);
    }
    names.sort();
    let excess = names.len() - keep;
    for name in &names[..excess] {
        let path = dir.join(name);
        fs::remove_file(&path).map_err(io_err(&path))?;
    }
    Ok(excess)
}
