//! Logging setup for the command line tool.
//!
//! Normal runs print the report on stdout and send log events elsewhere:
//! systemd-journald on Linux, otherwise (or when the journal is unavailable)
//! a daily rolling file. `--verbose` switches to stderr at debug level so a
//! slow or surprising scan can be watched from the terminal.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "EXIFDASH_LOG";

/// Where log events go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Journald when available, else a rolling file under the given
    /// directory (or [`default_log_dir`]).
    Background(Option<PathBuf>),
    /// Human-readable lines on stderr.
    Stderr,
}

impl LogTarget {
    pub fn for_cli(verbose: bool) -> Self {
        if verbose {
            LogTarget::Stderr
        } else {
            LogTarget::Background(None)
        }
    }

    /// Filter used when `EXIFDASH_LOG` is unset.
    pub fn default_level(&self) -> &'static str {
        match self {
            LogTarget::Background(_) => "info",
            LogTarget::Stderr => "debug",
        }
    }
}

/// Initialize the logging system.
///
/// `EXIFDASH_LOG` (`debug`, `info`, `warn`, `error`) overrides the target's
/// default level.
pub fn init(target: LogTarget) -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(target.default_level()));

    let log_dir = match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
            return Ok(());
        }
        LogTarget::Background(dir) => dir,
    };

    #[cfg(target_os = "linux")]
    {
        if let Ok(journald_layer) = tracing_journald::layer() {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(journald_layer)
                .try_init()?;

            tracing::info!("Logging initialized with journald backend");
            return Ok(());
        }
    }

    let log_dir = log_dir.unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "exifdash.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops the writer thread; init() runs once
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()?;

    tracing::info!("Logging initialized with file backend at {:?}", log_dir);
    Ok(())
}

pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("exifdash")
        .join("logs")
}
