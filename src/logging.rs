//! Logging configuration.
//!
//! Logs go to stderr by default so they never mix with dumped file lists on
//! stdout. A log directory switches to daily rolling files, and on Linux the
//! output can be sent to systemd's journal instead.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize the logging system.
///
/// Log level can be controlled via the `ARFACE_LOG` environment variable:
/// - `ARFACE_LOG=debug` to see every query that is run
/// - `ARFACE_LOG=info` for connection messages
/// - `ARFACE_LOG=warn` for warnings and errors only (default)
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_env("ARFACE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    #[cfg(target_os = "linux")]
    {
        if config.journald {
            if let Ok(journald_layer) = tracing_journald::layer() {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(journald_layer)
                    .try_init()?;

                tracing::info!("Logging initialized with journald backend");
                return Ok(());
            }
        }
    }

    if let Some(log_dir) = &config.directory {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "arface.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard flushes pending lines on drop; keep it for the process lifetime
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .try_init()?;

        tracing::info!("Logging initialized with file backend at {:?}", log_dir);
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
