use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::APP_NAME;

const LOG_FILE_NAME: &str = "metric-trainer.log";

/// Default log location under `$HOME/.local/state`, falling back to the
/// platform data directory
pub fn default_log_path() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        Some(
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join(LOG_FILE_NAME),
        )
    } else {
        ProjectDirs::from("", "", APP_NAME)
            .map(|proj_dirs| proj_dirs.data_local_dir().join(LOG_FILE_NAME))
    }
}

/// Install a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is written to stdout. Keep the guard alive until exit.
pub fn init(path: &Path) -> std::io::Result<WorkerGuard> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .map(|f| f.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(guard)
}
