use crate::consts;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default location of the log file
fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("gridsnake").join("gridsnake.log"))
}

/// If the `GRIDSNAKE_LOG` environment variable is set, send log messages
/// matching its value (a filter such as `info` or `gridsnake=debug`) to a
/// file, and return the path to that file.  The terminal belongs to the game,
/// so nothing is ever logged to stderr.
pub(crate) fn init() -> anyhow::Result<Option<PathBuf>> {
    let Ok(directives) = std::env::var(consts::LOG_ENV_VAR) else {
        return Ok(None);
    };
    let Some(path) = default_log_path() else {
        anyhow::bail!("failed to determine path to local data directory");
    };
    let file = open_log_file(&path)?;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(EnvFilter::new(directives))
        .init();
    Ok(Some(path))
}

fn open_log_file(path: &Path) -> std::io::Result<fs_err::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}
