//! Tracing subscriber setup for the `jotter` binary.
//!
//! | Env          | Meaning                                           | Default  |
//! |--------------|---------------------------------------------------|----------|
//! | `RUST_LOG`   | standard env filter                               | [`DEFAULT_FILTER`] |
//! | `LOG_FORMAT` | `json` or `text`                                  | `text`   |
//! | `LOG_FILE`   | log to this file with daily rotation              | stderr   |
//! | `LOG_ANSI`   | `true`/`1` or anything else to force colours off  | on for a terminal, off for files |
//!
//! Logs never go to stdout; the console owns it.

use std::ffi::OsStr;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "jotter=info,jotter_app=info,jotter_db=info";

const DEFAULT_FILE_NAME: &str = "jotter.log";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub json: bool,
    pub file: Option<PathBuf>,
    pub ansi: Option<bool>,
}

impl LogSettings {
    pub fn from_env(env: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            json: env("LOG_FORMAT").is_some_and(|v| v.trim().eq_ignore_ascii_case("json")),
            file: env("LOG_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            ansi: env("LOG_ANSI").map(|v| matches!(v.trim(), "true" | "1")),
        }
    }

    pub fn format_name(&self) -> &'static str {
        if self.json {
            "json"
        } else {
            "text"
        }
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// whole run or buffered file output is lost.
pub fn init(settings: &LogSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let (writer, guard, ansi) = match &settings.file {
        Some(path) => {
            let (dir, name) = split_log_path(path);
            let appender = tracing_appender::rolling::daily(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (
                BoxMakeWriter::new(non_blocking),
                Some(guard),
                settings.ansi.unwrap_or(false),
            )
        }
        None => (
            BoxMakeWriter::new(std::io::stderr),
            None,
            settings
                .ansi
                .unwrap_or_else(|| std::io::stderr().is_terminal()),
        ),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);
    let registry = tracing_subscriber::registry().with(filter);
    if settings.json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer).init();
    }

    guard
}

/// Directory and file name for the rolling appender. A bare file name logs
/// into the working directory.
fn split_log_path(path: &Path) -> (&Path, &OsStr) {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .unwrap_or(OsStr::new(DEFAULT_FILE_NAME));
    (dir, name)
}
