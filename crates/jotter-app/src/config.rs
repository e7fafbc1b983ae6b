//! Runtime configuration.
//!
//! Values come from environment variables (optionally loaded from `.env`)
//! and can be overridden by command-line flags:
//!
//! | Env                         | Flag            | Default |
//! |-----------------------------|-----------------|---------|
//! | `JOTTER_DATA_DIR`           | `--data-dir`    | `$XDG_DATA_HOME/jotter`, `$HOME/.local/share/jotter`, `./.jotter` |
//! | `JOTTER_STORAGE_KEY`        | `--storage-key` | `notes` |
//! | `JOTTER_SEARCH_DEBOUNCE_MS` | `--debounce-ms` | `300` |
//! | `JOTTER_MEMORY`             | `--memory`      | off |

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use jotter_core::defaults::{
    DATA_DIR_NAME, ENV_DATA_DIR, ENV_MEMORY, ENV_SEARCH_DEBOUNCE_MS, ENV_STORAGE_KEY,
    FALLBACK_DATA_DIR, SEARCH_DEBOUNCE_MS, STORAGE_KEY,
};
use jotter_core::{Error, Result};
use jotter_db::validate_key;
use tracing::warn;

#[derive(Debug, Default, Parser)]
#[command(name = "jotter")]
#[command(author, version, about = "Take, edit and search notes from the terminal")]
pub struct Cli {
    /// Directory holding the note collection
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Storage slot holding the note collection
    #[arg(long)]
    pub storage_key: Option<String>,

    /// Quiet period before a search query is applied, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Keep notes in memory only; nothing is written to disk
    #[arg(long)]
    pub memory: bool,
}

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub search_debounce: Duration,
    pub memory: bool,
}

impl AppConfig {
    /// Resolve configuration from the process environment and `cli`.
    pub fn load(cli: &Cli) -> Result<Self> {
        Self::resolve(cli, |name| std::env::var(name).ok())
    }

    /// Resolve configuration from `env` and `cli`; flags win over the
    /// environment. An invalid debounce value falls back to the default; an
    /// invalid storage key is an error.
    pub fn resolve(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| non_empty(env(ENV_DATA_DIR)).map(PathBuf::from))
            .unwrap_or_else(|| default_data_dir(&env));

        let storage_key = cli
            .storage_key
            .clone()
            .or_else(|| non_empty(env(ENV_STORAGE_KEY)))
            .unwrap_or_else(|| STORAGE_KEY.to_string());
        validate_key(&storage_key).map_err(|e| Error::Config(e.to_string()))?;

        let debounce_ms = match cli.debounce_ms {
            Some(ms) => ms,
            None => match non_empty(env(ENV_SEARCH_DEBOUNCE_MS)) {
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    warn!(
                        env = ENV_SEARCH_DEBOUNCE_MS,
                        value = %raw,
                        default = SEARCH_DEBOUNCE_MS,
                        "Invalid debounce delay, using default"
                    );
                    SEARCH_DEBOUNCE_MS
                }),
                None => SEARCH_DEBOUNCE_MS,
            },
        };

        let memory = cli.memory
            || env(ENV_MEMORY)
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false);

        Ok(Self {
            data_dir,
            storage_key,
            search_debounce: Duration::from_millis(debounce_ms),
            memory,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_data_dir(env: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(xdg) = non_empty(env("XDG_DATA_HOME")) {
        return PathBuf::from(xdg).join(DATA_DIR_NAME);
    }
    if let Some(home) = non_empty(env("HOME")) {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(DATA_DIR_NAME);
    }
    PathBuf::from(FALLBACK_DATA_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::resolve(&Cli::default(), env_of(&[("HOME", "/home/ada")])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/home/ada/.local/share/jotter"));
        assert_eq!(config.storage_key, "notes");
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert!(!config.memory);
    }

    #[test]
    fn test_xdg_data_home_wins_over_home() {
        let config = AppConfig::resolve(
            &Cli::default(),
            env_of(&[("HOME", "/home/ada"), ("XDG_DATA_HOME", "/xdg")]),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/xdg/jotter"));
    }

    #[test]
    fn test_fallback_data_dir() {
        let config = AppConfig::resolve(&Cli::default(), env_of(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".jotter"));
    }

    #[test]
    fn test_env_values() {
        let config = AppConfig::resolve(
            &Cli::default(),
            env_of(&[
                ("JOTTER_DATA_DIR", "/srv/notes"),
                ("JOTTER_STORAGE_KEY", "work-notes"),
                ("JOTTER_SEARCH_DEBOUNCE_MS", "150"),
                ("JOTTER_MEMORY", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/notes"));
        assert_eq!(config.storage_key, "work-notes");
        assert_eq!(config.search_debounce, Duration::from_millis(150));
        assert!(config.memory);
    }

    #[test]
    fn test_flags_override_env() {
        let cli = Cli {
            data_dir: Some(PathBuf::from("/flag")),
            storage_key: Some("flagged".into()),
            debounce_ms: Some(0),
            memory: false,
        };
        let config = AppConfig::resolve(
            &cli,
            env_of(&[
                ("JOTTER_DATA_DIR", "/env"),
                ("JOTTER_STORAGE_KEY", "env-key"),
                ("JOTTER_SEARCH_DEBOUNCE_MS", "999"),
            ]),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/flag"));
        assert_eq!(config.storage_key, "flagged");
        assert_eq!(config.search_debounce, Duration::ZERO);
    }

    #[test]
    fn test_invalid_debounce_falls_back() {
        let config = AppConfig::resolve(
            &Cli::default(),
            env_of(&[("JOTTER_SEARCH_DEBOUNCE_MS", "soon")]),
        )
        .unwrap();
        assert_eq!(config.search_debounce, Duration::from_millis(300));
    }

    #[test]
    fn test_invalid_storage_key_is_config_error() {
        let err = AppConfig::resolve(
            &Cli::default(),
            env_of(&[("JOTTER_STORAGE_KEY", "../escape")]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config = AppConfig::resolve(
            &Cli::default(),
            env_of(&[("JOTTER_STORAGE_KEY", "  "), ("JOTTER_DATA_DIR", "")]),
        )
        .unwrap();
        assert_eq!(config.storage_key, "notes");
        assert_eq!(config.data_dir, PathBuf::from(".jotter"));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["jotter", "--data-dir", "/tmp/j", "--debounce-ms", "50", "--memory"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/j")));
        assert_eq!(cli.debounce_ms, Some(50));
        assert!(cli.memory);
        assert_eq!(cli.storage_key, None);
    }
}
