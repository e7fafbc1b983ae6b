//! # jotter-app
//!
//! Session layer for jotter: the pure note-store state machine, the
//! controller that persists it, configuration, and the line-oriented console
//! the `jotter` binary runs.

pub mod config;
pub mod console;
pub mod controller;
pub mod logging;
pub mod state;

pub use config::{AppConfig, Cli};
pub use console::{parse_command, Command, Console, Reply};
pub use controller::Controller;
pub use state::{AppState, Intent, Outcome};
