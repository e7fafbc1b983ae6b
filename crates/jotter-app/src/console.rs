//! Line-oriented console presentation.
//!
//! Each input line is one command. The console turns commands into
//! [`Intent`]s for the [`Controller`] and renders the note list and the edit
//! form as text. Deleting asks a `y/N` question; the next line is the answer
//! and anything other than `y`/`yes` cancels.

use std::fmt::Write as _;

use jotter_core::uuid_utils::short_id;
use jotter_core::{preview, Clock, Confirmation, EditSession, Note, SlotBackend};
use tokio::time::Instant;
use uuid::Uuid;

use crate::controller::Controller;
use crate::state::{Intent, Outcome};

pub const HELP: &str = "\
Commands:
  list                 show notes matching the current search
  search <text>        filter notes (empty text shows all)
  title <text>         set the title field
  body <markup>        set the body field
  show                 show the edit form
  add                  create a note from the form
  edit <id>            load a note into the form
  save                 save the form back to the note being edited
  clear                empty the form and stop editing
  delete <id>          delete a note (asks for confirmation)
  help                 show this help
  quit                 exit
Ids may be shortened to any unique prefix.";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Title(String),
    Body(String),
    Show,
    Add,
    Edit(String),
    Save,
    Clear,
    Delete(String),
    Help,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::Unknown(word) => write!(f, "unknown command '{word}' (try 'help')"),
            ParseError::MissingArgument(cmd) => write!(f, "'{cmd}' needs an argument"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one input line.
///
/// The command word is case-insensitive. Text arguments keep everything after
/// the first run of whitespace, so titles and markup may contain spaces.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_start();
    let (word, rest) = match line.find(char::is_whitespace) {
        Some(at) => (&line[..at], line[at..].trim_start()),
        None => (line, ""),
    };
    let rest = rest.trim_end_matches(['\r', '\n']);

    let id_arg = |cmd: &'static str| {
        let id = rest.trim();
        if id.is_empty() {
            Err(ParseError::MissingArgument(cmd))
        } else {
            Ok(id.to_string())
        }
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(ParseError::Empty),
        "list" | "ls" => Ok(Command::List),
        "search" | "find" => Ok(Command::Search(rest.to_string())),
        "title" => Ok(Command::Title(rest.to_string())),
        "body" => Ok(Command::Body(rest.to_string())),
        "show" => Ok(Command::Show),
        "add" | "new" => Ok(Command::Add),
        "edit" => id_arg("edit").map(Command::Edit),
        "save" => Ok(Command::Save),
        "clear" => Ok(Command::Clear),
        "delete" | "rm" => id_arg("delete").map(Command::Delete),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

/// Text produced in response to one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

/// Console session: command dispatch plus the pending delete question.
#[derive(Debug, Default)]
pub struct Console {
    pending_delete: Option<Uuid>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the next line answers a delete confirmation.
    pub fn awaiting_confirmation(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Prompt to show before reading the next line.
    pub fn prompt(&self) -> &'static str {
        if self.awaiting_confirmation() {
            "[y/N] "
        } else {
            "> "
        }
    }

    /// Handle one input line received at `now`.
    pub async fn handle_line<B: SlotBackend, C: Clock>(
        &mut self,
        controller: &mut Controller<B, C>,
        line: &str,
        now: Instant,
    ) -> Reply {
        if let Some(id) = self.pending_delete.take() {
            let confirmation = Confirmation::from_answer(line);
            let outcome = controller.dispatch(Intent::Delete { id, confirmation }).await;
            return Reply::text(match outcome {
                Outcome::Deleted(id) => format!("Deleted {}.", short_id(&id)),
                _ => "Delete cancelled.".to_string(),
            });
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(ParseError::Empty) => return Reply::default(),
            Err(e) => return Reply::text(format!("error: {e}")),
        };

        match command {
            Command::List => {
                controller.flush_search();
                Reply::text(render_list(controller.visible_notes(), controller.query()))
            }
            Command::Search(query) => {
                controller.type_query(query, now);
                Reply::default()
            }
            Command::Title(title) => {
                controller.dispatch(Intent::SetTitle(title)).await;
                Reply::default()
            }
            Command::Body(body) => {
                controller.dispatch(Intent::SetBody(body)).await;
                Reply::default()
            }
            Command::Show => Reply::text(render_form(controller)),
            Command::Add => {
                if controller.state().session() != EditSession::Idle {
                    return Reply::text("Editing a note; use 'save' or 'clear' first.");
                }
                match controller.dispatch(Intent::Add).await {
                    Outcome::Added(id) => Reply::text(format!("Added {}.", short_id(&id))),
                    _ => Reply::text("Nothing to add: title and body are empty."),
                }
            }
            Command::Edit(prefix) => match controller.state().resolve_prefix(&prefix) {
                Some(id) => {
                    controller.dispatch(Intent::SelectForEdit(id)).await;
                    Reply::text(render_form(controller))
                }
                None => Reply::text(format!("No single note matches '{prefix}'.")),
            },
            Command::Save => match controller.dispatch(Intent::SaveEdit).await {
                Outcome::Updated(id) => Reply::text(format!("Saved {}.", short_id(&id))),
                _ => Reply::text("Not editing a note; use 'add' for a new one."),
            },
            Command::Clear => {
                controller.dispatch(Intent::Clear).await;
                Reply::text("Form cleared.")
            }
            Command::Delete(prefix) => match controller.state().resolve_prefix(&prefix) {
                Some(id) => {
                    let title = controller
                        .state()
                        .note(id)
                        .map(|n| n.title.clone())
                        .unwrap_or_default();
                    self.pending_delete = Some(id);
                    Reply::text(format!("Delete \"{title}\"?"))
                }
                None => Reply::text(format!("No single note matches '{prefix}'.")),
            },
            Command::Help => Reply::text(HELP),
            Command::Quit => Reply {
                output: String::new(),
                quit: true,
            },
        }
    }
}

/// Render note cards, most recent first.
pub fn render_list(notes: Vec<&Note>, query: &str) -> String {
    let mut out = String::new();
    if notes.is_empty() {
        if query.trim().is_empty() {
            out.push_str("No notes yet.");
        } else {
            let _ = write!(out, "No notes match '{}'.", query.trim());
        }
        return out;
    }

    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{}  {}  {}",
            short_id(&note.id),
            note.updated_at.format("%Y-%m-%d %H:%M"),
            note.title
        );
        let text = preview(&note.body);
        if !text.is_empty() {
            let _ = write!(out, "\n          {text}");
        }
    }
    out
}

/// Render the edit form and the session state.
pub fn render_form<B: SlotBackend, C: Clock>(controller: &Controller<B, C>) -> String {
    let state = controller.state();
    let header = match state.session() {
        EditSession::Idle => "New note".to_string(),
        EditSession::Editing(id) => format!("Editing {}", short_id(&id)),
    };
    format!(
        "{header}\n  title: {}\n  body:  {}",
        state.draft().title,
        state.draft().body
    )
}
