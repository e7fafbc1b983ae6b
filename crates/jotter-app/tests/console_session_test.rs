/// End-to-end console sessions.
///
/// Each test drives the console line by line against real storage, then
/// reopens the collection to check what was persisted.
use std::time::Duration;

use chrono::{TimeZone, Utc};
use jotter_app::{Console, Controller};
use jotter_core::uuid_utils::short_id;
use jotter_core::{EditSession, ManualClock, SlotBackend};
use jotter_db::{FilesystemSlots, MemorySlots, NoteStorage};
use tokio::time::Instant;

const DEBOUNCE: Duration = Duration::from_millis(300);

fn clock() -> ManualClock {
    ManualClock::new(Utc.timestamp_millis_opt(1_706_000_000_000).single().unwrap())
}

async fn open<B: SlotBackend>(backend: B) -> Controller<B, ManualClock> {
    Controller::open(NoteStorage::new(backend, "notes"), clock(), DEBOUNCE).await
}

async fn send<B: SlotBackend>(
    console: &mut Console,
    controller: &mut Controller<B, ManualClock>,
    line: &str,
) -> String {
    console
        .handle_line(controller, line, Instant::now())
        .await
        .output
}

#[tokio::test]
async fn test_notes_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut controller = open(FilesystemSlots::new(dir.path())).await;
        let mut console = Console::new();
        send(&mut console, &mut controller, "title Shopping").await;
        send(&mut console, &mut controller, "body <p>milk <b>eggs</b></p>").await;
        let out = send(&mut console, &mut controller, "add").await;
        assert!(out.starts_with("Added "), "{out}");
    }

    let mut controller = open(FilesystemSlots::new(dir.path())).await;
    let mut console = Console::new();
    let list = send(&mut console, &mut controller, "list").await;
    assert!(list.contains("Shopping"), "{list}");
    assert!(list.contains("milk eggs"), "{list}");
}

#[tokio::test]
async fn test_blank_add_is_rejected() {
    let slots = MemorySlots::new();
    let mut controller = open(slots.clone()).await;
    let mut console = Console::new();

    send(&mut console, &mut controller, "title   ").await;
    send(&mut console, &mut controller, "body <p> </p>").await;
    let out = send(&mut console, &mut controller, "add").await;

    assert!(out.starts_with("Nothing to add"), "{out}");
    assert!(controller.state().notes().is_empty());
    assert_eq!(slots.peek("notes"), None);
}

#[tokio::test]
async fn test_edit_and_save_by_short_id() {
    let mut controller = open(MemorySlots::new()).await;
    let mut console = Console::new();

    send(&mut console, &mut controller, "title Draft").await;
    send(&mut console, &mut controller, "add").await;
    let id = controller.state().notes()[0].id;

    let form = send(&mut console, &mut controller, &format!("edit {}", short_id(&id))).await;
    assert!(form.starts_with("Editing"), "{form}");
    assert!(form.contains("title: Draft"), "{form}");
    assert_eq!(controller.state().session(), EditSession::Editing(id));

    // Adding is refused while a note is being edited.
    let out = send(&mut console, &mut controller, "add").await;
    assert!(out.starts_with("Editing a note"), "{out}");

    send(&mut console, &mut controller, "title Final").await;
    let out = send(&mut console, &mut controller, "save").await;
    assert!(out.starts_with("Saved"), "{out}");

    let notes = controller.state().notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, id);
    assert_eq!(notes[0].title, "Final");
    assert!(notes[0].updated_at > notes[0].created_at);
    assert_eq!(controller.state().session(), EditSession::Idle);
}

#[tokio::test]
async fn test_save_without_edit_session() {
    let mut controller = open(MemorySlots::new()).await;
    let mut console = Console::new();
    let out = send(&mut console, &mut controller, "save").await;
    assert!(out.starts_with("Not editing"), "{out}");
}

#[tokio::test]
async fn test_delete_requires_affirmative_answer() {
    let mut controller = open(MemorySlots::new()).await;
    let mut console = Console::new();

    send(&mut console, &mut controller, "title Keep me").await;
    send(&mut console, &mut controller, "add").await;
    let handle = short_id(&controller.state().notes()[0].id);

    let question = send(&mut console, &mut controller, &format!("delete {handle}")).await;
    assert_eq!(question, "Delete \"Keep me\"?");
    assert!(console.awaiting_confirmation());
    assert_eq!(console.prompt(), "[y/N] ");

    let out = send(&mut console, &mut controller, "maybe").await;
    assert_eq!(out, "Delete cancelled.");
    assert!(!console.awaiting_confirmation());
    assert_eq!(controller.state().notes().len(), 1);

    send(&mut console, &mut controller, &format!("delete {handle}")).await;
    let out = send(&mut console, &mut controller, "Y").await;
    assert!(out.starts_with("Deleted"), "{out}");
    assert!(controller.state().notes().is_empty());
}

#[tokio::test]
async fn test_deleting_edited_note_ends_session() {
    let mut controller = open(MemorySlots::new()).await;
    let mut console = Console::new();

    send(&mut console, &mut controller, "title Doomed").await;
    send(&mut console, &mut controller, "add").await;
    let handle = short_id(&controller.state().notes()[0].id);

    send(&mut console, &mut controller, &format!("edit {handle}")).await;
    send(&mut console, &mut controller, &format!("delete {handle}")).await;
    send(&mut console, &mut controller, "yes").await;

    assert_eq!(controller.state().session(), EditSession::Idle);
    assert!(controller.state().draft().is_blank());
}

#[tokio::test]
async fn test_unknown_reference() {
    let mut controller = open(MemorySlots::new()).await;
    let mut console = Console::new();
    let out = send(&mut console, &mut controller, "edit abc").await;
    assert_eq!(out, "No single note matches 'abc'.");
    assert!(!console.awaiting_confirmation());
}

#[tokio::test(start_paused = true)]
async fn test_search_is_debounced() {
    let mut controller = open(MemorySlots::new()).await;
    let mut console = Console::new();

    for (title, body) in [("Shopping", "<p>milk eggs</p>"), ("Work", "<p>budget</p>")] {
        send(&mut console, &mut controller, &format!("title {title}")).await;
        send(&mut console, &mut controller, &format!("body {body}")).await;
        send(&mut console, &mut controller, "add").await;
    }

    send(&mut console, &mut controller, "search eg").await;
    tokio::time::advance(Duration::from_millis(200)).await;
    send(&mut console, &mut controller, "search EGGS").await;
    tokio::time::advance(Duration::from_millis(200)).await;

    // The first query's timer was restarted by the second one.
    assert!(!controller.poll_search(Instant::now()));
    assert_eq!(controller.query(), "");

    tokio::time::advance(Duration::from_millis(100)).await;
    assert!(controller.poll_search(Instant::now()));
    assert_eq!(controller.query(), "EGGS");

    let visible = controller.visible_notes();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Shopping");
}

#[tokio::test]
async fn test_list_applies_pending_search() {
    let mut controller = open(MemorySlots::new()).await;
    let mut console = Console::new();

    send(&mut console, &mut controller, "title Shopping").await;
    send(&mut console, &mut controller, "add").await;

    send(&mut console, &mut controller, "search href").await;
    let list = send(&mut console, &mut controller, "list").await;
    assert_eq!(list, "No notes match 'href'.");

    send(&mut console, &mut controller, "search").await;
    let list = send(&mut console, &mut controller, "list").await;
    assert!(list.contains("Shopping"), "{list}");
}

#[tokio::test]
async fn test_quit_and_help() {
    let mut controller = open(MemorySlots::new()).await;
    let mut console = Console::new();

    let help = send(&mut console, &mut controller, "help").await;
    assert!(help.contains("delete <id>"));

    let reply = console.handle_line(&mut controller, "quit", Instant::now()).await;
    assert!(reply.quit);
}
