use clap::Parser;
use jotter_app::console::render_list;
use jotter_app::logging::{self, LogSettings};
use jotter_app::{AppConfig, Cli, Console, Controller};
use jotter_core::{SlotBackend, SystemClock};
use jotter_db::{FilesystemSlots, MemorySlots, NoteStorage};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::Instant;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log_settings = LogSettings::from_env(|name| std::env::var(name).ok());
    let _log_guard = logging::init(&log_settings);
    info!(
        log_format = log_settings.format_name(),
        log_file = %log_settings
            .file
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(stderr)".to_string()),
        "Logging initialized"
    );

    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;
    info!(
        data_dir = %config.data_dir.display(),
        storage_key = %config.storage_key,
        debounce_ms = config.search_debounce.as_millis() as u64,
        memory = config.memory,
        "Configuration loaded"
    );

    if config.memory {
        let storage = NoteStorage::new(MemorySlots::new(), config.storage_key.clone());
        run(storage, &config).await
    } else {
        let slots = FilesystemSlots::new(&config.data_dir);
        if let Err(e) = slots.validate().await {
            // Keep going: the session still works in memory, it just won't persist.
            warn!(
                data_dir = %config.data_dir.display(),
                error = %e,
                "Note storage is not writable"
            );
        }
        let storage = NoteStorage::new(slots, config.storage_key.clone());
        run(storage, &config).await
    }
}

async fn run<B: SlotBackend>(storage: NoteStorage<B>, config: &AppConfig) -> anyhow::Result<()> {
    let mut controller = Controller::open(storage, SystemClock, config.search_debounce).await;
    let mut console = Console::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    let intro = render_list(controller.visible_notes(), controller.query());
    write_block(&mut stdout, &intro, console.prompt()).await?;

    loop {
        let deadline = controller.search_deadline();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let reply = console.handle_line(&mut controller, &line, Instant::now()).await;
                if reply.quit {
                    break;
                }
                write_block(&mut stdout, &reply.output, console.prompt()).await?;
            }
            _ = wait_until(deadline) => {
                if controller.poll_search(Instant::now()) {
                    let list = render_list(controller.visible_notes(), controller.query());
                    write_block(&mut stdout, &format!("\n{list}"), console.prompt()).await?;
                }
            }
        }
    }

    info!(note_count = controller.state().notes().len(), "Session closed");
    Ok(())
}

/// Sleep until `deadline`, or forever when nothing is pending.
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

async fn write_block(
    out: &mut tokio::io::Stdout,
    text: &str,
    prompt: &str,
) -> std::io::Result<()> {
    if !text.is_empty() {
        out.write_all(text.as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    out.write_all(prompt.as_bytes()).await?;
    out.flush().await
}
