use anyhow::{Context, Result};
use crossterm::event::{DisableFocusChange, EnableFocusChange, Event, KeyEventKind};
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod app;
mod catalog;
mod fuzzy;
mod locator;
mod omnibar;
mod rank;
mod router;
mod store;
mod suggest;
mod ui;

/// How long the event loop sleeps when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    // 0. Handle CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("rove {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("rove — TUI content browser with a combined address/search bar");
        println!();
        println!("USAGE: rove [OPTIONS] [CATALOG]");
        println!();
        println!("Browse a content catalog through the omnibar: type a rove://");
        println!("address to open it directly, or anything else to search.");
        println!();
        println!("ARGS:");
        println!("  CATALOG            Path to a catalog JSON file");
        println!("                     (default: ~/.config/rove/catalog.json)");
        println!();
        println!("OPTIONS:");
        println!("  -q, --query <TEXT> Seed the omnibar with initial text");
        println!("  -h, --help         Print this help message");
        println!("  -V, --version      Print version");
        return Ok(());
    }

    let (catalog_path, initial_query) = parse_args(&args)?;

    // 1. Load the catalog and its history (before TUI)
    let catalog = if catalog_path.exists() {
        catalog::Catalog::load(&catalog_path)
            .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?
    } else {
        catalog::Catalog::empty()
    };

    let catalog_id = store::catalog_id::catalog_id(&catalog_path);
    let store_dir = store::config_path::ensure_catalog_dir(&catalog_id);
    let history = store::history::load_history(&store_dir);

    // 2. Install panic hook so terminal is restored on panic
    install_panic_hook();

    // 3. Initialize TUI; focus-change reporting lives exactly as long as
    // the terminal session does.
    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableFocusChange)?;
    let mut app = app::App::new(catalog, history, initial_query.as_deref());

    // 4. Event loop. The poll timeout tracks the earliest pending debounce
    // deadline so settled queries are delivered promptly.
    let result = run(&mut terminal, &mut app);

    // 5. Restore terminal
    crossterm::execute!(std::io::stdout(), DisableFocusChange).ok();
    ratatui::restore();
    result?;

    // 6. Persist history (after TUI cleanup)
    store::history::save_history(&store_dir, &app.history);

    Ok(())
}

fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut app::App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        let timeout = app
            .timer_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if crossterm::event::poll(timeout)? {
            match crossterm::event::read()? {
                Event::Key(key) => {
                    // Skip release/repeat events on some terminals
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let app::Action::Quit = app.handle_key(key, Instant::now()) {
                        return Ok(());
                    }
                }
                Event::FocusLost => app.on_focus_lost(),
                _ => {}
            }
        }

        app.poll_timers(Instant::now());
    }
}

/// Positional catalog path plus `--query`/`-q` seed text.
fn parse_args(args: &[String]) -> Result<(PathBuf, Option<String>)> {
    let mut catalog_path = None;
    let mut initial_query = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--query" | "-q" => {
                let text = iter
                    .next()
                    .with_context(|| format!("{arg} requires a value"))?;
                initial_query = Some(text.clone());
            }
            other if other.starts_with('-') => {
                anyhow::bail!("Unknown option '{other}' (see --help)");
            }
            other => {
                if catalog_path.is_some() {
                    anyhow::bail!("Multiple catalog paths given (see --help)");
                }
                catalog_path = Some(PathBuf::from(other));
            }
        }
    }

    let catalog_path =
        catalog_path.unwrap_or_else(|| store::config_path::default_catalog_path());
    Ok((catalog_path, initial_query))
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        crossterm::execute!(std::io::stdout(), DisableFocusChange).ok();
        ratatui::restore();
        original_hook(panic_info);
    }));
}
