//! geodrill: terminal drilldown map (World -> India -> Gujarat).

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use geodrill_core::{logging, AppConfig, DrilldownController, FallbackLoader, HttpSource};
use geodrill_tui::app::AppState;
use geodrill_tui::worker::{self, ChannelView, WorkerCommand};
use geodrill_tui::{input, ui};

#[derive(Parser)]
#[command(name = "geodrill", about = "Drill-down map of leads by region")]
struct Args {
    /// Config file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref())?;
    let log_file = config.log_file();
    logging::init_file(&log_file, &config.log.level)
        .with_context(|| format!("cannot open log file {}", log_file.display()))?;

    let catalog = config.catalog()?;
    let root = catalog.root();
    let source = HttpSource::new(&config.http).context("building HTTP client")?;
    let loader = FallbackLoader::new(source);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    let controller = DrilldownController::new(catalog, loader, ChannelView::new(resp_tx));
    let worker_handle = worker::spawn_worker(controller, cmd_rx)?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, root);
    app.send(WorkerCommand::Start);
    info!(log = %log_file.display(), "geodrill started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker. A load in flight finishes before the worker sees this.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    if worker_handle.join().is_err() {
        warn!("worker thread panicked");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.apply(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Resize(_, _) => terminal.autoresize()?,
                _ => {}
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
