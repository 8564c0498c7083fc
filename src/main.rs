//! scrollspy: a terminal pager that tracks which section of a document is in view.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use scrollspy::{app_state, config, document, formats, fragment, ui};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scrollspy")]
#[command(about = "Page through a document while tracking the section in view", long_about = None)]
struct Args {
    /// Markdown file to open, optionally followed by `#section`
    #[arg(value_name = "PATH[#FRAGMENT]")]
    target: String,

    /// Section to open at, overriding any fragment in the path
    #[arg(long)]
    fragment: Option<String>,

    /// Rows covered by the navigation bar
    #[arg(long, value_name = "ROWS")]
    nav_height: Option<u16>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print a JSON session report on exit
    #[arg(long)]
    report: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if let Some(rows) = args.nav_height {
        cfg.nav_bar_height = rows;
    }
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let (path, path_fragment) = fragment::split_target(&args.target);
    let initial_fragment = args.fragment.as_deref().or(path_fragment);

    let format = formats::markdown::MarkdownFormat;
    let doc = document::Document::load(Path::new(path), &format, cfg.section_level)?;
    if doc.headings.is_empty() {
        eprintln!("No sections found in {path}");
        return Ok(());
    }

    let mut state = app_state::AppState::new(doc, &cfg, initial_fragment, Instant::now())?;
    let (_, rows) = ratatui::crossterm::terminal::size()?;
    state.set_viewport(ui::page_rows(rows));

    run_tui(state, &cfg, args.report)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scrollspy=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

fn run_tui(mut app: app_state::AppState, cfg: &config::Config, report: bool) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.tracker.teardown();

    if let Err(e) = result {
        eprintln!("Error: {e}");
    } else if report {
        let json = serde_json::to_string_pretty(&app.report()).map_err(io::Error::other)?;
        println!("{json}");
    }

    Ok(())
}

/// Longest wait for input when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
    cfg: &config::Config,
) -> io::Result<()> {
    let frame_interval = cfg.frame_interval();
    loop {
        terminal.draw(|f| ui::draw(f, app, cfg))?;

        // Sleep until the next timer or frame is due, or until input arrives.
        let mut timeout = app
            .tracker
            .events()
            .time_until_next(Instant::now())
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));
        if app.tracker.page().is_animating() {
            timeout = timeout.min(frame_interval);
        }

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(app, key.code, key.modifiers) {
                        return Ok(());
                    }
                }
                Event::Resize(_, rows) => app.resize(ui::page_rows(rows)),
                _ => {}
            }
        }

        app.pump(Instant::now());
    }
}

/// Applies one key press. Returns `true` when the pager should quit.
fn handle_key(app: &mut app_state::AppState, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match app.current_view {
        app_state::View::Page => {
            let viewport = app.tracker.page().viewport_height().max(1.0);
            match code {
                KeyCode::Char('q') => return true,
                KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1.0),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1.0),
                KeyCode::PageUp => app.scroll_by(-viewport),
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(viewport),
                KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
                KeyCode::End | KeyCode::Char('G') => app.scroll_to_end(),
                KeyCode::Tab => app.navigate_relative(1),
                KeyCode::BackTab => app.navigate_relative(-1),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
                KeyCode::Char(c @ '1'..='9') => {
                    if let Some(digit) = c.to_digit(10) {
                        app.activate_nav(digit as usize - 1);
                    }
                }
                KeyCode::Char(':') => {
                    app.current_view = app_state::View::Command;
                    app.command_buffer.clear();
                    app.message = None;
                }
                KeyCode::Esc => app.message = None,
                _ => {}
            }
        }
        app_state::View::Command => match code {
            KeyCode::Char(c) => app.command_buffer.push(c),
            KeyCode::Backspace => {
                app.command_buffer.pop();
            }
            KeyCode::Enter => return app.execute_command(),
            KeyCode::Esc => {
                app.current_view = app_state::View::Page; // Return to the page, dropping input
                app.command_buffer.clear();
            }
            _ => {}
        },
    }
    false
}
