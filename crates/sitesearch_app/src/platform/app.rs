use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use sitesearch_core::{AppState, FormInput};
use sitesearch_logging::{search_error, search_info};

use super::config::{AppConfig, Args};
use super::logging;
use super::session::Session;
use super::ui::input::{handle_key, KeyAction, UiCursor};
use super::ui::render;

/// Input poll interval; also bounds how long a finished search waits to be shown.
const POLL_INTERVAL: Duration = Duration::from_millis(75);

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(&args).context("loading configuration")?;
    logging::initialize(config.log_destination, config.level(), &config.log_file);
    search_info!("sitesearch starting, endpoint {}", config.endpoint);

    if !io::stdout().is_terminal() {
        anyhow::bail!("sitesearch needs an interactive terminal");
    }

    let initial = AppState::with_form(FormInput {
        url: args.url.clone().unwrap_or_default(),
        query: args.query.clone().unwrap_or_default(),
    });
    let mut session =
        Session::new(initial, config.client_settings()).context("creating search client")?;

    let mut terminal = setup_terminal().context("initializing terminal")?;
    let outcome = event_loop(&mut terminal, &mut session);
    if let Err(err) = restore_terminal(&mut terminal) {
        search_error!("failed to restore terminal: {err}");
    }
    search_info!("sitesearch exiting");
    outcome
}

fn event_loop(terminal: &mut Term, session: &mut Session) -> anyhow::Result<()> {
    let mut cursor = UiCursor::default();
    let mut redraw = true;

    loop {
        if redraw {
            let view = session.view();
            cursor.sync(&view);
            terminal.draw(|frame| render::draw(frame, &view, &cursor))?;
            redraw = false;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let view = session.view();
                    match handle_key(key, &mut cursor, &view) {
                        KeyAction::Dispatch(msg) => redraw |= session.dispatch(msg),
                        KeyAction::Redraw => redraw = true,
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Ignored => {}
                    }
                }
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }

        redraw |= session.pump();
    }
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
