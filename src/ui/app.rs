//! Full-screen terminal frontend.
//!
//! The event loop uses `tokio::select!` to handle:
//! - State updates from the polling loop
//! - User keyboard input, forwarded from a dedicated input thread
//! - A redraw tick that keeps the clock and active line moving between polls

use crate::lyrics::sync;
use crate::pool::{self, PlayerCommand};
use crate::state::Update;
use crate::ui::styles::LyricStyles;
use crate::ui::view;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::error::Error;
use std::io;
use std::thread;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::time::Duration;

/// Which of the three screens is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Now,
    Info,
    Lines,
}

struct UiState {
    last_update: Option<Update>,
    /// Instant when the last Update was received; used to estimate the
    /// current position between polls.
    last_update_instant: Option<Instant>,
    view: View,
    should_exit: bool,
}

impl UiState {
    fn new() -> Self {
        Self {
            last_update: None,
            last_update_instant: None,
            view: View::Now,
            should_exit: false,
        }
    }

    fn toggle_view(&mut self, target: View) {
        self.view = if self.view == target { View::Now } else { target };
    }
}

/// Run the terminal frontend against a player service.
pub async fn run(
    poll_interval: Duration,
    service: String,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let (update_tx, mut update_rx) = mpsc::channel(32);
    let (command_tx, command_rx) = mpsc::channel(8);
    let (_shutdown_tx, shutdown_rx) = mpsc::channel(1);
    tokio::spawn(pool::listen(
        update_tx,
        command_rx,
        shutdown_rx,
        poll_interval,
        service,
    ));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let styles = LyricStyles::default();
    let mut state = UiState::new();

    // Single background thread polling crossterm events and forwarding them
    // into the async runtime. try_send lets the thread exit once the
    // receiver is dropped.
    let (event_tx, mut event_rx) = mpsc::channel(32);
    thread::spawn(move || {
        loop {
            match crossterm::event::poll(std::time::Duration::from_millis(100)) {
                Ok(true) => {
                    if let Ok(ev) = crossterm::event::read()
                        && event_tx.try_send(ev).is_err()
                    {
                        break;
                    }
                }
                Ok(false) => {}
                Err(_) => std::thread::sleep(std::time::Duration::from_millis(100)),
            }
        }
    });

    let mut redraw = tokio::time::interval(Duration::from_millis(250));
    let result = loop {
        tokio::select! {
            maybe_update = update_rx.recv() => {
                match maybe_update {
                    Some(update) => {
                        state.last_update = Some(update);
                        state.last_update_instant = Some(Instant::now());
                    }
                    // Backend gone -> exit gracefully
                    None => state.should_exit = true,
                }
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(event) => process_key(event, &mut state, &command_tx),
                    None => state.should_exit = true,
                }
            }
            _ = redraw.tick() => {}
        }
        if state.should_exit {
            break Ok(());
        }
        if let Err(e) = draw_frame(&mut terminal, &state, &styles) {
            break Err(Box::new(e) as Box<dyn Error + Send + Sync>);
        }
    };

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    result
}

/// Estimate the current position from the last snapshot, resolve the active
/// line against it, and draw the selected view.
fn draw_frame(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &UiState,
    styles: &LyricStyles,
) -> io::Result<()> {
    let estimated = state.last_update.as_ref().map(|update| {
        let mut position_ms = update.position_ms;
        if update.playing
            && let Some(at) = state.last_update_instant
        {
            position_ms += at.elapsed().as_millis() as u64;
        }
        (update, position_ms)
    });

    terminal.draw(|frame| match estimated {
        Some((update, position_ms)) => {
            let index = sync::active_index(&update.lines, position_ms);
            view::draw(frame, Some(update), position_ms, index, state.view, styles);
        }
        None => view::draw(frame, None, 0, None, state.view, styles),
    })?;
    Ok(())
}

/// Single-key commands: transport, view toggles, quit.
fn process_key(event: Event, state: &mut UiState, command_tx: &mpsc::Sender<PlayerCommand>) {
    let Event::Key(key) = event else {
        return;
    };
    let send = |cmd: PlayerCommand| {
        let _ = command_tx.try_send(cmd);
    };
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_exit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_exit = true;
        }
        KeyCode::Char('p') => send(PlayerCommand::PlayPause),
        KeyCode::Char('n') | KeyCode::Char('j') => send(PlayerCommand::Next),
        KeyCode::Char('N') | KeyCode::Char('k') => send(PlayerCommand::Previous),
        KeyCode::Char('i') => state.toggle_view(View::Info),
        KeyCode::Char('l') => state.toggle_view(View::Lines),
        KeyCode::Enter => state.view = View::Now,
        _ => {}
    }
}
