//! parley-tui: Terminal UI for the parley direct-message screen
//!
//! This crate provides the TUI layer for parley, including:
//! - The chat screen (header, message cards, composer, key hints)
//! - Attach prompt and help overlays
//! - Theme, icon, and border sets with ASCII fallback

mod app;
pub mod conversation;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
pub mod text;
pub mod theme;
pub mod ui;

use screens::Screen as ScreenTrait;

pub use app::{App, Mode, UiConfig};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use parley_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parley_engine::{Config, Message};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, Terminal};
use std::io::{self, stdout};
use std::time::Instant;
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal on exit.
pub async fn run_tui(
    config: Config,
    messages: Vec<Message>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config, messages)?;

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(app.config.tick_rate_ms);
    info!(messages = app.store.len(), "Chat screen started");

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;
    info!(messages = app.store.len(), "Chat screen closed");

    result
}

/// Draw the whole UI for the app's current mode.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    screens::chat::ChatScreen.render(app, area, buf);
    match app.mode {
        Mode::Compose => {}
        Mode::AttachPrompt => screens::render_attach_prompt(app, area, buf),
        Mode::Help => screens::render_help_overlay(app, area, buf),
    }
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            render_app(app, area, frame.buffer_mut());
        })?;

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => app.handle_action(key_to_action(key)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => app.handle_action(Action::ScrollUp),
                MouseEventKind::ScrollDown => app.handle_action(Action::ScrollDown),
                _ => {}
            },
            Event::Tick | Event::Resize(_, _) => {}
        }

        // Typing keeps the channel busy, so timers advance on every event
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}


#[cfg(test)]
mod render_tests {
    use super::*;
    use crate::test_utils::*;
    use insta::assert_snapshot;

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = create_test_terminal_sized(width, height);
        terminal
            .draw(|frame| render_app(app, frame.area(), frame.buffer_mut()))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn test_compose_mode_has_no_overlay() {
        let app = create_test_app();
        let out = render(&app, TEST_WIDTH, TEST_HEIGHT);
        assert!(!out.contains(" Help "));
        assert!(!out.contains("Attach image or video"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        let out = render(&app, TEST_WIDTH, TEST_HEIGHT);
        assert!(out.contains(" Help "));
        assert!(out.contains("Shift/Alt+Enter    New line"));
        assert!(out.lines().last().unwrap().contains("Close"));
    }

    #[test]
    fn test_attach_prompt_overlay() {
        let mut app = create_test_app();
        app.handle_action(Action::Attach);
        for c in "cat.png".chars() {
            app.handle_action(Action::Insert(c));
        }
        let out = render(&app, TEST_WIDTH, TEST_HEIGHT);
        assert!(out.contains("Attach image or video"));
        assert!(out.contains("Path: cat.png"));
        assert!(out.contains("Images and videos only"));
        // Typing in the prompt does not touch the draft
        assert_eq!(app.store.draft_text(), "");
    }

    #[test]
    fn test_attach_prompt_shows_error() {
        let mut app = create_test_app();
        app.handle_action(Action::Attach);
        for c in "/definitely/missing.png".chars() {
            app.handle_action(Action::Insert(c));
        }
        app.handle_action(Action::Send);
        let out = render(&app, TEST_WIDTH, TEST_HEIGHT);
        assert!(out.contains("file not found: /definitely/missing.png"));
        assert!(!out.contains("Images and videos only"));
    }

    #[test]
    fn test_hint_bar_snapshot() {
        let app = create_test_app();
        let out = render(&app, 60, 12);
        assert_snapshot!(
            out.lines().last().unwrap().trim(),
            @"Enter  Send  S-Enter  Newline  ^O  Attach  ^C  Quit"
        );
    }
}
