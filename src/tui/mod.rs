//! Interactive terminal reader: outline sidebar plus scrolling article.

mod app;
mod help_text;
pub mod theme;
mod ui;
mod watcher;

pub use app::{App, Focus};
pub use theme::Theme;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

/// Poll interval when idle.
const TICK: Duration = Duration::from_millis(100);

/// Faster tick while a smooth scroll is running.
const ANIMATION_TICK: Duration = Duration::from_millis(16);

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: isize = 3;

/// Wheel scrolling moves the article whatever has focus. Needs mouse capture,
/// which the binary enables around [`run`].
fn handle_mouse(app: &mut App, kind: MouseEventKind) {
    match kind {
        MouseEventKind::ScrollDown => app.scroll_by(WHEEL_ROWS),
        MouseEventKind::ScrollUp => app.scroll_by(-WHEEL_ROWS),
        _ => {}
    }
}

/// Run the reader until the user quits.
pub fn run(terminal: &mut DefaultTerminal, app: App) -> Result<()> {
    let mut app = app;

    let mut file_watcher = watcher::PostWatcher::new()
        .inspect_err(|err| tracing::warn!(%err, "live reload unavailable"))
        .ok();
    if let (Some(watcher), Some(path)) = (file_watcher.as_mut(), app.source.path()) {
        // The directory is watched, so resolve symlinks to the real one
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if let Err(err) = watcher.follow(&path) {
            tracing::warn!(%err, path = %path.display(), "cannot watch post file");
        }
    }

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        let timeout = if app.is_animating() { ANIMATION_TICK } else { TICK };
        if !event::poll(timeout)? {
            app.tick();
            if let Some(ref mut watcher) = file_watcher {
                if watcher.poll() {
                    if let Err(err) = app.reload() {
                        app.set_status(format!("✗ Reload failed: {err}"));
                    }
                }
            }
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.show_help {
                    match key.code {
                        KeyCode::Char('?') | KeyCode::Esc => app.toggle_help(),
                        KeyCode::Char('j') | KeyCode::Down => app.scroll_help_down(),
                        KeyCode::Char('k') | KeyCode::Up => app.scroll_help_up(),
                        KeyCode::Char('q') => return Ok(()),
                        _ => {}
                    }
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('?') => app.toggle_help(),
                    KeyCode::Tab => app.toggle_focus(),
                    KeyCode::Char('o') => app.toggle_outline(),
                    KeyCode::Char('[') => app.shrink_outline(),
                    KeyCode::Char(']') => app.widen_outline(),
                    KeyCode::Char('w') => app.save_outline_width(),
                    KeyCode::Char('r') => {
                        if let Err(err) = app.reload() {
                            app.set_status(format!("✗ Reload failed: {err}"));
                        }
                    }
                    KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
                    KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
                    KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
                    KeyCode::PageUp => app.page_up(),
                    KeyCode::Char('j') | KeyCode::Down => match app.focus {
                        Focus::Outline => app.outline_next(),
                        Focus::Content => app.scroll_by(1),
                    },
                    KeyCode::Char('k') | KeyCode::Up => match app.focus {
                        Focus::Outline => app.outline_previous(),
                        Focus::Content => app.scroll_by(-1),
                    },
                    KeyCode::Enter if app.focus == Focus::Outline => app.jump_to_selected(),
                    _ => {}
                }
            }
            Event::Mouse(mouse) => handle_mouse(&mut app, mouse.kind),
            // The next draw picks up the new pane size and dispatches a resize
            Event::Resize(_, _) => {}
            _ => {}
        }
    }
}
