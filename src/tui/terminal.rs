//! ratatui + crossterm front-end for the [`Controller`].
//!
//! # Layout
//!
//! ```text
//! ┌──────────────── GNAV TUI ────────────────┐   header
//! │┌ Workspaces ─────────────────────────────┐│
//! ││(1) Web                                  ││   list
//! ││(2) Chat  *                              ││
//! │└─────────────────────────────────────────┘│
//! │[↑/↓] Move  [Enter] Switch …  /  Rename: _ │   footer or edit box
//! └───────────────────────────────────────────┘
//! ```
//!
//! The create dialog, help and messages are drawn as centred popups over
//! the list.  Everything runs on the calling thread; each key press is
//! handled to completion (including any external process the controller
//! spawns) before the next frame is drawn.

use crate::traits::{SettingsBridge, WorkspaceProbe};
use crate::tui::controller::{Controller, Flow, Key, Mode, FOOTER_TEXT, HELP_TEXT};
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io;

//  Theme

const BASE: Color = Color::Rgb(0x1E, 0x1E, 0x2E);
const SURFACE: Color = Color::Rgb(0x31, 0x32, 0x44);
const OVERLAY: Color = Color::Rgb(0x45, 0x47, 0x5A);
const TEXT: Color = Color::Rgb(0xD9, 0xE0, 0xEE);
const ROSEWATER: Color = Color::Rgb(0xF5, 0xE0, 0xDC);

fn base_style() -> Style {
    Style::default().fg(TEXT).bg(BASE)
}

fn popup_block(title: &str) -> Block<'_> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .title(title)
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(ROSEWATER))
        .style(Style::default().fg(TEXT).bg(OVERLAY))
}

//  Key translation

/// Map a terminal key event to a controller key.  Chords with Ctrl or Alt
/// are not bound to anything.
fn translate(key: &KeyEvent) -> Option<Key> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

//  Drawing

/// Centre a `width × height` rectangle inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn draw_popup(frame: &mut Frame, title: &str, body: &str, hint: &str) {
    let lines: Vec<Line> = body
        .lines()
        .map(Line::from)
        .chain([Line::from(""), Line::from(hint).alignment(Alignment::Center)])
        .collect();
    let inner_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let area = centered(frame.area(), inner_width.max(24) + 4, lines.len() as u16 + 2);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(popup_block(title)),
        area,
    );
}

fn draw<P: WorkspaceProbe, S: SettingsBridge>(frame: &mut Frame, ctl: &Controller<P, S>) {
    frame.render_widget(Block::default().style(base_style()), frame.area());

    let [head, body, foot] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new("GNAV TUI")
            .alignment(Alignment::Center)
            .style(Style::default().fg(ROSEWATER).add_modifier(Modifier::BOLD)),
        head,
    );

    let items: Vec<ListItem> = ctl.list_lines().into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(
            Block::bordered()
                .title(" Workspaces ")
                .border_style(Style::default().fg(ROSEWATER))
                .title_style(Style::default().fg(ROSEWATER)),
        )
        .highlight_style(Style::default().bg(SURFACE).add_modifier(Modifier::BOLD));
    let mut state = ListState::default();
    if !ctl.rows().is_empty() {
        state.select(Some(ctl.cursor()));
    }
    frame.render_stateful_widget(list, body, &mut state);

    let footer = match ctl.mode() {
        Mode::EditingName { index, buffer } => Paragraph::new(format!("Rename #{}: {}_", index + 1, buffer))
            .style(Style::default().fg(TEXT).bg(SURFACE)),
        _ => Paragraph::new(FOOTER_TEXT),
    };
    frame.render_widget(footer, foot);

    match ctl.mode() {
        Mode::CreatingCount { buffer } => draw_popup(
            frame,
            " Create # of Workspaces ",
            &format!("Count: {}_", buffer),
            "[Enter] OK  [Esc] Cancel",
        ),
        Mode::ShowingHelp => draw_popup(frame, " Help ", HELP_TEXT, "[ OK ]"),
        Mode::ShowingMessage(msg) => draw_popup(frame, "", msg, "[ OK ]"),
        Mode::Browsing | Mode::EditingName { .. } => {}
    }
}

//  Event loop

fn event_loop<P: WorkspaceProbe, S: SettingsBridge>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ctl: &mut Controller<P, S>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, ctl))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(k) = translate(&key) {
                if ctl.handle_key(k) == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }
}

/// Runs the wrapped closure when dropped, including while unwinding.
struct OnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!("failed to leave raw mode: {}", e);
    }
    if let Err(e) = crossterm::execute!(io::stdout(), LeaveAlternateScreen, Show) {
        warn!("failed to leave alternate screen: {}", e);
    }
}

/// Take over the terminal and run the interactive list until the user
/// quits.  The terminal is restored on every exit path, panics included.
pub fn run<P: WorkspaceProbe, S: SettingsBridge>(mut ctl: Controller<P, S>) -> io::Result<()> {
    enable_raw_mode()?;
    let _restore = OnDrop(restore_terminal);
    crossterm::execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    info!("interactive list started");
    let result = event_loop(&mut terminal, &mut ctl);
    info!("interactive list closed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn translates_keys() {
        assert_eq!(translate(&plain(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(translate(&plain(KeyCode::F(1))), None);
        assert_eq!(
            translate(&KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            Some(Key::Char('J'))
        );
    }

    #[test]
    fn ignores_ctrl_and_alt_chords() {
        assert_eq!(translate(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)), None);
        assert_eq!(translate(&KeyEvent::new(KeyCode::Char('r'), KeyModifiers::ALT)), None);
        assert_eq!(
            translate(&KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
            None
        );
    }

    #[test]
    fn restore_runs_when_loop_panics() {
        let restored = Cell::new(0);
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _restore = OnDrop(|| restored.set(restored.get() + 1));
            panic!("draw failed");
        }));
        assert!(result.is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn centers_popup() {
        let area = Rect::new(0, 0, 40, 20);
        let popup = centered(area, 20, 4);
        assert_eq!(popup, Rect::new(10, 8, 20, 4));
    }
}
