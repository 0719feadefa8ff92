//! Crossterm terminal driver for pathlab.
//!
//! [`CrosstermDriver`] implements [`pathlab_core::Driver`]: it puts the
//! terminal in raw mode on an alternate screen, turns crossterm events into
//! [`Msg`]s, and writes diffed frames back out.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathlab_core::{Color, Context, Driver, Frame, Key, MouseAction, Msg, Point};

fn to_ct_color(c: Color) -> CtColor {
    match c {
        Color::Default => CtColor::Reset,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        _ => None,
    }
}

fn to_mouse_action(kind: MouseEventKind) -> Option<MouseAction> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(MouseAction::Main),
        MouseEventKind::Down(MouseButton::Right) => Some(MouseAction::Secondary),
        MouseEventKind::Drag(MouseButton::Left) => Some(MouseAction::Drag),
        MouseEventKind::Up(_) => Some(MouseAction::Release),
        _ => None,
    }
}

/// Translate one crossterm event. Key releases and repeats, unmapped keys,
/// and mouse motion without the main button are dropped.
fn to_msg(ev: Event, time: Instant) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) if kind == KeyEventKind::Press => {
            to_key(code).map(|key| Msg::KeyDown { key, time })
        }
        Event::Key(_) => None,
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => to_mouse_action(kind).map(|action| Msg::Mouse {
            action,
            pos: Point::new(column as i32, row as i32),
            time,
        }),
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        log::debug!("terminal initialised (mouse: {})", self.mouse_enabled);
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                execute!(io::stdout(), terminal::Clear(ClearType::All))?;
            }
            if let Some(msg) = to_msg(ev, Instant::now()) {
                tx.send(msg).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout().lock();

        for fc in &frame.cells {
            let p = fc.pos;
            let style = fc.glyph.style;
            queue!(
                stdout,
                cursor::MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(to_ct_color(style.fg)),
                SetBackgroundColor(to_ct_color(style.bg))
            )?;
            if style.bold {
                queue!(stdout, SetAttribute(Attribute::Bold))?;
            }
            queue!(stdout, Print(fc.glyph.ch))?;
            if style.bold {
                queue!(stdout, SetAttribute(Attribute::Reset))?;
            }
        }

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(
            stdout,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn colors() {
        assert_eq!(to_ct_color(Color::Default), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::Rgb(1, 2, 3)),
            CtColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn space_is_its_own_key() {
        assert_eq!(to_key(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(to_key(KeyCode::Char('3')), Some(Key::Char('3')));
        assert_eq!(to_key(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(to_key(KeyCode::F(1)), None);
    }

    #[test]
    fn key_press_only() {
        let now = Instant::now();
        let press = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(matches!(
            to_msg(press, now),
            Some(Msg::KeyDown { key: Key::Char('q'), .. })
        ));
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(to_msg(release, now).is_none());
    }

    #[test]
    fn mouse_mapping() {
        let now = Instant::now();
        let msg = to_msg(mouse(MouseEventKind::Down(MouseButton::Left), 7, 3), now);
        assert!(matches!(
            msg,
            Some(Msg::Mouse {
                action: MouseAction::Main,
                pos: Point { x: 7, y: 3 },
                ..
            })
        ));
        let msg = to_msg(mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0), now);
        assert!(matches!(
            msg,
            Some(Msg::Mouse {
                action: MouseAction::Drag,
                ..
            })
        ));
        assert!(to_msg(mouse(MouseEventKind::Moved, 1, 1), now).is_none());
        assert!(to_msg(mouse(MouseEventKind::Down(MouseButton::Middle), 1, 1), now).is_none());
    }

    #[test]
    fn resize() {
        let msg = to_msg(Event::Resize(80, 24), Instant::now());
        assert!(matches!(
            msg,
            Some(Msg::Screen {
                width: 80,
                height: 24
            })
        ));
    }
}
