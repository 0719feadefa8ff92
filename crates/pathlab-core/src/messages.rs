//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use std::time::Instant;

use crate::geom::Point;

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Backspace,
    /// A printable character.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Mouse moved with the primary button held.
    Drag,
    /// Button released.
    Release,
}

/// A message delivered to the application model.
#[derive(Clone, Debug)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key, time: Instant },
    /// A mouse event at a screen position.
    Mouse {
        action: MouseAction,
        pos: Point,
        time: Instant,
    },
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
    /// Periodic tick, sent at the model's requested rate.
    Tick(Instant),
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
}

impl Msg {
    /// Convenience: create a `KeyDown` stamped now.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            time: Instant::now(),
        }
    }

    /// Convenience: create a `Mouse` message stamped now.
    pub fn mouse(action: MouseAction, pos: Point) -> Self {
        Self::Mouse {
            action,
            pos,
            time: Instant::now(),
        }
    }
}
