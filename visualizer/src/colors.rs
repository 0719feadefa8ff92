//! Colour palette.

use pathlab_core::Color;

// -- Grid cells --

pub const START: Color = Color::from_rgb(0, 200, 0);
pub const END: Color = Color::from_rgb(210, 0, 0);
pub const WALL: Color = Color::from_rgb(0, 0, 0);
pub const PATH: Color = Color::from_rgb(128, 0, 128);
pub const EXPLORED: Color = Color::from_rgb(0, 220, 220);
pub const FRONTIER: Color = Color::from_rgb(173, 216, 230);
pub const FREE: Color = Color::from_rgb(255, 255, 255);

// -- Panel --

pub const PANEL_BG: Color = Color::from_rgb(18, 18, 32);
pub const STATUS_BG: Color = Color::from_rgb(10, 10, 20);
pub const TEXT: Color = Color::from_rgb(240, 240, 240);
pub const TEXT_DIM: Color = Color::from_rgb(145, 145, 158);
pub const BTN_ACTIVE: Color = Color::from_rgb(46, 160, 67);
pub const BTN_IDLE: Color = Color::from_rgb(45, 50, 70);

// -- Status line --

pub const STATUS_FOUND: Color = Color::from_rgb(50, 220, 100);
pub const STATUS_NOT_FOUND: Color = Color::from_rgb(220, 60, 60);

// -- Log levels --

pub const LOG_ERROR: Color = Color::from_rgb(255, 85, 85);
pub const LOG_WARN: Color = Color::from_rgb(220, 200, 60);
pub const LOG_DEBUG: Color = Color::from_rgb(100, 130, 255);

/// Colour for a log line of the given level.
pub fn log_color(level: log::Level) -> Color {
    match level {
        log::Level::Error => LOG_ERROR,
        log::Level::Warn => LOG_WARN,
        log::Level::Info => TEXT,
        log::Level::Debug => LOG_DEBUG,
        log::Level::Trace => TEXT_DIM,
    }
}
