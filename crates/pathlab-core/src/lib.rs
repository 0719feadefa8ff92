//! **pathlab-core**: core types for the pathlab grid-search workbench.
//!
//! This crate provides the foundational types used across the workspace:
//! grid geometry, the editable [`Board`] that searches run over, styled
//! glyphs and a diffing canvas, input messages, and the Elm-architecture
//! application loop that drives a front end.

pub mod app;
pub mod board;
pub mod canvas;
pub mod geom;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use board::{Board, EditError, EditOp, Marker, ParseError, Tile};
pub use canvas::{Canvas, Frame, FrameCell, Glyph};
pub use geom::{Bounds, Cell, Point};
pub use messages::{Key, MouseAction, Msg};
pub use style::{Color, Style};
