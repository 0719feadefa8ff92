//! pathlab: watch uninformed grid searches expand one node at a time.
//!
//! The binary wires a [`Visualizer`] model to the crossterm driver. The
//! library half exists so the model and its settings can be tested and
//! embedded without a terminal.

pub mod colors;
pub mod config;
pub mod logging;
pub mod model;
mod view;

pub use config::{Args, Settings};
pub use model::Visualizer;
