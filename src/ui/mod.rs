//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `render` - Layout and overlay dispatch
//! - `categories` - Category filter tabs
//! - `cards` - Article card grid and "load more" hint
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod cards;
mod categories;
mod help;
mod input;
mod loop_runner;
mod render;
mod status;

pub use loop_runner::{run, Action};
