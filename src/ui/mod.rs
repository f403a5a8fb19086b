//! Terminal User Interface module.
//!
//! This module provides the TUI for browsing cats, including:
//! - Main event loop (`run`)
//! - Keyboard input handling for the list and the help overlay
//! - Rendering for the cat list, details pane, status bar and help overlay
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `render` - Layout and overlay dispatch
//! - `cats` - Cat list widget
//! - `details` - Selected cat details widget
//! - `status` - Status bar widget
//! - `help` - Keybinding help overlay

mod cats;
mod details;
mod help;
mod input;
mod loop_runner;
mod render;
mod status;

pub use loop_runner::{run, Action};
