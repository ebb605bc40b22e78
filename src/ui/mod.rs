//! Terminal User Interface module.
//!
//! This module provides the TUI for the article manager, including:
//! - Main event loop (`run`)
//! - Input handling for the table and its dialogs
//! - Rendering for the article table, dialogs, and help overlay
//! - Background task event processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Frame layout and render dispatch
//! - `articles` - Article table widget
//! - `dialogs` - Form, delete-confirm, and filter overlays
//! - `status` - Status and info bar widgets
//! - `help` - Keybinding help overlay

mod articles;
mod dialogs;
mod events;
mod help;
mod input;
mod loop_runner;
mod render;
mod status;

// Re-export the public API
pub use loop_runner::{run, Action};
