//! Editor state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete editor state
//! - [`Message`]: All possible events and actions
//! - [`update`]: State transitions, with file writes deferred to a
//!   side-effect pass
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod prompt;
mod update;

pub use model::{BAR_ROWS, HELP_MESSAGE, MessageLevel, Model};
pub use prompt::Prompt;
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::Settings;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    settings: Settings,
}

impl App {
    /// Create a new application, optionally editing `file_path`.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            settings: Settings::default(),
        }
    }

    /// Use resolved settings instead of the defaults.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}
