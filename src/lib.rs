// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. file::FileError)
    clippy::module_name_repetitions
)]

//! # Tex
//!
//! A small terminal text editor.
//!
//! Tex edits one file at a time, byte by byte, with:
//! - Tab expansion to a configurable tab stop
//! - Syntax highlighting for C, Rust and Python, including multi-line comments
//! - Incremental search that restores highlighting when it ends
//! - Unsaved-change protection on quit
//!
//! ## Architecture
//!
//! Tex uses The Elm Architecture (TEA) pattern:
//! - **Model**: Editor state
//! - **Message**: Decoded keys and terminal events
//! - **Update**: State transitions
//! - **View**: A pure [`ui::FrameView`] drawn with ratatui
//!
//! ## Modules
//!
//! - [`app`]: Main event loop and state
//! - [`editor`]: Line storage and tab expansion
//! - [`highlight`]: Syntax highlighting
//! - [`search`]: Incremental search
//! - [`file`]: Reading and writing files
//! - [`config`]: Flags and config files
//! - [`logging`]: Log subscriber setup
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod editor;
pub mod file;
pub mod highlight;
pub mod logging;
pub mod search;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::LineStore;
    pub use crate::ui::viewport::Viewport;
}
