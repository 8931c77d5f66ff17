//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Cursor position and scroll window
//! - [`frame`]: The pure per-frame screen description
//! - [`style`]: Colors

pub mod frame;
pub mod style;
pub mod viewport;

mod render;
mod status;

pub use frame::FrameView;
pub use render::{draw, render};
