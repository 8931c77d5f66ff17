//! Pure description of one screen.
//!
//! [`FrameView::build`] reads the model and produces everything the
//! terminal needs to draw: the visible slice of each render line with its
//! tags, both bars and the cursor. Nothing here touches the terminal, so
//! frames can be inspected directly in tests.

use std::time::Instant;

use crate::app::{MessageLevel, Model};
use crate::highlight::Highlight;

pub const WELCOME: &str = "Tex editor -- version 0.02";

/// Longest file name shown in the status bar.
const STATUS_NAME_MAX: usize = 20;

/// One visible byte of a render line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub byte: u8,
    pub highlight: Highlight,
}

impl Cell {
    /// Character to draw, and whether it is shown in reverse video.
    ///
    /// Control bytes appear as `@`-letters (`0x01` is `A`) or `?`, and bytes
    /// outside ASCII as `?`.
    pub fn glyph(self) -> (char, bool) {
        match self.byte {
            b if b <= 26 && b.is_ascii_control() => (char::from(b'@' + b), true),
            b if b.is_ascii_control() || !b.is_ascii() => ('?', true),
            b => (char::from(b), false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameRow {
    /// Past the end of the buffer.
    Filler,
    /// Banner shown in an empty buffer.
    Welcome(String),
    Text(Vec<Cell>),
}

impl FrameRow {
    /// Plain text of the row as it appears on screen.
    pub fn text(&self) -> String {
        match self {
            Self::Filler => "~".to_string(),
            Self::Welcome(banner) => banner.clone(),
            Self::Text(cells) => cells.iter().map(|cell| cell.glyph().0).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameView {
    pub width: u16,
    /// One entry per text-area row.
    pub rows: Vec<FrameRow>,
    /// Status bar text, exactly `width` columns when the width allows.
    pub status: String,
    /// Message bar contents, if anything is showing.
    pub message: Option<(String, MessageLevel)>,
    /// Cursor relative to the top-left of the text area.
    pub cursor: (u16, u16),
}

impl FrameView {
    pub fn build(model: &Model, now: Instant) -> Self {
        let viewport = &model.viewport;
        let width = usize::from(viewport.width());
        let height = usize::from(viewport.height());
        let lines = &model.lines;

        let rows = (0..height)
            .map(|y| {
                let row = y + viewport.row_off();
                match lines.line(row) {
                    Some(line) => {
                        let render = line.render();
                        let start = viewport.col_off().min(render.len());
                        let end = (start + width).min(render.len());
                        let cells = render[start..end]
                            .iter()
                            .zip(&line.highlight()[start..end])
                            .map(|(&byte, &highlight)| Cell { byte, highlight })
                            .collect();
                        FrameRow::Text(cells)
                    }
                    None if lines.is_empty() && y == height / 3 => {
                        FrameRow::Welcome(welcome_line(width))
                    }
                    None => FrameRow::Filler,
                }
            })
            .collect();

        let message = match &model.prompt {
            Some(prompt) => Some((prompt.text(), MessageLevel::Info)),
            None => model
                .active_message(now)
                .map(|(text, level)| (text.to_string(), level)),
        }
        .map(|(text, level)| (truncate(&text, width), level))
        .filter(|(text, _)| !text.is_empty());

        Self {
            width: viewport.width(),
            rows,
            status: compose_status_line(&status_left(model), &status_right(model), width),
            message,
            cursor: viewport.screen_cursor(),
        }
    }
}

/// `NAME - N lines (modified)`
pub fn status_left(model: &Model) -> String {
    let name = model.file_name().map_or_else(
        || "[No Name]".to_string(),
        |path| path.to_string_lossy().chars().take(STATUS_NAME_MAX).collect(),
    );
    let modified = if model.lines.is_dirty() {
        "(modified)"
    } else {
        ""
    };
    format!("{name} - {} lines {modified}", model.lines.len())
}

/// `FILETYPE | ROW/N`
pub fn status_right(model: &Model) -> String {
    format!(
        "{} | {}/{}",
        model.filetype().unwrap_or("no ft"),
        model.viewport.cy() + 1,
        model.lines.len()
    )
}

/// Lay out the status bar: `left` truncated to `width`, padded with spaces,
/// and `right` placed flush right only if it fits after `left`.
pub fn compose_status_line(left: &str, right: &str, width: usize) -> String {
    let mut line = truncate(left, width);
    let mut len = line.chars().count();
    let right_len = right.chars().count();
    while len < width {
        if width - len == right_len {
            line.push_str(right);
            break;
        }
        line.push(' ');
        len += 1;
    }
    line
}

fn welcome_line(width: usize) -> String {
    let banner = truncate(WELCOME, width);
    let padding = (width - banner.len()) / 2;
    if padding == 0 {
        return banner;
    }
    format!("~{}{banner}", " ".repeat(padding - 1))
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
