//! Cursor and scroll management.
//!
//! The [`Viewport`] tracks the cursor in buffer coordinates (`cx` raw byte
//! index, `cy` line index) and the render column `rx` derived from them,
//! together with the scroll window over the text area.
//!
//! `cy` may equal the number of lines: that is the virtual line past the end
//! of the buffer, where typing appends a new line.

use crate::editor::LineStore;

/// Direction for a single-step cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Cursor and scroll position, used to undo a cancelled search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorSnapshot {
    pub cx: usize,
    pub cy: usize,
    pub row_off: usize,
    pub col_off: usize,
}

/// Visible window over the buffer plus the cursor inside it.
///
/// # Example
///
/// ```
/// use tex::editor::LineStore;
/// use tex::ui::viewport::{Direction, Viewport};
///
/// let lines = LineStore::from_lines(vec![b"ab".to_vec()], 8, None);
/// let mut vp = Viewport::new(80, 10);
/// vp.move_cursor(Direction::Right, &lines);
/// vp.scroll(&lines);
/// assert_eq!((vp.cx(), vp.rx()), (1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    cx: usize,
    cy: usize,
    rx: usize,
    row_off: usize,
    col_off: usize,
    width: u16,
    height: u16,
}

impl Viewport {
    /// Create a viewport for a text area of `width` x `height` cells.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            cx: 0,
            cy: 0,
            rx: 0,
            row_off: 0,
            col_off: 0,
            width,
            height,
        }
    }

    pub const fn cx(&self) -> usize {
        self.cx
    }

    pub const fn cy(&self) -> usize {
        self.cy
    }

    /// Render column of the cursor as of the last [`scroll`](Self::scroll).
    pub const fn rx(&self) -> usize {
        self.rx
    }

    pub const fn row_off(&self) -> usize {
        self.row_off
    }

    pub const fn col_off(&self) -> usize {
        self.col_off
    }

    /// Text area width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Text area height in rows.
    pub const fn height(&self) -> u16 {
        self.height
    }

    const fn screen_rows(&self) -> usize {
        if self.height == 0 { 1 } else { self.height as usize }
    }

    const fn screen_cols(&self) -> usize {
        if self.width == 0 { 1 } else { self.width as usize }
    }

    /// Place the cursor, clamping both coordinates to the buffer.
    pub fn set_cursor(&mut self, cx: usize, cy: usize, lines: &LineStore) {
        self.cy = cy.min(lines.len());
        self.cx = cx.min(lines.line_len(self.cy));
    }

    /// Move one step, wrapping across line ends horizontally.
    pub fn move_cursor(&mut self, direction: Direction, lines: &LineStore) {
        let on_line = self.cy < lines.len();
        match direction {
            Direction::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = lines.line_len(self.cy);
                }
            }
            Direction::Right => {
                if on_line {
                    if self.cx < lines.line_len(self.cy) {
                        self.cx += 1;
                    } else {
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Direction::Up => self.cy = self.cy.saturating_sub(1),
            Direction::Down => {
                if self.cy < lines.len() {
                    self.cy += 1;
                }
            }
        }
        self.cx = self.cx.min(lines.line_len(self.cy));
    }

    /// Jump to the top of the window, then one screen further up.
    pub fn page_up(&mut self, lines: &LineStore) {
        self.cy = self.row_off.min(lines.len());
        for _ in 0..self.screen_rows() {
            self.move_cursor(Direction::Up, lines);
        }
    }

    /// Jump to the bottom of the window, then one screen further down.
    pub fn page_down(&mut self, lines: &LineStore) {
        self.cy = (self.row_off + self.screen_rows() - 1).min(lines.len());
        for _ in 0..self.screen_rows() {
            self.move_cursor(Direction::Down, lines);
        }
    }

    pub const fn home(&mut self) {
        self.cx = 0;
    }

    /// Move to the end of the current line. No-op on the virtual line.
    pub fn end(&mut self, lines: &LineStore) {
        if self.cy < lines.len() {
            self.cx = lines.line_len(self.cy);
        }
    }

    /// Recompute `rx` and shift the window so the cursor is visible.
    pub fn scroll(&mut self, lines: &LineStore) {
        self.rx = if self.cy < lines.len() {
            lines.raw_to_render(self.cy, self.cx)
        } else {
            0
        };

        let rows = self.screen_rows();
        if self.cy < self.row_off {
            self.row_off = self.cy;
        }
        if self.cy >= self.row_off + rows {
            self.row_off = self.cy + 1 - rows;
        }

        let cols = self.screen_cols();
        if self.rx < self.col_off {
            self.col_off = self.rx;
        }
        if self.rx >= self.col_off + cols {
            self.col_off = self.rx + 1 - cols;
        }
    }

    /// Make `row` the first visible line.
    pub const fn reveal_row_at_top(&mut self, row: usize) {
        self.row_off = row;
    }

    /// Resize the text area. Offsets are fixed up by the next scroll.
    pub const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub const fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            cx: self.cx,
            cy: self.cy,
            row_off: self.row_off,
            col_off: self.col_off,
        }
    }

    pub const fn restore(&mut self, snapshot: CursorSnapshot) {
        self.cx = snapshot.cx;
        self.cy = snapshot.cy;
        self.row_off = snapshot.row_off;
        self.col_off = snapshot.col_off;
    }

    /// Cursor position relative to the top-left of the text area.
    pub fn screen_cursor(&self) -> (u16, u16) {
        let x = self.rx.saturating_sub(self.col_off);
        let y = self.cy.saturating_sub(self.row_off);
        (
            u16::try_from(x).unwrap_or(u16::MAX),
            u16::try_from(y).unwrap_or(u16::MAX),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 22)
    }
}
