use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::editor::LineStore;
use crate::file::{self, FileError};
use crate::highlight::select_for;
use crate::ui::viewport::{Direction, Viewport};

use super::prompt::Prompt;

/// Rows taken by the status bar and the message bar.
pub const BAR_ROWS: u16 = 2;

pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    level: MessageLevel,
    text: String,
    expires_at: Instant,
}

/// The complete editor state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// The text being edited
    pub lines: LineStore,
    /// Cursor and scroll window
    pub viewport: Viewport,
    /// File the buffer saves to, if it has a name yet
    pub file_path: Option<PathBuf>,
    pub settings: Settings,
    /// Open prompt, if any
    pub prompt: Option<Prompt>,
    status: Option<StatusMessage>,
    /// Ctrl-Q presses still needed to abandon unsaved changes
    pub(super) quit_times_left: u32,
    /// Whether the app should quit
    pub should_quit: bool,
    save_requested: bool,
}

impl Model {
    /// Create a model around an existing buffer.
    ///
    /// `terminal_size` is the full terminal; two rows are reserved for the
    /// status and message bars.
    pub fn new(
        mut lines: LineStore,
        file_path: Option<PathBuf>,
        settings: Settings,
        terminal_size: (u16, u16),
    ) -> Self {
        let (width, height) = terminal_size;
        lines.set_syntax(file_path.as_deref().and_then(select_for));
        let mut model = Self {
            lines,
            viewport: Viewport::new(width, height.saturating_sub(BAR_ROWS)),
            file_path,
            quit_times_left: settings.quit_times,
            settings,
            prompt: None,
            status: None,
            should_quit: false,
            save_requested: false,
        };
        model.viewport.scroll(&model.lines);
        model
    }

    /// Load `path` (or start empty) and show the help message.
    ///
    /// A path that does not exist yet gives an empty buffer that will be
    /// created on save.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Read`] if the file exists but cannot be read.
    pub fn open(
        path: Option<PathBuf>,
        settings: Settings,
        terminal_size: (u16, u16),
    ) -> Result<Self, FileError> {
        let lines = match path.as_deref() {
            Some(path) => {
                let loaded = file::read_lines(path)?;
                if loaded.is_none() {
                    tracing::info!(path = %path.display(), "new file");
                }
                loaded.unwrap_or_default()
            }
            None => Vec::new(),
        };
        let store = LineStore::from_lines(lines, settings.tab_stop, None);
        let mut model = Self::new(store, path, settings, terminal_size);
        tracing::info!(
            path = ?model.file_path,
            lines = model.lines.len(),
            filetype = model.filetype(),
            "opened buffer"
        );
        model.set_status(MessageLevel::Info, HELP_MESSAGE);
        Ok(model)
    }

    pub fn filetype(&self) -> Option<&'static str> {
        self.lines.syntax().map(|syntax| syntax.filetype)
    }

    /// Bind the buffer to a new file name and reselect highlighting.
    pub fn set_file_path(&mut self, path: PathBuf) {
        let syntax = select_for(&path);
        tracing::debug!(path = %path.display(), filetype = ?syntax.map(|s| s.filetype), "file name set");
        self.lines.set_syntax(syntax);
        self.file_path = Some(path);
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn set_status(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
            expires_at: expiry(Instant::now(), self.settings.message_timeout),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Drop the status message once it is stale. Returns whether it changed.
    pub fn expire_message(&mut self, now: Instant) -> bool {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.expires_at <= now)
        {
            self.status = None;
            return true;
        }
        false
    }

    /// The status message if it is still fresh at `now`.
    pub fn active_message(&self, now: Instant) -> Option<(&str, MessageLevel)> {
        self.status
            .as_ref()
            .filter(|status| now < status.expires_at)
            .map(|status| (status.text.as_str(), status.level))
    }

    /// Ask the side-effect pass to write the buffer.
    pub(super) const fn request_save(&mut self) {
        self.save_requested = true;
    }

    pub(super) fn take_save_request(&mut self) -> bool {
        std::mem::replace(&mut self.save_requested, false)
    }

    /// Write the buffer to its file and report the outcome in the message bar.
    ///
    /// Without a file name nothing is written.
    pub fn save(&mut self) {
        let Some(path) = self.file_path.clone() else {
            return;
        };
        let bytes = self.lines.serialize();
        match file::write_buffer(&path, &bytes, self.settings.save_mode) {
            Ok(written) => {
                self.lines.mark_clean();
                tracing::info!(path = %path.display(), bytes = written, "saved");
                self.set_status(MessageLevel::Info, format!("{written} bytes written to disk"));
            }
            Err(err) => {
                tracing::warn!(path = %err.path().display(), error = %err, "save failed");
                self.set_status(MessageLevel::Error, format!("Can't save! I/O error: {err}"));
            }
        }
    }

    // --- Editing at the cursor ---

    pub fn insert_char(&mut self, byte: u8) {
        let (cx, cy) = (self.viewport.cx(), self.viewport.cy());
        self.lines.insert_char(cy, cx, byte);
        self.viewport.set_cursor(cx + 1, cy, &self.lines);
    }

    pub fn insert_newline(&mut self) {
        let (cx, cy) = (self.viewport.cx(), self.viewport.cy());
        if cx == 0 {
            self.lines.insert_line(cy, Vec::new());
        } else {
            self.lines.split_line(cy, cx);
        }
        self.viewport.set_cursor(0, cy + 1, &self.lines);
    }

    /// Backspace.
    pub fn delete_back(&mut self) {
        let (cx, cy) = (self.viewport.cx(), self.viewport.cy());
        if let Some((row, col)) = self.lines.delete_char(cy, cx) {
            self.viewport.set_cursor(col, row, &self.lines);
        }
    }

    /// Delete under the cursor: step right, then backspace.
    pub fn delete_forward(&mut self) {
        self.viewport.move_cursor(Direction::Right, &self.lines);
        self.delete_back();
    }
}

/// `now + timeout`, saturating at the longest configurable timeout.
fn expiry(now: Instant, timeout: Duration) -> Instant {
    now.checked_add(timeout).unwrap_or_else(|| {
        now + Duration::from_secs(crate::config::MAX_MESSAGE_TIMEOUT_SECS)
    })
}

impl Default for Model {
    fn default() -> Self {
        Self::new(LineStore::default(), None, Settings::default(), (80, 24))
    }
}
