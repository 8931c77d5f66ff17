use std::path::PathBuf;

use crate::app::Model;
use crate::app::model::{BAR_ROWS, MessageLevel};
use crate::app::prompt::{self, Prompt};
use crate::search::{SearchAction, SearchSession};
use crate::ui::viewport::{CursorSnapshot, Direction};

/// All possible events and actions in the editor.
///
/// These are decoded keystrokes plus terminal events. While a prompt is
/// open the same messages drive the prompt instead of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a byte at the cursor
    InsertChar(u8),
    /// Split the line at the cursor
    Newline,
    /// Delete left of the cursor (Backspace, Ctrl-H)
    DeleteBack,
    /// Delete under the cursor (Delete)
    DeleteForward,

    // Navigation
    /// Arrow keys
    MoveCursor(Direction),
    PageUp,
    PageDown,
    /// Start of line
    Home,
    /// End of line
    End,

    // Commands
    /// Ctrl-S
    Save,
    /// Ctrl-F
    Find,
    /// Ctrl-Q
    Quit,
    /// Escape
    Cancel,
    /// Ctrl-L, repaint without changing state
    Redraw,

    // Terminal
    /// Terminal resized to (width, height)
    Resize(u16, u16),
}

/// Apply a message to the model.
pub fn update(mut model: Model, msg: Message) -> Model {
    if let Message::Resize(width, height) = msg {
        model
            .viewport
            .resize(width, height.saturating_sub(BAR_ROWS));
        model.viewport.scroll(&model.lines);
        return model;
    }

    if model.prompt.is_some() {
        update_prompt(&mut model, msg);
    } else {
        update_editor(&mut model, msg);
    }
    model.viewport.scroll(&model.lines);
    model
}

fn update_editor(model: &mut Model, msg: Message) {
    if msg != Message::Quit {
        model.quit_times_left = model.settings.quit_times;
    }

    match msg {
        Message::InsertChar(byte) => model.insert_char(byte),
        Message::Newline => model.insert_newline(),
        Message::DeleteBack => model.delete_back(),
        Message::DeleteForward => model.delete_forward(),

        Message::MoveCursor(direction) => model.viewport.move_cursor(direction, &model.lines),
        Message::PageUp => model.viewport.page_up(&model.lines),
        Message::PageDown => model.viewport.page_down(&model.lines),
        Message::Home => model.viewport.home(),
        Message::End => model.viewport.end(&model.lines),

        Message::Save => {
            if model.file_path.is_some() {
                model.request_save();
            } else {
                model.prompt = Some(Prompt::save_as());
            }
        }
        Message::Find => {
            model.prompt = Some(Prompt::search(model.viewport.snapshot()));
        }
        Message::Quit => {
            if model.lines.is_dirty() && model.quit_times_left > 0 {
                model.set_status(
                    MessageLevel::Warning,
                    format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                        model.quit_times_left
                    ),
                );
                model.quit_times_left -= 1;
            } else {
                tracing::info!(dirty = model.lines.dirty(), "quit");
                model.should_quit = true;
            }
        }
        Message::Cancel | Message::Redraw | Message::Resize(..) => {}
    }
}

fn update_prompt(model: &mut Model, msg: Message) {
    let Some(mut active) = model.prompt.take() else {
        return;
    };

    match msg {
        Message::DeleteBack | Message::DeleteForward => {
            active.input_mut().pop();
        }
        Message::InsertChar(byte) if prompt::accepts(byte) => {
            active.input_mut().push(char::from(byte));
        }
        _ => {}
    }

    model.prompt = match active {
        Prompt::SaveAs { input } => save_as_step(model, input, msg),
        Prompt::Search {
            query,
            session,
            origin,
        } => search_step(model, query, session, origin, msg),
    };
}

fn save_as_step(model: &mut Model, input: String, msg: Message) -> Option<Prompt> {
    match msg {
        Message::Cancel => {
            model.set_status(MessageLevel::Info, "Save aborted");
            None
        }
        Message::Newline if !input.is_empty() => {
            model.clear_status();
            model.set_file_path(PathBuf::from(input));
            model.request_save();
            None
        }
        _ => Some(Prompt::SaveAs { input }),
    }
}

fn search_step(
    model: &mut Model,
    query: String,
    mut session: SearchSession,
    origin: CursorSnapshot,
    msg: Message,
) -> Option<Prompt> {
    match msg {
        Message::Cancel => {
            session.finish(&mut model.lines);
            model.viewport.restore(origin);
            model.clear_status();
            return None;
        }
        Message::Newline => {
            session.finish(&mut model.lines);
            if !query.is_empty() {
                model.clear_status();
                return None;
            }
            // An empty query keeps the prompt open with a fresh session.
            return Some(Prompt::search(origin));
        }
        _ => {}
    }

    let action = match msg {
        Message::MoveCursor(Direction::Right | Direction::Down) => SearchAction::Next,
        Message::MoveCursor(Direction::Left | Direction::Up) => SearchAction::Previous,
        _ => SearchAction::Edit,
    };
    if let Some(hit) = session.step(&mut model.lines, query.as_bytes(), action) {
        model.viewport.set_cursor(hit.raw_col, hit.row, &model.lines);
        model.viewport.reveal_row_at_top(hit.row);
    }
    Some(Prompt::Search {
        query,
        session,
        origin,
    })
}
