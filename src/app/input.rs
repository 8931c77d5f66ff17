use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::ui::viewport::Direction;

impl App {
    pub(super) fn handle_event(event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('q') => Some(Message::Quit),
                KeyCode::Char('s') => Some(Message::Save),
                KeyCode::Char('f') => Some(Message::Find),
                KeyCode::Char('h') => Some(Message::DeleteBack),
                KeyCode::Char('l') => Some(Message::Redraw),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                u8::try_from(c)
                    .ok()
                    .filter(|b| b.is_ascii() && !b.is_ascii_control())
                    .map(Message::InsertChar)
            }
            KeyCode::Tab => Some(Message::InsertChar(b'\t')),
            KeyCode::Enter => Some(Message::Newline),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Esc => Some(Message::Cancel),

            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Home => Some(Message::Home),
            KeyCode::End => Some(Message::End),

            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
