//! Colors for highlight tags and bars.
//!
//! Plain ANSI colors so the terminal palette decides the exact shades.

use ratatui::style::{Color, Modifier, Style};

use crate::app::MessageLevel;
use crate::highlight::Highlight;

/// Style for a highlight tag.
pub fn style_for_highlight(highlight: Highlight) -> Style {
    match highlight {
        Highlight::Normal => Style::default(),
        Highlight::Comment | Highlight::MultilineComment => Style::default().fg(Color::Cyan),
        Highlight::Keyword => Style::default().fg(Color::Yellow),
        Highlight::Type => Style::default().fg(Color::Green),
        Highlight::String => Style::default().fg(Color::Magenta),
        Highlight::Number => Style::default().fg(Color::Red),
        Highlight::Match => Style::default().fg(Color::Blue),
    }
}

/// Style for a byte drawn as a substitute glyph.
pub fn control_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn message_style(level: MessageLevel) -> Style {
    match level {
        MessageLevel::Info => Style::default(),
        MessageLevel::Warning => Style::default().bg(Color::Yellow).fg(Color::Black),
        MessageLevel::Error => Style::default().bg(Color::Red).fg(Color::White),
    }
}
