use crate::search::SearchSession;
use crate::ui::viewport::CursorSnapshot;

/// A modal one-line prompt shown in the message bar.
///
/// While a prompt is open every key goes to it instead of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Asking for a file name before the first save.
    SaveAs { input: String },
    /// Incremental search. `origin` is where the cursor was when the search
    /// started, restored on cancel.
    Search {
        query: String,
        session: SearchSession,
        origin: CursorSnapshot,
    },
}

impl Prompt {
    pub const fn save_as() -> Self {
        Self::SaveAs {
            input: String::new(),
        }
    }

    pub fn search(origin: CursorSnapshot) -> Self {
        Self::Search {
            query: String::new(),
            session: SearchSession::new(),
            origin,
        }
    }

    /// Current user input.
    pub fn input(&self) -> &str {
        match self {
            Self::SaveAs { input } => input,
            Self::Search { query, .. } => query,
        }
    }

    pub(super) fn input_mut(&mut self) -> &mut String {
        match self {
            Self::SaveAs { input } => input,
            Self::Search { query, .. } => query,
        }
    }

    /// Text for the message bar.
    pub fn text(&self) -> String {
        match self {
            Self::SaveAs { input } => format!("Save as: {input} (ESC to cancel)"),
            Self::Search { query, .. } => format!("Search: {query} (Use ESC/Arrows/Enter)"),
        }
    }
}

/// Whether a byte may be typed into a prompt.
pub(super) const fn accepts(byte: u8) -> bool {
    byte == b' ' || byte.is_ascii_graphic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text() {
        let mut prompt = Prompt::save_as();
        prompt.input_mut().push_str("a.c");
        assert_eq!(prompt.text(), "Save as: a.c (ESC to cancel)");

        let search = Prompt::search(CursorSnapshot::default());
        assert_eq!(search.text(), "Search:  (Use ESC/Arrows/Enter)");
        assert_eq!(search.input(), "");
    }

    #[test]
    fn test_accepts_printable_ascii_only() {
        assert!(accepts(b'a'));
        assert!(accepts(b' '));
        assert!(accepts(b'~'));
        assert!(!accepts(b'\t'));
        assert!(!accepts(0x7f));
        assert!(!accepts(0x1b));
    }
}
