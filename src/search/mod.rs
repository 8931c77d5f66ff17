//! Incremental search.
//!
//! A [`SearchSession`] lives for the duration of one search prompt. Each
//! keystroke runs a [`SearchSession::step`]: the previous match overlay is
//! removed, the direction is updated, and the next row containing the query
//! gets a temporary [`Highlight::Match`] overlay. The session keeps a copy of
//! the overlaid row's tags so syntax highlighting comes back untouched.

use crate::editor::LineStore;
use crate::highlight::Highlight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// What the user did since the previous step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    /// Jump to the following match.
    Next,
    /// Jump to the preceding match.
    Previous,
    /// The query changed (or any other key): restart from the top.
    Edit,
}

/// Location of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    pub row: usize,
    /// Start of the match in render columns.
    pub render_col: usize,
    /// Start of the match as a raw byte index.
    pub raw_col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SavedHighlight {
    row: usize,
    highlight: Vec<Highlight>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    last_match: Option<usize>,
    direction: SearchDirection,
    saved: Option<SavedHighlight>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub const fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Advance the search for `query` and overlay the hit, if any.
    pub fn step(
        &mut self,
        lines: &mut LineStore,
        query: &[u8],
        action: SearchAction,
    ) -> Option<SearchHit> {
        self.restore(lines);

        match action {
            SearchAction::Next => self.direction = SearchDirection::Forward,
            SearchAction::Previous => self.direction = SearchDirection::Backward,
            SearchAction::Edit => {
                self.last_match = None;
                self.direction = SearchDirection::Forward;
            }
        }
        if self.last_match.is_none() {
            self.direction = SearchDirection::Forward;
        }

        let total = lines.len();
        if query.is_empty() || total == 0 {
            return None;
        }

        let mut current = self.last_match.map(|row| row.min(total - 1));
        for _ in 0..total {
            let row = match (current, self.direction) {
                (None, _) => 0,
                (Some(r), SearchDirection::Forward) => {
                    if r + 1 >= total {
                        0
                    } else {
                        r + 1
                    }
                }
                (Some(r), SearchDirection::Backward) => {
                    if r == 0 {
                        total - 1
                    } else {
                        r - 1
                    }
                }
            };
            current = Some(row);

            let Some(render_col) = lines.line(row).and_then(|line| find(line.render(), query))
            else {
                continue;
            };

            self.last_match = Some(row);
            if let Some(highlight) = lines.highlight_snapshot(row) {
                self.saved = Some(SavedHighlight { row, highlight });
            }
            lines.paint(row, render_col, query.len(), Highlight::Match);
            return Some(SearchHit {
                row,
                render_col,
                raw_col: lines.render_to_raw(row, render_col),
            });
        }
        None
    }

    /// Put back the tags of the currently overlaid row.
    pub fn restore(&mut self, lines: &mut LineStore) {
        if let Some(saved) = self.saved.take() {
            lines.restore_highlight(saved.row, saved.highlight);
        }
    }

    /// End the session, removing any overlay.
    pub fn finish(mut self, lines: &mut LineStore) {
        self.restore(lines);
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
