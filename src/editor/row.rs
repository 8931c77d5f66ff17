//! A single buffer line and the tab expansion rules behind its render form.

use crate::highlight::{Highlight, Syntax, highlight_line};

/// Expand tabs so that every tab ends on a multiple of `tab_stop`.
///
/// # Example
///
/// ```
/// use tex::editor::expand;
///
/// assert_eq!(expand(b"a\tb", 4), b"a   b".to_vec());
/// ```
pub fn expand(raw: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = tab_stop.max(1);
    let tabs = raw.iter().filter(|&&b| b == b'\t').count();
    let mut render = Vec::with_capacity(raw.len() + tabs * (tab_stop - 1));
    for &byte in raw {
        if byte == b'\t' {
            render.push(b' ');
            while render.len() % tab_stop != 0 {
                render.push(b' ');
            }
        } else {
            render.push(byte);
        }
    }
    render
}

/// Convert a raw byte index into a render column.
pub fn raw_to_render_index(raw: &[u8], raw_col: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut rx = 0;
    for &byte in raw.iter().take(raw_col) {
        if byte == b'\t' {
            rx += (tab_stop - 1) - (rx % tab_stop);
        }
        rx += 1;
    }
    rx
}

/// Convert a render column back into a raw byte index.
///
/// A column inside a tab's span maps to the tab itself. Columns past the end
/// map to `raw.len()`.
pub fn render_to_raw_index(raw: &[u8], render_col: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut rx = 0;
    for (cx, &byte) in raw.iter().enumerate() {
        if byte == b'\t' {
            rx += (tab_stop - 1) - (rx % tab_stop);
        }
        rx += 1;
        if rx > render_col {
            return cx;
        }
    }
    raw.len()
}

/// One logical line: raw bytes plus derived render and highlight data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    index: usize,
    raw: Vec<u8>,
    render: Vec<u8>,
    highlight: Vec<Highlight>,
    continues_comment: bool,
}

impl Line {
    pub(crate) fn new(index: usize, raw: Vec<u8>, tab_stop: usize) -> Self {
        let render = expand(&raw, tab_stop);
        let highlight = vec![Highlight::Normal; render.len()];
        Self {
            index,
            raw,
            render,
            highlight,
            continues_comment: false,
        }
    }

    /// Position of this line in its store.
    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// One tag per render byte.
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Whether the line ends inside an open multi-line comment.
    pub const fn continues_comment(&self) -> bool {
        self.continues_comment
    }

    /// Length of the raw content in bytes.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub(crate) const fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) const fn set_continues_comment(&mut self, open: bool) {
        self.continues_comment = open;
    }

    pub(crate) fn insert_byte(&mut self, col: usize, byte: u8, tab_stop: usize) {
        let col = col.min(self.raw.len());
        self.raw.insert(col, byte);
        self.update_render(tab_stop);
    }

    pub(crate) fn remove_byte(&mut self, col: usize, tab_stop: usize) -> bool {
        if col >= self.raw.len() {
            return false;
        }
        self.raw.remove(col);
        self.update_render(tab_stop);
        true
    }

    pub(crate) fn append(&mut self, bytes: &[u8], tab_stop: usize) {
        self.raw.extend_from_slice(bytes);
        self.update_render(tab_stop);
    }

    /// Cut the line at `col`, returning the tail.
    pub(crate) fn split_off(&mut self, col: usize, tab_stop: usize) -> Vec<u8> {
        let col = col.min(self.raw.len());
        let tail = self.raw.split_off(col);
        self.update_render(tab_stop);
        tail
    }

    pub(crate) fn update_render(&mut self, tab_stop: usize) {
        self.render = expand(&self.raw, tab_stop);
        self.highlight.resize(self.render.len(), Highlight::Normal);
    }

    /// Re-run the classifier; returns whether `continues_comment` changed.
    pub(crate) fn rehighlight(&mut self, syntax: Option<&Syntax>, starts_in_comment: bool) -> bool {
        let open = highlight_line(&self.render, syntax, starts_in_comment, &mut self.highlight);
        let changed = open != self.continues_comment;
        self.continues_comment = open;
        changed
    }

    /// Replace the highlight tags wholesale. Ignored when the length differs.
    pub(crate) fn restore_highlight(&mut self, highlight: Vec<Highlight>) {
        if highlight.len() == self.render.len() {
            self.highlight = highlight;
        }
    }

    /// Paint `tag` over a render range, clamped to the line.
    pub(crate) fn paint(&mut self, start: usize, len: usize, tag: Highlight) {
        let end = (start + len).min(self.highlight.len());
        if start < end {
            self.highlight[start..end].fill(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_without_tabs_copies_bytes() {
        assert_eq!(expand(b"hello", 8), b"hello".to_vec());
    }

    #[test]
    fn test_expand_tab_on_empty_line() {
        assert_eq!(expand(b"\t", 8), vec![b' '; 8]);
    }

    #[test]
    fn test_expand_tab_pads_to_next_stop() {
        assert_eq!(expand(b"ab\tc", 4), b"ab  c".to_vec());
        // a tab exactly at a stop still advances a full stop
        assert_eq!(expand(b"abcd\tx", 4), b"abcd    x".to_vec());
    }

    #[test]
    fn test_expand_zero_tab_stop_is_one() {
        assert_eq!(expand(b"\t\t", 0), b"  ".to_vec());
    }

    #[test]
    fn test_raw_to_render_counts_tab_width() {
        assert_eq!(raw_to_render_index(b"\t", 1, 8), 8);
        assert_eq!(raw_to_render_index(b"a\tb", 2, 8), 8);
        assert_eq!(raw_to_render_index(b"a\tb", 3, 8), 9);
        assert_eq!(raw_to_render_index(b"abc", 2, 8), 2);
    }

    #[test]
    fn test_raw_to_render_clamps_past_end() {
        assert_eq!(raw_to_render_index(b"ab", 10, 8), 2);
    }

    #[test]
    fn test_render_to_raw_inside_tab_span_maps_to_tab() {
        // "a\tb": tab spans render columns 1..8
        for rcol in 1..8 {
            assert_eq!(render_to_raw_index(b"a\tb", rcol, 8), 1);
        }
        assert_eq!(render_to_raw_index(b"a\tb", 8, 8), 2);
    }

    #[test]
    fn test_render_to_raw_past_end() {
        assert_eq!(render_to_raw_index(b"ab", 5, 8), 2);
        assert_eq!(render_to_raw_index(b"", 0, 8), 0);
    }

    #[test]
    fn test_line_keeps_render_and_highlight_in_step() {
        let mut line = Line::new(0, b"a".to_vec(), 8);
        line.insert_byte(0, b'\t', 8);
        assert_eq!(line.raw(), b"\ta");
        assert_eq!(line.render().len(), 9);
        assert_eq!(line.highlight().len(), 9);
        line.remove_byte(0, 8);
        assert_eq!(line.render(), b"a");
        assert_eq!(line.highlight().len(), 1);
    }

    #[test]
    fn test_split_off_returns_tail() {
        let mut line = Line::new(0, b"hello world".to_vec(), 8);
        let tail = line.split_off(5, 8);
        assert_eq!(line.raw(), b"hello");
        assert_eq!(tail, b" world".to_vec());
    }

    #[test]
    fn test_paint_clamps_to_line() {
        let mut line = Line::new(0, b"abc".to_vec(), 8);
        line.paint(1, 10, Highlight::Match);
        assert_eq!(
            line.highlight(),
            &[Highlight::Normal, Highlight::Match, Highlight::Match]
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn render_to_raw_inverts_raw_to_render(
                raw in proptest::collection::vec(prop_oneof![Just(b'\t'), Just(b'x'), Just(b' ')], 0..40),
                tab_stop in 1..12usize,
            ) {
                for col in 0..=raw.len() {
                    let rx = raw_to_render_index(&raw, col, tab_stop);
                    prop_assert_eq!(render_to_raw_index(&raw, rx, tab_stop), col);
                }
            }

            #[test]
            fn render_length_matches_final_column(
                raw in proptest::collection::vec(any::<u8>(), 0..60),
                tab_stop in 1..12usize,
            ) {
                let render = expand(&raw, tab_stop);
                prop_assert_eq!(render.len(), raw_to_render_index(&raw, raw.len(), tab_stop));
            }
        }
    }
}
