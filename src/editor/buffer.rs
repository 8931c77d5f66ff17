use crate::highlight::{Highlight, Syntax};

use super::row::{Line, raw_to_render_index, render_to_raw_index};

/// Default distance between tab stops.
pub const DEFAULT_TAB_STOP: usize = 8;

/// Ordered collection of lines with render and highlight caches.
///
/// All index arguments are clamped: out-of-range operations are no-ops or
/// snap to the nearest valid position. The dirty counter records mutations
/// since the last load or save.
pub struct LineStore {
    lines: Vec<Line>,
    dirty: usize,
    tab_stop: usize,
    syntax: Option<&'static Syntax>,
}

impl LineStore {
    /// Create an empty store.
    pub fn new(tab_stop: usize) -> Self {
        Self {
            lines: Vec::new(),
            dirty: 0,
            tab_stop: tab_stop.max(1),
            syntax: None,
        }
    }

    /// Build a clean store from already-split lines.
    pub fn from_lines<I>(lines: I, tab_stop: usize, syntax: Option<&'static Syntax>) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let tab_stop = tab_stop.max(1);
        let lines = lines
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| Line::new(idx, raw, tab_stop))
            .collect();
        let mut store = Self {
            lines,
            dirty: 0,
            tab_stop,
            syntax,
        };
        store.rehighlight_all();
        store
    }

    /// Number of real lines (the virtual line past the end is not counted).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, at: usize) -> Option<&Line> {
        self.lines.get(at)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Raw length of a line, 0 for the virtual line or beyond.
    pub fn line_len(&self, at: usize) -> usize {
        self.lines.get(at).map_or(0, Line::len)
    }

    /// Mutations since the last load or save.
    pub const fn dirty(&self) -> usize {
        self.dirty
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    pub const fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub const fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    /// Switch rule sets and reclassify every line.
    pub fn set_syntax(&mut self, syntax: Option<&'static Syntax>) {
        self.syntax = syntax;
        self.rehighlight_all();
    }

    /// Render column for a raw column on `row`.
    pub fn raw_to_render(&self, row: usize, raw_col: usize) -> usize {
        self.lines
            .get(row)
            .map_or(0, |line| raw_to_render_index(line.raw(), raw_col, self.tab_stop))
    }

    /// Raw column for a render column on `row`.
    pub fn render_to_raw(&self, row: usize, render_col: usize) -> usize {
        self.lines
            .get(row)
            .map_or(0, |line| render_to_raw_index(line.raw(), render_col, self.tab_stop))
    }

    /// Insert a new line at `at` (clamped to `0..=len`).
    pub fn insert_line(&mut self, at: usize, bytes: impl Into<Vec<u8>>) {
        let at = at.min(self.lines.len());
        let mut line = Line::new(at, bytes.into(), self.tab_stop);
        // Seed with the state the following line was classified against, so
        // the cascade only runs when the new line actually changes it.
        line.set_continues_comment(self.starts_in_comment(at));
        self.lines.insert(at, line);
        self.renumber_from(at + 1);
        self.refresh_from(at);
        self.dirty += 1;
    }

    /// Remove the line at `at`; out of range is a no-op.
    pub fn delete_line(&mut self, at: usize) {
        if at >= self.lines.len() {
            return;
        }
        self.lines.remove(at);
        self.renumber_from(at);
        if at < self.lines.len() {
            self.refresh_from(at);
        }
        self.dirty += 1;
    }

    /// Insert one byte. On the virtual line an empty line is appended first.
    pub fn insert_char(&mut self, row: usize, col: usize, byte: u8) {
        let row = row.min(self.lines.len());
        if row == self.lines.len() {
            self.insert_line(row, Vec::new());
        }
        let tab_stop = self.tab_stop;
        self.lines[row].insert_byte(col, byte, tab_stop);
        self.refresh_from(row);
        self.dirty += 1;
    }

    /// Append bytes to the end of a line.
    pub fn append_bytes(&mut self, row: usize, bytes: &[u8]) {
        let tab_stop = self.tab_stop;
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        line.append(bytes, tab_stop);
        self.refresh_from(row);
        self.dirty += 1;
    }

    /// Delete the byte left of `col`, joining onto the previous line at
    /// column 0.
    ///
    /// Returns the cursor position after the edit, or `None` when nothing
    /// was deleted.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Option<(usize, usize)> {
        if row >= self.lines.len() {
            return None;
        }
        let col = col.min(self.lines[row].len());
        if col > 0 {
            let tab_stop = self.tab_stop;
            self.lines[row].remove_byte(col - 1, tab_stop);
            self.refresh_from(row);
            self.dirty += 1;
            return Some((row, col - 1));
        }
        if row == 0 {
            return None;
        }
        let join_col = self.lines[row - 1].len();
        let tail = self.lines[row].raw().to_vec();
        self.append_bytes(row - 1, &tail);
        self.delete_line(row);
        Some((row - 1, join_col))
    }

    /// Break `row` at `col`, moving the tail onto a new following line.
    pub fn split_line(&mut self, row: usize, col: usize) {
        if row >= self.lines.len() {
            self.insert_line(self.lines.len(), Vec::new());
            return;
        }
        let col = col.min(self.lines[row].len());
        let tail = self.lines[row].raw()[col..].to_vec();
        self.insert_line(row + 1, tail);
        let tab_stop = self.tab_stop;
        self.lines[row].split_off(col, tab_stop);
        self.refresh_from(row);
    }

    /// Join every line's raw bytes, each followed by `\n`.
    pub fn serialize(&self) -> Vec<u8> {
        let total = self.lines.iter().map(|line| line.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for line in &self.lines {
            out.extend_from_slice(line.raw());
            out.push(b'\n');
        }
        out
    }

    /// Copy of a line's highlight tags.
    pub(crate) fn highlight_snapshot(&self, row: usize) -> Option<Vec<Highlight>> {
        self.lines.get(row).map(|line| line.highlight().to_vec())
    }

    pub(crate) fn restore_highlight(&mut self, row: usize, highlight: Vec<Highlight>) {
        if let Some(line) = self.lines.get_mut(row) {
            line.restore_highlight(highlight);
        }
    }

    pub(crate) fn paint(&mut self, row: usize, start: usize, len: usize, tag: Highlight) {
        if let Some(line) = self.lines.get_mut(row) {
            line.paint(start, len, tag);
        }
    }

    fn starts_in_comment(&self, at: usize) -> bool {
        at > 0
            && self
                .lines
                .get(at - 1)
                .is_some_and(Line::continues_comment)
    }

    fn renumber_from(&mut self, at: usize) {
        for (idx, line) in self.lines.iter_mut().enumerate().skip(at) {
            line.set_index(idx);
        }
    }

    /// Reclassify `at`, then following lines while their comment state
    /// keeps changing.
    fn refresh_from(&mut self, at: usize) {
        let mut idx = at;
        while idx < self.lines.len() {
            let open = self.starts_in_comment(idx);
            let changed = self.lines[idx].rehighlight(self.syntax, open);
            if !changed {
                break;
            }
            idx += 1;
        }
    }

    fn rehighlight_all(&mut self) {
        let mut open = false;
        for line in &mut self.lines {
            line.rehighlight(self.syntax, open);
            open = line.continues_comment();
        }
    }
}

impl Default for LineStore {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl std::fmt::Debug for LineStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineStore")
            .field("lines", &format_args!("{} lines", self.lines.len()))
            .field("dirty", &self.dirty)
            .field("tab_stop", &self.tab_stop)
            .field("syntax", &self.syntax.map(|s| s.filetype))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::SYNTAXES;

    fn store(lines: &[&str]) -> LineStore {
        LineStore::from_lines(
            lines.iter().map(|l| l.as_bytes().to_vec()),
            DEFAULT_TAB_STOP,
            None,
        )
    }

    fn c_store(lines: &[&str]) -> LineStore {
        LineStore::from_lines(
            lines.iter().map(|l| l.as_bytes().to_vec()),
            DEFAULT_TAB_STOP,
            Some(&SYNTAXES[0]),
        )
    }

    fn raw_lines(store: &LineStore) -> Vec<String> {
        store
            .lines()
            .iter()
            .map(|l| String::from_utf8_lossy(l.raw()).into_owned())
            .collect()
    }

    fn assert_indices_consistent(store: &LineStore) {
        for (idx, line) in store.lines().iter().enumerate() {
            assert_eq!(line.index(), idx);
        }
    }

    // --- Construction ---

    #[test]
    fn test_loaded_store_is_clean() {
        let s = store(&["a", "b"]);
        assert_eq!(s.len(), 2);
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_empty_store() {
        let s = LineStore::default();
        assert!(s.is_empty());
        assert_eq!(s.serialize(), Vec::<u8>::new());
    }

    // --- Line insertion / deletion ---

    #[test]
    fn test_insert_line_clamps_position() {
        let mut s = store(&["a"]);
        s.insert_line(99, "z");
        assert_eq!(raw_lines(&s), vec!["a", "z"]);
        assert_eq!(s.dirty(), 1);
        assert_indices_consistent(&s);
    }

    #[test]
    fn test_insert_line_renumbers_suffix() {
        let mut s = store(&["a", "b", "c"]);
        s.insert_line(1, "x");
        assert_eq!(raw_lines(&s), vec!["a", "x", "b", "c"]);
        assert_indices_consistent(&s);
    }

    #[test]
    fn test_delete_line_out_of_bounds_is_noop() {
        let mut s = store(&["a"]);
        s.delete_line(5);
        assert_eq!(raw_lines(&s), vec!["a"]);
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_delete_line_renumbers_suffix() {
        let mut s = store(&["a", "b", "c"]);
        s.delete_line(0);
        assert_eq!(raw_lines(&s), vec!["b", "c"]);
        assert_indices_consistent(&s);
        assert_eq!(s.dirty(), 1);
    }

    // --- Character editing ---

    #[test]
    fn test_insert_char_clamps_column() {
        let mut s = store(&["ab"]);
        s.insert_char(0, 42, b'c');
        assert_eq!(raw_lines(&s), vec!["abc"]);
    }

    #[test]
    fn test_insert_char_on_virtual_line_appends_line() {
        let mut s = store(&["ab"]);
        s.insert_char(1, 0, b'x');
        assert_eq!(raw_lines(&s), vec!["ab", "x"]);
    }

    #[test]
    fn test_insert_tab_expands_to_tab_stop() {
        let mut s = store(&[""]);
        s.insert_char(0, 0, b'\t');
        assert_eq!(s.line(0).unwrap().render(), &[b' '; 8]);
        assert_eq!(s.raw_to_render(0, 1), 8);
    }

    #[test]
    fn test_insert_then_delete_restores_line() {
        let mut s = store(&["hello"]);
        s.insert_char(0, 2, b'X');
        assert_eq!(s.delete_char(0, 3), Some((0, 2)));
        assert_eq!(raw_lines(&s), vec!["hello"]);
    }

    #[test]
    fn test_delete_char_at_origin_is_noop() {
        let mut s = store(&["ab"]);
        assert_eq!(s.delete_char(0, 0), None);
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_delete_char_on_virtual_line_is_noop() {
        let mut s = store(&["ab"]);
        assert_eq!(s.delete_char(1, 0), None);
    }

    #[test]
    fn test_backspace_at_line_start_joins_lines() {
        let mut s = store(&["ab", "cd"]);
        assert_eq!(s.delete_char(1, 0), Some((0, 2)));
        assert_eq!(raw_lines(&s), vec!["abcd"]);
        assert_indices_consistent(&s);
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut s = store(&["hello world"]);
        s.split_line(0, 5);
        assert_eq!(raw_lines(&s), vec!["hello", " world"]);
        assert_indices_consistent(&s);
    }

    #[test]
    fn test_split_line_at_start_inserts_empty_line_above() {
        let mut s = store(&["abc"]);
        s.split_line(0, 0);
        assert_eq!(raw_lines(&s), vec!["", "abc"]);
    }

    #[test]
    fn test_split_virtual_line_appends_empty_line() {
        let mut s = store(&["abc"]);
        s.split_line(1, 3);
        assert_eq!(raw_lines(&s), vec!["abc", ""]);
    }

    #[test]
    fn test_append_bytes_marks_dirty() {
        let mut s = store(&["ab"]);
        s.append_bytes(0, b"cd");
        assert_eq!(raw_lines(&s), vec!["abcd"]);
        assert_eq!(s.dirty(), 1);
        s.append_bytes(3, b"zz");
        assert_eq!(s.dirty(), 1);
    }

    #[test]
    fn test_mark_clean_resets_counter() {
        let mut s = store(&["ab"]);
        s.insert_char(0, 0, b'x');
        s.insert_char(0, 0, b'y');
        assert_eq!(s.dirty(), 2);
        s.mark_clean();
        assert!(!s.is_dirty());
    }

    // --- Serialization ---

    #[test]
    fn test_serialize_terminates_every_line() {
        let s = store(&["a", "", "bc"]);
        assert_eq!(s.serialize(), b"a\n\nbc\n".to_vec());
    }

    // --- Highlight propagation ---

    #[test]
    fn test_multiline_comment_spans_lines() {
        let s = c_store(&["int a; /* start", "middle", "end */ x", "int b;"]);
        assert!(s.line(0).unwrap().continues_comment());
        assert!(s.line(1).unwrap().continues_comment());
        assert!(!s.line(2).unwrap().continues_comment());
        assert!(!s.line(3).unwrap().continues_comment());
        assert!(s.line(1).unwrap().highlight().iter().all(|h| h.is_comment()));
        assert!(s.line(2).unwrap().highlight()[..6].iter().all(|h| h.is_comment()));
        assert_eq!(s.line(3).unwrap().highlight()[0], Highlight::Type);
    }

    #[test]
    fn test_opening_comment_cascades_to_following_lines() {
        let mut s = c_store(&["a", "int b;", "int c;"]);
        s.append_bytes(0, b" /*");
        assert!(s.line(1).unwrap().highlight().iter().all(|h| h.is_comment()));
        assert!(s.line(2).unwrap().highlight().iter().all(|h| h.is_comment()));

        // closing it again restores syntax tags below
        s.delete_char(0, s.line_len(0));
        assert_eq!(s.line(1).unwrap().highlight()[0], Highlight::Type);
        assert_eq!(s.line(2).unwrap().highlight()[0], Highlight::Type);
        assert!(!s.line(2).unwrap().continues_comment());
    }

    #[test]
    fn test_inserted_closing_line_ends_open_comment() {
        let mut s = c_store(&["/* open", "int x;"]);
        assert!(s.line(1).unwrap().highlight()[0].is_comment());
        s.insert_line(1, "*/");
        assert!(!s.line(1).unwrap().continues_comment());
        assert_eq!(s.line(2).unwrap().highlight()[0], Highlight::Type);
    }

    #[test]
    fn test_deleting_opener_reclassifies_successor() {
        let mut s = c_store(&["/* open", "int x;"]);
        s.delete_line(0);
        assert_eq!(s.line(0).unwrap().highlight()[0], Highlight::Type);
    }

    #[test]
    fn test_set_syntax_reclassifies_everything() {
        let mut s = store(&["int x;"]);
        assert_eq!(s.line(0).unwrap().highlight()[0], Highlight::Normal);
        s.set_syntax(Some(&SYNTAXES[0]));
        assert_eq!(s.line(0).unwrap().highlight()[0], Highlight::Type);
        s.set_syntax(None);
        assert_eq!(s.line(0).unwrap().highlight()[0], Highlight::Normal);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Insert(usize, usize, u8),
            Delete(usize, usize),
            Split(usize, usize),
            InsertLine(usize),
            DeleteLine(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            let byte = prop_oneof![
                Just(b'\t'),
                Just(b'/'),
                Just(b'*'),
                Just(b'"'),
                Just(b'1'),
                Just(b' '),
                Just(b'i'),
            ];
            prop_oneof![
                (0..8usize, 0..12usize, byte).prop_map(|(r, c, b)| Op::Insert(r, c, b)),
                (0..8usize, 0..12usize).prop_map(|(r, c)| Op::Delete(r, c)),
                (0..8usize, 0..12usize).prop_map(|(r, c)| Op::Split(r, c)),
                (0..8usize).prop_map(Op::InsertLine),
                (0..8usize).prop_map(Op::DeleteLine),
            ]
        }

        proptest! {
            #[test]
            fn incremental_highlight_matches_full_rescan(ops in proptest::collection::vec(op(), 0..60)) {
                let mut s = c_store(&["int x;", "/* a", "b */"]);
                for op in ops {
                    match op {
                        Op::Insert(r, c, b) => s.insert_char(r, c, b),
                        Op::Delete(r, c) => { s.delete_char(r, c); }
                        Op::Split(r, c) => s.split_line(r, c),
                        Op::InsertLine(r) => s.insert_line(r, Vec::new()),
                        Op::DeleteLine(r) => s.delete_line(r),
                    }
                    for line in s.lines() {
                        prop_assert_eq!(line.render().len(), line.highlight().len());
                    }
                }
                let rescanned = LineStore::from_lines(
                    s.lines().iter().map(|l| l.raw().to_vec()),
                    DEFAULT_TAB_STOP,
                    s.syntax(),
                );
                for (a, b) in s.lines().iter().zip(rescanned.lines()) {
                    prop_assert_eq!(a.highlight(), b.highlight());
                    prop_assert_eq!(a.continues_comment(), b.continues_comment());
                    prop_assert_eq!(a.index(), b.index());
                }
            }

            #[test]
            fn insert_then_delete_round_trips(
                line in "[a-z\t ]{0,20}",
                col in 0..25usize,
                byte in prop_oneof![Just(b'\t'), Just(b'q')],
            ) {
                let mut s = store(&[line.as_str()]);
                let col = col.min(line.len());
                s.insert_char(0, col, byte);
                s.delete_char(0, col + 1);
                prop_assert_eq!(s.line(0).unwrap().raw(), line.as_bytes());
            }
        }
    }
}
