//! Built-in language rule table.

use std::path::Path;

/// Trailing marker that turns a keyword into a type keyword.
const TYPE_MARKER: u8 = b'|';

/// Highlighting rules for one filetype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    /// Name shown in the status bar.
    pub filetype: &'static str,
    /// Extensions (starting with `.`) or file name substrings.
    pub file_match: &'static [&'static str],
    /// Keywords; a trailing `|` marks a type keyword.
    pub keywords: &'static [&'static str],
    pub single_line_comment: Option<&'static str>,
    /// Multi-line comment start and end tokens.
    pub multiline_comment: Option<(&'static str, &'static str)>,
    pub highlight_numbers: bool,
    pub highlight_strings: bool,
}

/// Keyword class decoded from the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    Plain,
    Type,
}

impl Syntax {
    /// Iterate keywords with the type marker stripped.
    pub fn keywords(&self) -> impl Iterator<Item = (&'static [u8], KeywordClass)> + '_ {
        self.keywords.iter().map(|kw| {
            let bytes: &'static [u8] = kw.as_bytes();
            match bytes.split_last() {
                Some((&TYPE_MARKER, rest)) => (rest, KeywordClass::Type),
                _ => (bytes, KeywordClass::Plain),
            }
        })
    }

    /// Whether this rule set applies to `filename`.
    pub fn matches(&self, filename: &str) -> bool {
        let ext = filename.rfind('.').map(|idx| &filename[idx..]);
        self.file_match.iter().any(|pattern| {
            if pattern.starts_with('.') {
                ext == Some(*pattern)
            } else {
                filename.contains(pattern)
            }
        })
    }
}

pub static SYNTAXES: &[Syntax] = &[
    Syntax {
        filetype: "c",
        file_match: &[".c", ".h", ".cpp"],
        keywords: &[
            "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
            "union", "typedef", "static", "enum", "class", "case", "int|", "long|", "double|",
            "float|", "char|", "unsigned|", "signed|", "void|",
        ],
        single_line_comment: Some("//"),
        multiline_comment: Some(("/*", "*/")),
        highlight_numbers: true,
        highlight_strings: true,
    },
    Syntax {
        filetype: "rust",
        file_match: &[".rs"],
        keywords: &[
            "as", "break", "const", "continue", "crate", "else", "enum", "extern", "fn", "for",
            "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
            "return", "self", "Self", "static", "struct", "super", "trait", "type", "unsafe",
            "use", "where", "while", "i8|", "i16|", "i32|", "i64|", "isize|", "u8|", "u16|",
            "u32|", "u64|", "usize|", "f32|", "f64|", "bool|", "char|", "str|", "String|",
        ],
        single_line_comment: Some("//"),
        multiline_comment: Some(("/*", "*/")),
        highlight_numbers: true,
        highlight_strings: true,
    },
    Syntax {
        filetype: "python",
        file_match: &[".py"],
        keywords: &[
            "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else",
            "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
            "not", "or", "pass", "raise", "return", "try", "while", "with", "yield", "int|",
            "float|", "str|", "bool|", "list|", "dict|", "None|", "True|", "False|",
        ],
        single_line_comment: Some("#"),
        multiline_comment: None,
        highlight_numbers: true,
        highlight_strings: true,
    },
];

/// Pick the rule set for a file path, if any matches its file name.
pub fn select_for(path: &Path) -> Option<&'static Syntax> {
    let name = path.file_name()?.to_string_lossy();
    SYNTAXES.iter().find(|syntax| syntax.matches(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_by_extension() {
        let syntax = select_for(Path::new("src/main.c")).unwrap();
        assert_eq!(syntax.filetype, "c");
        assert_eq!(select_for(Path::new("lib.rs")).unwrap().filetype, "rust");
        assert_eq!(select_for(Path::new("tool.py")).unwrap().filetype, "python");
    }

    #[test]
    fn test_extension_must_match_exactly() {
        assert!(select_for(Path::new("notes.cc")).is_none());
        assert!(select_for(Path::new("archive.c.txt")).is_none());
    }

    #[test]
    fn test_unknown_file_has_no_syntax() {
        assert!(select_for(Path::new("README")).is_none());
        assert!(select_for(Path::new("")).is_none());
    }

    #[test]
    fn test_substring_pattern_matches_anywhere_in_name() {
        let syntax = Syntax {
            filetype: "make",
            file_match: &["Makefile"],
            keywords: &[],
            single_line_comment: Some("#"),
            multiline_comment: None,
            highlight_numbers: false,
            highlight_strings: false,
        };
        assert!(syntax.matches("Makefile"));
        assert!(syntax.matches("Makefile.old"));
        assert!(!syntax.matches("makefile"));
    }

    #[test]
    fn test_keywords_strip_type_marker() {
        let c = &SYNTAXES[0];
        let classes: Vec<_> = c.keywords().collect();
        assert!(classes.contains(&(&b"int"[..], KeywordClass::Type)));
        assert!(classes.contains(&(&b"return"[..], KeywordClass::Plain)));
        assert!(!classes.iter().any(|(kw, _)| kw.ends_with(b"|")));
    }
}
