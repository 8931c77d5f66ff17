//! Syntax highlighting for render lines.
//!
//! Classification is a single pass over a line's tab-expanded bytes driven by
//! a [`Syntax`] rule table. The only state carried between lines is whether
//! the previous line ended inside a multi-line comment.

mod syntax;

pub use syntax::{KeywordClass, SYNTAXES, Syntax, select_for};

/// Category assigned to a single render byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    MultilineComment,
    Keyword,
    Type,
    String,
    Number,
    /// Temporary overlay for the current search hit.
    Match,
}

impl Highlight {
    /// Whether the tag is either comment flavour.
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::Comment | Self::MultilineComment)
    }
}

/// Whether `byte` terminates a keyword or number.
pub fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0 || byte == 0x0b || b",.()+-/*=~%<>[];".contains(&byte)
}

/// Classify `render` into `out`, returning whether the line ends inside an
/// unterminated multi-line comment.
///
/// `out` is resized to `render.len()`. Without a syntax every byte is
/// [`Highlight::Normal`] and the line never continues a comment.
pub fn highlight_line(
    render: &[u8],
    syntax: Option<&Syntax>,
    starts_in_comment: bool,
    out: &mut Vec<Highlight>,
) -> bool {
    out.clear();
    out.resize(render.len(), Highlight::Normal);

    let Some(syntax) = syntax else {
        return false;
    };

    let single = syntax
        .single_line_comment
        .map(str::as_bytes)
        .filter(|token| !token.is_empty());
    let multi = syntax
        .multiline_comment
        .map(|(start, end)| (start.as_bytes(), end.as_bytes()))
        .filter(|(start, end)| !start.is_empty() && !end.is_empty());

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = starts_in_comment && multi.is_some();

    let mut i = 0;
    while i < render.len() {
        let byte = render[i];
        let prev_hl = if i > 0 { out[i - 1] } else { Highlight::Normal };
        let rest = &render[i..];

        if let Some(token) = single
            && in_string.is_none()
            && !in_comment
            && rest.starts_with(token)
        {
            out[i..].fill(Highlight::Comment);
            break;
        }

        if let Some((start, end)) = multi
            && in_string.is_none()
        {
            if in_comment {
                out[i] = Highlight::MultilineComment;
                if rest.starts_with(end) {
                    out[i..i + end.len()].fill(Highlight::MultilineComment);
                    i += end.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    i += 1;
                }
                continue;
            } else if rest.starts_with(start) {
                out[i..i + start.len()].fill(Highlight::MultilineComment);
                i += start.len();
                in_comment = true;
                continue;
            }
        }

        if syntax.highlight_strings {
            if let Some(quote) = in_string {
                out[i] = Highlight::String;
                if byte == b'\\' && i + 1 < render.len() {
                    out[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if byte == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if byte == b'"' || byte == b'\'' {
                in_string = Some(byte);
                out[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.highlight_numbers
            && ((byte.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (byte == b'.' && prev_hl == Highlight::Number))
        {
            out[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some((len, tag)) = match_keyword(syntax, rest) {
            out[i..i + len].fill(tag);
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(byte);
        i += 1;
    }

    in_comment
}

/// Find a keyword at the start of `rest` that is followed by a separator or
/// the end of the line.
fn match_keyword(syntax: &Syntax, rest: &[u8]) -> Option<(usize, Highlight)> {
    syntax.keywords().find_map(|(keyword, class)| {
        if keyword.is_empty() || !rest.starts_with(keyword) {
            return None;
        }
        let bounded = rest.get(keyword.len()).is_none_or(|&next| is_separator(next));
        bounded.then_some((
            keyword.len(),
            match class {
                KeywordClass::Plain => Highlight::Keyword,
                KeywordClass::Type => Highlight::Type,
            },
        ))
    })
}
