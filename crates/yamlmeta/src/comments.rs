//! Line scanner that finds `#` comments in YAML source.
//!
//! yaml-rust2 drops comments while tokenizing, so they are recovered from the
//! raw text. A `#` opens a comment when it starts the line or follows
//! whitespace, and is not inside a quoted scalar. Bodies of block scalars
//! (`|` and `>`) are skipped entirely.

/// A comment found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceComment {
    /// 1-based line
    pub line: u32,
    /// Text after the `#`, trailing whitespace removed
    pub text: String,
    /// Whether YAML content precedes the comment on its line
    pub inline: bool,
}

pub(crate) fn scan_comments(source: &str) -> Vec<SourceComment> {
    let mut comments = Vec::new();
    // Indentation of the line that opened a block scalar
    let mut block_indent: Option<usize> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        let indent = line.len() - line.trim_start_matches(' ').len();

        if let Some(parent) = block_indent {
            if line.trim().is_empty() || indent > parent {
                continue;
            }
            block_indent = None;
        }

        let comment_start = find_comment(line);
        let content = match comment_start {
            Some(start) => &line[..start],
            None => line,
        };

        if let Some(start) = comment_start {
            comments.push(SourceComment {
                line: u32::try_from(idx + 1).unwrap_or(u32::MAX),
                text: line[start + 1..].trim_end().to_string(),
                inline: !content.trim().is_empty(),
            });
        }

        if opens_block_scalar(content) {
            block_indent = Some(indent);
        }
    }

    comments
}

/// Byte offset of the `#` that starts a comment on this line.
fn find_comment(line: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    let mut closed_single = false;

    for (offset, ch) in line.char_indices() {
        let just_closed = closed_single;
        closed_single = false;
        match quote {
            Some('"') => {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    quote = None;
                }
            }
            Some(_) => {
                if ch == '\'' {
                    quote = None;
                    closed_single = true;
                }
            }
            None => {
                let at_scalar_start =
                    matches!(prev, None | Some(' ' | '\t' | '[' | '{' | ','));
                match ch {
                    '"' | '\'' if at_scalar_start => quote = Some(ch),
                    // '' escapes a quote inside a single quoted scalar
                    '\'' if just_closed => quote = Some(ch),
                    '#' if matches!(prev, None | Some(' ' | '\t')) => return Some(offset),
                    _ => {}
                }
            }
        }
        prev = Some(ch);
    }

    None
}

/// Whether the line's last token is a block scalar indicator like `|`, `>-`
/// or `|2+`.
fn opens_block_scalar(content: &str) -> bool {
    let Some(token) = content.split_whitespace().last() else {
        return false;
    };
    let mut chars = token.chars();
    matches!(chars.next(), Some('|' | '>'))
        && chars.all(|c| c == '+' || c == '-' || c.is_ascii_digit())
}
