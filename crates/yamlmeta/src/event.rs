//! The event stream the document loader consumes.
//!
//! Events carry 1-based line numbers. The stream is produced by the
//! yaml-rust2 adapter in [`crate::parser`], but any tokenizer that can emit
//! these events (including a test) can drive the loader directly.

/// How a scalar was written. Only plain scalars go through type resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    /// Single quoted, double quoted, literal or folded
    Quoted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StreamStart,
    StreamEnd { line: u32 },
    /// `explicit` is set when the document opens with a `---` marker
    DocumentStart { line: u32, explicit: bool },
    DocumentEnd { line: u32 },
    MappingStart { anchor: Option<String>, line: u32 },
    MappingEnd { line: u32 },
    SequenceStart { anchor: Option<String>, line: u32 },
    /// The `-` of a block sequence entry. The entry's value follows; without
    /// this event an entry starts where its value does.
    SequenceEntry { line: u32 },
    SequenceEnd { line: u32 },
    Scalar {
        value: String,
        style: ScalarStyle,
        anchor: Option<String>,
        line: u32,
    },
    Alias { name: String, line: u32 },
    /// Comment text with the leading `#` removed. `inline` is set when the
    /// comment shares its line with YAML content.
    Comment { text: String, line: u32, inline: bool },
}

impl Event {
    pub fn line(&self) -> u32 {
        match self {
            Event::StreamStart => 1,
            Event::StreamEnd { line }
            | Event::DocumentStart { line, .. }
            | Event::DocumentEnd { line }
            | Event::MappingStart { line, .. }
            | Event::MappingEnd { line }
            | Event::SequenceStart { line, .. }
            | Event::SequenceEntry { line }
            | Event::SequenceEnd { line }
            | Event::Scalar { line, .. }
            | Event::Alias { line, .. }
            | Event::Comment { line, .. } => *line,
        }
    }

    pub fn plain(value: impl Into<String>, line: u32) -> Event {
        Event::Scalar {
            value: value.into(),
            style: ScalarStyle::Plain,
            anchor: None,
            line,
        }
    }

    /// A comment alone on its line.
    pub fn comment(text: impl Into<String>, line: u32) -> Event {
        Event::Comment {
            text: text.into(),
            line,
            inline: false,
        }
    }

    /// A comment trailing content on its line.
    pub fn inline_comment(text: impl Into<String>, line: u32) -> Event {
        Event::Comment {
            text: text.into(),
            line,
            inline: true,
        }
    }
}
