//! YAML parser that builds positioned document sets.
//!
//! yaml-rust2 supplies the node events; comments come from a separate scan of
//! the source text and are merged into the stream by line before the
//! [`Loader`] sees it.

use crate::comments::scan_comments;
use crate::error::Result;
use crate::event::{Event, ScalarStyle};
use crate::loader::Loader;
use crate::DocumentSet;
use serde::Deserialize;
use yaml_rust2::parser::{Event as YamlEvent, MarkedEventReceiver, Parser as YamlParser};
use yaml_rust2::scanner::{Marker, TScalarStyle};
use yamlmeta_filepos::SourceId;

/// Parse every document in `content`.
///
/// # Example
///
/// ```rust
/// use yamlmeta::parse;
///
/// let set = parse("replicas: 3 # default").unwrap();
/// let map = set.items[0].value.as_ref().and_then(|v| v.as_map()).unwrap();
/// assert_eq!(map.items[0].inline_comment.as_ref().unwrap().data, " default");
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is malformed or references an unknown anchor.
pub fn parse(content: &str) -> Result<DocumentSet> {
    Parser::default().parse_str(content, "")
}

/// Parse every document in `content`, attributing positions to `filename`.
///
/// # Example
///
/// ```rust
/// use yamlmeta::parse_file;
///
/// let set = parse_file("key: 1\n", "data.yml").unwrap();
/// let item = &set.items[0].value.as_ref().unwrap().as_map().unwrap().items[0];
/// assert_eq!(item.position.to_string(), "line data.yml:1");
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is malformed or references an unknown anchor.
pub fn parse_file(content: &str, filename: &str) -> Result<DocumentSet> {
    Parser::default().parse_str(content, filename)
}

/// Parser settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserOpts {
    /// Skip comment recovery; the resulting tree carries no comments.
    pub without_comments: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Parser {
    opts: ParserOpts,
}

impl Parser {
    pub fn new(opts: ParserOpts) -> Self {
        Self { opts }
    }

    /// Parse `content`. An empty `source_name` marks in-memory input.
    pub fn parse_str(&self, content: &str, source_name: &str) -> Result<DocumentSet> {
        let events = self.events(content)?;
        tracing::trace!(source = source_name, events = events.len(), "parsed event stream");

        Loader::new(SourceId::from(source_name))
            .with_source_text(content)
            .load(events)
    }

    /// The event stream for `content`, comments included unless disabled.
    pub fn events(&self, content: &str) -> Result<Vec<Event>> {
        let mut collector = EventCollector::new(content);
        YamlParser::new_from_str(content).load(&mut collector, true)?;

        let comments = if self.opts.without_comments {
            Vec::new()
        } else {
            scan_comments(content)
        };

        let mut comments = comments.into_iter().peekable();
        let mut events = Vec::with_capacity(collector.events.len());

        for event in collector.events {
            let flush_all = matches!(event, Event::StreamEnd { .. });
            while let Some(comment) = comments.next_if(|c| flush_all || c.line < event.line()) {
                events.push(Event::Comment {
                    text: comment.text,
                    line: comment.line,
                    inline: comment.inline,
                });
            }
            events.push(event);
        }

        Ok(events)
    }
}

/// Receives yaml-rust2 events and keeps the ones the loader needs.
struct EventCollector<'a> {
    lines: Vec<&'a str>,
    events: Vec<Event>,
    /// One entry per open collection; `Some` for block sequences
    open: Vec<Option<EntryCursor>>,
}

/// Where to look for the next `-` of a block sequence.
struct EntryCursor {
    column: usize,
    next_line: u32,
}

impl<'a> EventCollector<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().collect(),
            events: Vec::new(),
            open: Vec::new(),
        }
    }

    fn line_text(&self, line: u32) -> Option<&'a str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx as usize))
            .copied()
    }

    /// Whether `line` carries a `---` document marker.
    fn has_marker(&self, line: u32) -> bool {
        self.line_text(line).is_some_and(|text| text.starts_with("---"))
    }

    /// Emit the entry event for a value about to start in a block sequence.
    ///
    /// yaml-rust2 reports a value where its first token is, which for an
    /// empty entry or a value on the following lines is past the `-`. The
    /// entry line is the next `-` at the sequence's column.
    fn open_entry(&mut self, value_line: u32) {
        let lines = &self.lines;
        let Some(Some(cursor)) = self.open.last_mut() else {
            return;
        };

        let found = (cursor.next_line..=value_line).find(|&line| {
            line.checked_sub(1)
                .and_then(|idx| lines.get(idx as usize))
                .is_some_and(|text| is_entry_indicator(text, cursor.column))
        });
        if let Some(line) = found {
            cursor.next_line = line + 1;
        }

        self.events.push(Event::SequenceEntry {
            line: found.unwrap_or(value_line),
        });
    }
}

/// Whether `text` has a sequence entry indicator at `column`.
fn is_entry_indicator(text: &str, column: usize) -> bool {
    let mut rest = text.chars().skip(column);
    // compact nested sequences put other indicators in front (`- - a`)
    text.chars().take(column).all(|c| c == ' ' || c == '-')
        && rest.next() == Some('-')
        && rest.next().is_none_or(char::is_whitespace)
}

fn anchor_name(id: usize) -> Option<String> {
    // yaml-rust2 numbers anchors from 1; 0 means no anchor
    (id != 0).then(|| id.to_string())
}

impl MarkedEventReceiver for EventCollector<'_> {
    fn on_event(&mut self, ev: YamlEvent, marker: Marker) {
        let line = u32::try_from(marker.line()).unwrap_or(u32::MAX).max(1);

        if matches!(
            ev,
            YamlEvent::Scalar(..)
                | YamlEvent::Alias(_)
                | YamlEvent::MappingStart(..)
                | YamlEvent::SequenceStart(..)
        ) {
            self.open_entry(line);
        }

        let event = match ev {
            YamlEvent::Nothing => return,
            YamlEvent::StreamStart => Event::StreamStart,
            YamlEvent::StreamEnd => Event::StreamEnd { line },
            YamlEvent::DocumentStart => Event::DocumentStart {
                line,
                explicit: self.has_marker(line),
            },
            YamlEvent::DocumentEnd => Event::DocumentEnd { line },
            YamlEvent::Alias(id) => Event::Alias {
                name: id.to_string(),
                line,
            },
            YamlEvent::Scalar(value, style, anchor_id, _tag) => Event::Scalar {
                value,
                style: match style {
                    TScalarStyle::Plain => ScalarStyle::Plain,
                    _ => ScalarStyle::Quoted,
                },
                anchor: anchor_name(anchor_id),
                line,
            },
            YamlEvent::SequenceStart(anchor_id, _tag) => {
                // a flow sequence starts at `[`, a block one at its first `-`
                let block = self
                    .line_text(line)
                    .and_then(|text| text.chars().nth(marker.col()))
                    == Some('-');
                self.open.push(block.then_some(EntryCursor {
                    column: marker.col(),
                    next_line: line,
                }));
                Event::SequenceStart {
                    anchor: anchor_name(anchor_id),
                    line,
                }
            }
            YamlEvent::SequenceEnd => {
                self.open.pop();
                Event::SequenceEnd { line }
            }
            YamlEvent::MappingStart(anchor_id, _tag) => {
                self.open.push(None);
                Event::MappingStart {
                    anchor: anchor_name(anchor_id),
                    line,
                }
            }
            YamlEvent::MappingEnd => {
                self.open.pop();
                Event::MappingEnd { line }
            }
        };

        self.events.push(event);
    }
}
