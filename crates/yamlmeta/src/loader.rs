//! Builds a positioned [`DocumentSet`] from an [`Event`] stream.
//!
//! Besides assembling the tree, the loader decides where every comment goes
//! and resolves anchors, aliases and merge keys into deep copies.
//!
//! Comment placement:
//! - a comment sharing its line with content is *inline*. It belongs to the
//!   first item that finishes on that line, which is the innermost one. A
//!   line with no item (`--- # note`, a root scalar) gives the comment to
//!   the document.
//! - any other comment is held until the next item begins (a map key or an
//!   array entry) and becomes one of its leading comments. Comments still held
//!   at the end of a document carry over into the next one; comments still
//!   held at the end of the stream form a trailing document with no value.
//!
//! Inline comments are only reported after the item on their line has been
//! finished, so they are pulled out of the stream up front and claimed by
//! line as items complete.

use crate::ast::{Array, ArrayItem, Comment, Document, DocumentSet, Map, MapItem, Node, Scalar};
use crate::builder::{ArrayConfig, ArrayItemConfig, DocumentConfig, MapConfig, MapItemConfig};
use crate::error::{Error, Result};
use crate::event::{Event, ScalarStyle};
use std::collections::HashMap;
use yamlmeta_filepos::{Position, SourceId};

const MERGE_KEY: &str = "<<";

/// Event-stream consumer producing one [`DocumentSet`].
pub struct Loader {
    source: SourceId,
    lines: Vec<String>,

    documents: Vec<Document>,
    document: Option<OpenDocument>,
    stack: Vec<Frame>,

    /// Leading comments waiting for the next item
    pending: Vec<Comment>,
    /// Inline comments by line, waiting to be claimed
    inline: HashMap<u32, Comment>,

    /// Anchored nodes of the current document
    anchors: HashMap<String, Node>,
}

struct OpenDocument {
    position: Position,
    line: u32,
    comments: Vec<Comment>,
    value: Option<Node>,
    filled: bool,
}

/// A map entry whose key has been read, or an array entry whose value has
/// started, but whose value is not finished yet.
struct OpenItem {
    key: Scalar,
    merge: bool,
    line: u32,
    position: Position,
    comments: Vec<Comment>,
}

enum Frame {
    Map {
        map: Map,
        anchor: Option<String>,
        open: Option<OpenItem>,
        /// Slots filled by a merge key; an explicit key may still replace them
        merged: Vec<usize>,
    },
    Array {
        array: Array,
        anchor: Option<String>,
        open: Option<OpenItem>,
    },
}

fn structure(line: u32, message: &str) -> Error {
    Error::InvalidStructure {
        line,
        message: message.to_string(),
    }
}

impl Loader {
    pub fn new(source: SourceId) -> Self {
        Self {
            source,
            lines: Vec::new(),
            documents: Vec::new(),
            document: None,
            stack: Vec::new(),
            pending: Vec::new(),
            inline: HashMap::new(),
            anchors: HashMap::new(),
        }
    }

    /// Keep the raw source so positions can quote their line.
    pub fn with_source_text(mut self, text: &str) -> Self {
        self.lines = text.lines().map(str::to_string).collect();
        self
    }

    /// Consume the whole stream.
    ///
    /// An input with no documents at all still yields one empty document at
    /// line 1.
    pub fn load<I>(mut self, events: I) -> Result<DocumentSet>
    where
        I: IntoIterator<Item = Event>,
    {
        let mut stream = Vec::new();
        for event in events {
            match event {
                Event::Comment {
                    text,
                    line,
                    inline: true,
                } => {
                    let comment = Comment::new(text, self.position(line));
                    self.inline.insert(line, comment);
                }
                other => stream.push(other),
            }
        }

        for event in stream {
            self.handle(event)?;
        }

        self.finish()
    }

    fn position(&self, line: u32) -> Position {
        let position = Position::new(line).with_source(self.source.clone());
        match line.checked_sub(1).and_then(|idx| self.lines.get(idx as usize)) {
            Some(text) => position.with_text(text.clone()),
            None => position,
        }
    }

    fn handle(&mut self, event: Event) -> Result<()> {
        match event {
            Event::StreamStart => Ok(()),
            Event::StreamEnd { line } => match self.document {
                Some(_) => Err(structure(line, "stream ended inside a document")),
                None => Ok(()),
            },
            Event::DocumentStart { line, explicit } => self.start_document(line, explicit),
            Event::DocumentEnd { line } => self.end_document(line),
            Event::Comment { text, line, .. } => {
                let comment = Comment::new(text, self.position(line));
                self.pending.push(comment);
                Ok(())
            }
            Event::Scalar {
                value,
                style,
                anchor,
                line,
            } => {
                let scalar = match style {
                    ScalarStyle::Plain => Scalar::resolve_plain(&value),
                    ScalarStyle::Quoted => Scalar::String(value.clone()),
                };

                if self.expects_key() {
                    if let Some(name) = anchor {
                        self.register_anchor(name, &Node::Scalar(scalar.clone()));
                    }
                    let merge = style == ScalarStyle::Plain && value == MERGE_KEY;
                    return self.open_key(scalar, merge, line);
                }

                self.begin_value(line)?;
                let node = Node::Scalar(scalar);
                if let Some(name) = anchor {
                    self.register_anchor(name, &node);
                }
                self.place(node, line)
            }
            Event::Alias { name, line } => {
                let node = self
                    .anchors
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| Error::UnknownAnchor {
                        name: name.clone(),
                        line,
                    })?;
                tracing::trace!(anchor = %name, line, "resolved alias");

                if self.expects_key() {
                    return match node {
                        Node::Scalar(key) => self.open_key(key, false, line),
                        _ => Err(structure(line, "mapping keys must be scalars")),
                    };
                }

                self.begin_value(line)?;
                self.place(node, line)
            }
            Event::MappingStart { anchor, line } => {
                self.begin_value(line)?;
                let map = Map::build(MapConfig {
                    position: Some(self.position(line)),
                    ..Default::default()
                });
                self.stack.push(Frame::Map {
                    map,
                    anchor,
                    open: None,
                    merged: Vec::new(),
                });
                Ok(())
            }
            Event::SequenceStart { anchor, line } => {
                self.begin_value(line)?;
                let array = Array::build(ArrayConfig {
                    position: Some(self.position(line)),
                    ..Default::default()
                });
                self.stack.push(Frame::Array {
                    array,
                    anchor,
                    open: None,
                });
                Ok(())
            }
            Event::SequenceEntry { line } => self.open_entry(line),
            Event::MappingEnd { line } => match self.stack.pop() {
                Some(Frame::Map {
                    map, anchor, open, ..
                }) => {
                    if open.is_some() {
                        return Err(structure(line, "mapping ended before its last value"));
                    }
                    self.complete_collection(Node::Map(map), anchor, line)
                }
                _ => Err(structure(line, "mapping end without a matching start")),
            },
            Event::SequenceEnd { line } => match self.stack.pop() {
                Some(Frame::Array {
                    array, anchor, open,
                }) => {
                    if open.is_some() {
                        return Err(structure(line, "sequence ended before its last value"));
                    }
                    self.complete_collection(Node::Array(array), anchor, line)
                }
                _ => Err(structure(line, "sequence end without a matching start")),
            },
        }
    }

    fn start_document(&mut self, line: u32, explicit: bool) -> Result<()> {
        if self.document.is_some() {
            return Err(structure(line, "document started inside another document"));
        }
        tracing::debug!(line, explicit, "document start");

        let first = self.documents.is_empty();
        if first && explicit && line > 1 {
            // Whatever precedes the first `---` is an empty document at line 1
            self.documents.push(Document::build(DocumentConfig {
                position: Some(self.position(1)),
                ..Default::default()
            }));
        }

        // Comments above a `---` belong to the document it opens
        let comments = if explicit {
            self.take_leading(line)
        } else {
            Vec::new()
        };
        // A stream without a leading `---` opens its first document at line 1
        let position = if first && !explicit {
            self.position(1)
        } else {
            self.position(line)
        };
        self.document = Some(OpenDocument {
            position,
            line,
            comments,
            value: None,
            filled: false,
        });
        Ok(())
    }

    fn end_document(&mut self, line: u32) -> Result<()> {
        let Some(doc) = self.document.take() else {
            return Err(structure(line, "document end without a matching start"));
        };
        if !self.stack.is_empty() {
            return Err(structure(line, "document ended inside a collection"));
        }

        // Inline comments on lines where no item finished
        let mut comments = doc.comments;
        let mut unclaimed: Vec<u32> = self.inline.keys().copied().filter(|&l| l <= line).collect();
        unclaimed.sort_unstable();
        for l in unclaimed {
            comments.extend(self.inline.remove(&l));
        }
        comments.sort_by(|a, b| a.position.cmp(&b.position));

        tracing::debug!(
            line = doc.line,
            anchors = self.anchors.len(),
            "document end"
        );
        self.anchors.clear();

        self.documents.push(Document::build(DocumentConfig {
            comments,
            value: doc.value,
            position: Some(doc.position),
        }));
        Ok(())
    }

    fn finish(mut self) -> Result<DocumentSet> {
        if self.documents.is_empty() {
            let position = self.position(1);
            self.documents.push(Document::build(DocumentConfig {
                position: Some(position),
                ..Default::default()
            }));
        }

        let mut trailing = std::mem::take(&mut self.pending);
        trailing.extend(self.inline.drain().map(|(_, comment)| comment));
        if !trailing.is_empty() {
            trailing.sort_by(|a, b| a.position.cmp(&b.position));
            mark_detached(&mut trailing, None);
            self.documents.push(Document::build(DocumentConfig {
                comments: trailing,
                value: None,
                position: Some(Position::unknown().with_source(self.source.clone())),
            }));
        }

        Ok(DocumentSet {
            items: self.documents,
            position: Position::unknown().with_source(self.source),
        })
    }

    fn expects_key(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Map { open: None, .. }))
    }

    fn take_leading(&mut self, next_line: u32) -> Vec<Comment> {
        let mut comments = std::mem::take(&mut self.pending);
        mark_detached(&mut comments, Some(next_line));
        comments
    }

    fn open_key(&mut self, key: Scalar, merge: bool, line: u32) -> Result<()> {
        let comments = self.take_leading(line);
        let position = self.position(line);
        match self.stack.last_mut() {
            Some(Frame::Map { open, .. }) => {
                *open = Some(OpenItem {
                    key,
                    merge,
                    line,
                    position,
                    comments,
                });
                Ok(())
            }
            _ => Err(structure(line, "mapping key outside of a mapping")),
        }
    }

    /// Check that a value may start here, opening an array entry if the
    /// innermost collection is an array whose entry is not open yet.
    fn begin_value(&mut self, line: u32) -> Result<()> {
        match self.stack.last() {
            None => match &self.document {
                None => Err(structure(line, "value outside of a document")),
                Some(doc) if doc.filled => Err(structure(line, "document already has a value")),
                Some(_) => Ok(()),
            },
            Some(Frame::Map { open: None, .. }) => Err(structure(line, "mapping keys must be scalars")),
            Some(Frame::Map { .. }) => Ok(()),
            Some(Frame::Array { open: Some(_), .. }) => Ok(()),
            Some(Frame::Array { open: None, .. }) => self.open_entry(line),
        }
    }

    /// Open an array entry at `line`. Held comments become its leading
    /// comments.
    fn open_entry(&mut self, line: u32) -> Result<()> {
        match self.stack.last() {
            Some(Frame::Array { open: None, .. }) => {}
            Some(Frame::Array { open: Some(_), .. }) => {
                return Err(structure(line, "array entry started twice"));
            }
            _ => return Err(structure(line, "array entry outside of a sequence")),
        }

        let comments = self.take_leading(line);
        let position = self.position(line);
        if let Some(Frame::Array { open, .. }) = self.stack.last_mut() {
            *open = Some(OpenItem {
                key: Scalar::Null,
                merge: false,
                line,
                position,
                comments,
            });
        }
        Ok(())
    }

    fn register_anchor(&mut self, name: String, node: &Node) {
        tracing::trace!(anchor = %name, kind = node.type_name(), "registered anchor");
        self.anchors.insert(name, node.clone());
    }

    fn complete_collection(&mut self, node: Node, anchor: Option<String>, line: u32) -> Result<()> {
        if let Some(name) = anchor {
            self.register_anchor(name, &node);
        }
        self.place(node, line)
    }

    /// Hand a finished value to whatever is waiting for it.
    fn place(&mut self, mut node: Node, line: u32) -> Result<()> {
        if self.stack.is_empty() {
            return self.place_root(node, line);
        }
        let Some(frame) = self.stack.last_mut() else {
            return Err(structure(line, "value outside of a collection"));
        };

        match frame {
            Frame::Map { map, open, merged, .. } => {
                let item = open
                    .take()
                    .ok_or_else(|| structure(line, "mapping value without a key"))?;
                let inline = self.inline.remove(&item.line);
                node.set_position(item.position.clone());

                if item.merge {
                    // The merge entry itself disappears; its comments stay with the map
                    map.comments.extend(item.comments);
                    map.comments.extend(inline);
                    return merge_into(map, merged, node, item.line);
                }

                insert_item(
                    map,
                    merged,
                    MapItem::build(MapItemConfig {
                        key: item.key,
                        value: node,
                        position: Some(item.position),
                        comments: item.comments,
                        inline_comment: inline,
                    }),
                );
                Ok(())
            }
            Frame::Array { array, open, .. } => {
                let item = open
                    .take()
                    .ok_or_else(|| structure(line, "array value without an entry"))?;
                let inline = self.inline.remove(&item.line);
                node.set_position(item.position.clone());

                array.items.push(ArrayItem::build(ArrayItemConfig {
                    value: node,
                    position: Some(item.position),
                    comments: item.comments,
                    inline_comment: inline,
                }));
                Ok(())
            }
        }
    }

    fn place_root(&mut self, mut node: Node, line: u32) -> Result<()> {
        let Some(doc) = self.document.as_mut() else {
            return Err(structure(line, "value outside of a document"));
        };
        if doc.filled {
            return Err(structure(line, "document already has a value"));
        }
        doc.filled = true;

        if node.is_null() {
            // An empty document; held comments stay held for what follows
        } else if let Node::Scalar(_) = node {
            // Nothing inside a scalar document can own a comment
            let mut comments = std::mem::take(&mut self.pending);
            mark_detached(&mut comments, Some(doc.line));
            doc.comments.extend(comments);
            doc.value = Some(node);
        } else {
            node.set_position(doc.position.clone());
            doc.value = Some(node);
        }
        Ok(())
    }
}

/// Flag comments separated from their successor by an unrelated line. The
/// last comment's successor is `next_line`, when there is one.
fn mark_detached(comments: &mut [Comment], next_line: Option<u32>) {
    let lines: Vec<Option<u32>> = comments.iter().map(|c| c.position.line()).collect();
    for (idx, comment) in comments.iter_mut().enumerate() {
        let next = match lines.get(idx + 1) {
            Some(line) => *line,
            None => next_line,
        };
        comment.detached = match (lines[idx], next) {
            (Some(line), Some(next)) => next > line + 1,
            _ => false,
        };
    }
}

/// Add an explicitly declared item. A key that matches a merged-in item
/// replaces it in place; any other repeated key is kept as a duplicate.
fn insert_item(map: &mut Map, merged: &mut Vec<usize>, item: MapItem) {
    let replaced = merged
        .iter()
        .position(|&slot| map.items[slot].key == item.key);
    match replaced {
        Some(idx) => {
            let slot = merged.remove(idx);
            tracing::debug!(key = %item.key, "explicit key overrides merged key");
            map.items[slot] = item;
        }
        None => map.items.push(item),
    }
}

/// Splice the items of a merge value into `map`, later declarations winning.
fn merge_into(map: &mut Map, merged: &mut Vec<usize>, value: Node, line: u32) -> Result<()> {
    let sources = match value {
        Node::Map(source) => vec![source],
        Node::Array(array) => array
            .items
            .into_iter()
            .map(|item| match item.value {
                Node::Map(source) => Ok(source),
                _ => Err(Error::InvalidMerge { line }),
            })
            .collect::<Result<Vec<_>>>()?,
        Node::Scalar(_) => return Err(Error::InvalidMerge { line }),
    };

    for source in sources {
        tracing::debug!(line, keys = source.items.len(), "merging map");
        for item in source.items {
            match map.items.iter().position(|existing| existing.key == item.key) {
                Some(slot) => {
                    map.items[slot] = item;
                    if !merged.contains(&slot) {
                        merged.push(slot);
                    }
                }
                None => {
                    merged.push(map.items.len());
                    map.items.push(item);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(events: Vec<Event>) -> Result<DocumentSet> {
        Loader::new(SourceId::InMemory).load(events)
    }

    fn key(value: &str, line: u32) -> Event {
        Event::plain(value, line)
    }

    #[test]
    fn test_empty_stream_yields_one_document() {
        let set = load(vec![Event::StreamStart, Event::StreamEnd { line: 1 }]).unwrap();
        assert_eq!(
            set,
            Document::build_in_document_set(
                DocumentConfig {
                    position: Some(Position::new(1)),
                    ..Default::default()
                },
                None,
            )
        );
    }

    #[test]
    fn test_null_root_is_an_empty_document() {
        let set = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::plain("~", 1),
            Event::DocumentEnd { line: 2 },
            Event::StreamEnd { line: 2 },
        ])
        .unwrap();

        assert_eq!(set.items.len(), 1);
        assert!(set.items[0].value.is_none());
    }

    #[test]
    fn test_leading_comment_and_detached_gap() {
        let set = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::MappingStart { anchor: None, line: 1 },
            key("a", 1),
            Event::plain("1", 1),
            Event::comment(" far", 2),
            Event::comment(" near", 4),
            key("b", 5),
            Event::plain("2", 5),
            Event::MappingEnd { line: 6 },
            Event::DocumentEnd { line: 6 },
            Event::StreamEnd { line: 6 },
        ])
        .unwrap();

        let map = set.items[0].value.as_ref().and_then(Node::as_map).unwrap();
        let b = map.get("b").unwrap();
        assert_eq!(b.comments.len(), 2);
        assert_eq!(b.comments[0].data, " far");
        assert!(b.comments[0].detached);
        assert_eq!(b.comments[1].data, " near");
        assert!(!b.comments[1].detached);
        assert!(map.get("a").unwrap().comments.is_empty());
    }

    #[test]
    fn test_inline_comment_goes_to_innermost_item() {
        let set = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::SequenceStart { anchor: None, line: 1 },
            Event::MappingStart { anchor: None, line: 1 },
            key("a", 1),
            Event::plain("1", 1),
            Event::inline_comment(" on a", 1),
            Event::MappingEnd { line: 2 },
            Event::SequenceEnd { line: 2 },
            Event::DocumentEnd { line: 2 },
            Event::StreamEnd { line: 2 },
        ])
        .unwrap();

        let array = set.items[0].value.as_ref().and_then(Node::as_array).unwrap();
        let entry = &array.items[0];
        assert!(entry.inline_comment.is_none());
        let a = entry.value.as_map().and_then(|m| m.get("a")).unwrap();
        assert_eq!(a.inline_comment.as_ref().map(|c| c.data.as_str()), Some(" on a"));
    }

    #[test]
    fn test_entry_takes_the_dash_line() {
        let set = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::SequenceStart { anchor: None, line: 1 },
            Event::SequenceEntry { line: 1 },
            Event::inline_comment(" empty", 1),
            Event::plain("", 2),
            Event::SequenceEntry { line: 2 },
            Event::comment(" on-map", 3),
            Event::MappingStart { anchor: None, line: 4 },
            key("a", 4),
            Event::plain("1", 4),
            Event::MappingEnd { line: 5 },
            Event::SequenceEnd { line: 5 },
            Event::DocumentEnd { line: 5 },
            Event::StreamEnd { line: 5 },
        ])
        .unwrap();

        assert!(set.items[0].comments.is_empty());
        let array = set.items[0].value.as_ref().and_then(Node::as_array).unwrap();
        assert_eq!(array.items[0].position, Position::new(1));
        assert_eq!(
            array.items[0].inline_comment.as_ref().map(|c| c.data.as_str()),
            Some(" empty")
        );

        let entry = &array.items[1];
        assert_eq!(entry.position, Position::new(2));
        assert!(entry.comments.is_empty());
        let map = entry.value.as_map().unwrap();
        assert_eq!(map.position, Position::new(2));
        assert_eq!(map.get("a").unwrap().comments[0].data, " on-map");
    }

    #[test]
    fn test_entry_opened_twice_is_rejected() {
        let err = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::SequenceStart { anchor: None, line: 1 },
            Event::SequenceEntry { line: 1 },
            Event::SequenceEntry { line: 2 },
        ])
        .unwrap_err();

        assert!(matches!(err, Error::InvalidStructure { line: 2, .. }));
    }

    #[test]
    fn test_first_implicit_document_is_at_line_one() {
        let set = load(vec![
            Event::StreamStart,
            Event::comment(" values", 1),
            Event::DocumentStart { line: 3, explicit: false },
            Event::MappingStart { anchor: None, line: 3 },
            key("name", 3),
            Event::plain("app", 3),
            Event::MappingEnd { line: 4 },
            Event::DocumentEnd { line: 4 },
            Event::StreamEnd { line: 4 },
        ])
        .unwrap();

        assert_eq!(set.items.len(), 1);
        assert_eq!(set.items[0].position, Position::new(1));
        let map = set.items[0].value.as_ref().and_then(Node::as_map).unwrap();
        assert_eq!(map.position, Position::new(1));
        let name = map.get("name").unwrap();
        assert_eq!(name.position, Position::new(3));
        assert!(name.comments[0].detached);
    }

    #[test]
    fn test_unknown_alias() {
        let err = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::MappingStart { anchor: None, line: 1 },
            key("a", 1),
            Event::Alias {
                name: "missing".to_string(),
                line: 1,
            },
        ])
        .unwrap_err();

        assert_eq!(
            err,
            Error::UnknownAnchor {
                name: "missing".to_string(),
                line: 1
            }
        );
    }

    #[test]
    fn test_anchors_do_not_cross_documents() {
        let err = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::Scalar {
                value: "x".to_string(),
                style: ScalarStyle::Plain,
                anchor: Some("v".to_string()),
                line: 1,
            },
            Event::DocumentEnd { line: 2 },
            Event::DocumentStart { line: 2, explicit: false },
            Event::Alias {
                name: "v".to_string(),
                line: 3,
            },
        ])
        .unwrap_err();

        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_merge_of_scalar_is_rejected() {
        let err = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::MappingStart { anchor: None, line: 1 },
            key("<<", 1),
            Event::plain("5", 1),
        ])
        .unwrap_err();

        assert_eq!(err, Error::InvalidMerge { line: 1 });
    }

    #[test]
    fn test_quoted_merge_key_is_an_ordinary_key() {
        let set = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::MappingStart { anchor: None, line: 1 },
            Event::Scalar {
                value: "<<".to_string(),
                style: ScalarStyle::Quoted,
                anchor: None,
                line: 1,
            },
            Event::plain("5", 1),
            Event::MappingEnd { line: 2 },
            Event::DocumentEnd { line: 2 },
            Event::StreamEnd { line: 2 },
        ])
        .unwrap();

        let map = set.items[0].value.as_ref().and_then(Node::as_map).unwrap();
        assert_eq!(map.get("<<").map(|i| &i.value), Some(&Node::from(5)));
    }

    #[test]
    fn test_trailing_comments_form_a_document() {
        let set = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::plain("x", 1),
            Event::DocumentEnd { line: 2 },
            Event::comment(" end", 2),
            Event::StreamEnd { line: 3 },
        ])
        .unwrap();

        assert_eq!(set.items.len(), 2);
        let trailing = &set.items[1];
        assert!(trailing.value.is_none());
        assert!(!trailing.position.is_known());
        assert_eq!(trailing.comments[0].data, " end");
    }

    #[test]
    fn test_unbalanced_end_is_rejected() {
        let err = load(vec![
            Event::StreamStart,
            Event::DocumentStart { line: 1, explicit: false },
            Event::MappingEnd { line: 1 },
        ])
        .unwrap_err();

        assert!(matches!(err, Error::InvalidStructure { line: 1, .. }));
    }
}
