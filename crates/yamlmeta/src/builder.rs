//! Explicit construction of document model nodes.
//!
//! Each node kind has a configuration struct holding every field the node
//! needs. `build` takes the struct by value and returns the finished node;
//! there are no partially built intermediates. A position left as `None`
//! becomes [`Position::unknown()`].
//!
//! The event loader, the schema crate (when it materializes defaults) and
//! tests all construct nodes through these functions.
//!
//! ```rust
//! use yamlmeta::{Map, MapConfig, MapItem, MapItemConfig, Node};
//! use yamlmeta_filepos::Position;
//!
//! let map = Map::build(MapConfig {
//!     items: vec![MapItem::build(MapItemConfig {
//!         key: "replicas".into(),
//!         value: Node::from(3),
//!         position: Some(Position::new(2)),
//!         ..Default::default()
//!     })],
//!     ..Default::default()
//! });
//!
//! assert_eq!(map.items[0].position, Position::new(2));
//! assert!(!map.position.is_known());
//! ```

use crate::ast::{Array, ArrayItem, Comment, Document, DocumentSet, Map, MapItem, Node, Scalar};
use yamlmeta_filepos::Position;

#[derive(Debug, Clone, Default)]
pub struct DocumentConfig {
    pub comments: Vec<Comment>,
    pub value: Option<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    pub items: Vec<MapItem>,
    pub position: Option<Position>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default)]
pub struct MapItemConfig {
    pub key: Scalar,
    pub value: Node,
    pub position: Option<Position>,
    pub comments: Vec<Comment>,
    pub inline_comment: Option<Comment>,
}

#[derive(Debug, Clone, Default)]
pub struct ArrayConfig {
    pub items: Vec<ArrayItem>,
    pub position: Option<Position>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default)]
pub struct ArrayItemConfig {
    pub value: Node,
    pub position: Option<Position>,
    pub comments: Vec<Comment>,
    pub inline_comment: Option<Comment>,
}

fn or_unknown(position: Option<Position>) -> Position {
    position.unwrap_or_else(Position::unknown)
}

impl Document {
    pub fn build(config: DocumentConfig) -> Document {
        Document {
            comments: config.comments,
            value: config.value,
            position: or_unknown(config.position),
        }
    }

    /// Build a document and wrap it in a set of its own.
    pub fn build_in_document_set(config: DocumentConfig, set_position: Option<Position>) -> DocumentSet {
        DocumentSet {
            items: vec![Document::build(config)],
            position: or_unknown(set_position),
        }
    }
}

impl Map {
    pub fn build(config: MapConfig) -> Map {
        Map {
            items: config.items,
            position: or_unknown(config.position),
            comments: config.comments,
        }
    }
}

impl MapItem {
    pub fn build(config: MapItemConfig) -> MapItem {
        MapItem {
            key: config.key,
            value: config.value,
            position: or_unknown(config.position),
            comments: config.comments,
            inline_comment: config.inline_comment,
        }
    }

    /// Shorthand for an item with only a key, a value and a position.
    pub fn with_value(key: impl Into<Scalar>, value: impl Into<Node>, position: Option<Position>) -> MapItem {
        MapItem::build(MapItemConfig {
            key: key.into(),
            value: value.into(),
            position,
            ..Default::default()
        })
    }
}

impl Array {
    pub fn build(config: ArrayConfig) -> Array {
        Array {
            items: config.items,
            position: or_unknown(config.position),
            comments: config.comments,
        }
    }
}

impl ArrayItem {
    pub fn build(config: ArrayItemConfig) -> ArrayItem {
        ArrayItem {
            value: config.value,
            position: or_unknown(config.position),
            comments: config.comments,
            inline_comment: config.inline_comment,
        }
    }

    pub fn with_value(value: impl Into<Node>, position: Option<Position>) -> ArrayItem {
        ArrayItem::build(ArrayItemConfig {
            value: value.into(),
            position,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_positions_are_unknown() {
        let doc = Document::build(DocumentConfig::default());
        assert_eq!(doc.position, Position::unknown());
        assert!(doc.value.is_none());

        let item = ArrayItem::build(ArrayItemConfig::default());
        assert_eq!(item.position, Position::unknown());
        assert!(item.value.is_null());
    }

    #[test]
    fn test_build_in_document_set() {
        let set = Document::build_in_document_set(
            DocumentConfig {
                value: Some(Node::from("x")),
                position: Some(Position::new(1)),
                ..Default::default()
            },
            None,
        );

        assert_eq!(set.position, Position::unknown());
        assert_eq!(set.items.len(), 1);
        assert_eq!(set.items[0].position, Position::new(1));
        assert_eq!(set.items[0].value, Some(Node::from("x")));
    }

    #[test]
    fn test_nested_build() {
        let array = Array::build(ArrayConfig {
            items: vec![
                ArrayItem::with_value(1, Some(Position::new(2))),
                ArrayItem::with_value(2, Some(Position::new(3))),
            ],
            position: Some(Position::new(1)),
            ..Default::default()
        });
        let map = Map::build(MapConfig {
            items: vec![MapItem::with_value("ports", array.clone(), Some(Position::new(1)))],
            ..Default::default()
        });

        assert_eq!(map.get("ports").map(|i| &i.value), Some(&Node::Array(array)));
    }
}
