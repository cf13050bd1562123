//! Schema type definitions
//!
//! A schema document is read as a tree of type declarations mirroring the
//! shape of the data it describes. Every type keeps the position it was
//! declared at and can produce its default value.

use yamlmeta::{
    Array, ArrayConfig, Map, MapConfig, MapItem, MapItemConfig, Node, Position, Scalar,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Map(MapType),
    MapItem(MapItemType),
    Array(ArrayType),
    ArrayItem(ArrayItemType),
    Scalar(ScalarType),
    Any(AnyType),
    Null(NullType),
}

/// A map with a fixed set of keys.
#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub items: Vec<MapItemType>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapItemType {
    pub key: Scalar,
    pub value: Box<Type>,
    pub position: Position,
}

/// An array whose elements all have the type of its one declared item.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub item: Box<ArrayItemType>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItemType {
    pub value: Box<Type>,
    pub position: Position,
}

/// A scalar whose kind is taken from its default value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarType {
    pub value: Scalar,
    pub position: Position,
}

/// Anything goes (`@schema/type any=True`).
#[derive(Debug, Clone, PartialEq)]
pub struct AnyType {
    pub default: Node,
    pub position: Position,
}

/// The wrapped type, or null (`@schema/nullable`). Defaults to null.
#[derive(Debug, Clone, PartialEq)]
pub struct NullType {
    pub inner: Box<Type>,
    pub position: Position,
}

impl Type {
    /// Where the type was declared.
    pub fn position(&self) -> &Position {
        match self {
            Type::Map(t) => &t.position,
            Type::MapItem(t) => &t.position,
            Type::Array(t) => &t.position,
            Type::ArrayItem(t) => &t.position,
            Type::Scalar(t) => &t.position,
            Type::Any(t) => &t.position,
            Type::Null(t) => &t.position,
        }
    }

    /// Name of the type itself, wrappers included.
    pub fn type_string(&self) -> &'static str {
        match self {
            Type::Map(_) => "map",
            Type::MapItem(_) => "map item",
            Type::Array(_) => "array",
            Type::ArrayItem(_) => "array item",
            Type::Scalar(t) => t.value.type_name(),
            Type::Any(_) => "any",
            Type::Null(_) => "null",
        }
    }

    /// Name of the type a value must have; item wrappers are looked through.
    pub fn value_type_string(&self) -> &'static str {
        match self {
            Type::MapItem(t) => t.value.value_type_string(),
            Type::ArrayItem(t) => t.value.value_type_string(),
            _ => self.type_string(),
        }
    }

    /// Whether `node` has the right kind for this type. Only the top level is
    /// checked; children are the validator's job.
    pub fn accepts_kind(&self, node: &Node) -> bool {
        match self {
            Type::Any(_) => true,
            Type::Null(t) => node.is_null() || t.inner.accepts_kind(node),
            Type::MapItem(t) => t.value.accepts_kind(node),
            Type::ArrayItem(t) => t.value.accepts_kind(node),
            Type::Map(_) => matches!(node, Node::Map(_)),
            Type::Array(_) => matches!(node, Node::Array(_)),
            Type::Scalar(t) => match node {
                Node::Scalar(value) => t.accepts(value),
                _ => false,
            },
        }
    }

    /// The value this type produces when data leaves it out.
    pub fn default_value(&self) -> Node {
        match self {
            Type::Map(t) => Node::Map(t.default_map()),
            Type::MapItem(t) => t.value.default_value(),
            Type::Array(t) => Node::Array(Array::build(ArrayConfig {
                position: Some(t.position.clone()),
                ..Default::default()
            })),
            Type::ArrayItem(t) => t.value.default_value(),
            Type::Scalar(t) => Node::Scalar(t.value.clone()),
            Type::Any(t) => t.default.clone(),
            Type::Null(_) => Node::default(),
        }
    }
}

impl MapType {
    pub fn item(&self, key: &Scalar) -> Option<&MapItemType> {
        self.items.iter().find(|item| &item.key == key)
    }

    /// Declared keys, as printed in messages.
    pub fn allowed_keys(&self) -> Vec<String> {
        self.items.iter().map(|item| item.key.to_string()).collect()
    }

    fn default_map(&self) -> Map {
        Map::build(MapConfig {
            items: self
                .items
                .iter()
                .map(|item| -> MapItem {
                    MapItem::build(MapItemConfig {
                        key: item.key.clone(),
                        value: item.value.default_value(),
                        position: Some(item.position.clone()),
                        ..Default::default()
                    })
                })
                .collect(),
            position: Some(self.position.clone()),
            ..Default::default()
        })
    }
}

impl ScalarType {
    /// Same kind as the declared value; integers also pass for floats.
    pub fn accepts(&self, value: &Scalar) -> bool {
        match (&self.value, value) {
            (Scalar::Float(_), Scalar::Int(_)) => true,
            (declared, given) => std::mem::discriminant(declared) == std::mem::discriminant(given),
        }
    }
}
