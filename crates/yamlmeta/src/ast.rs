//! The positioned document model.
//!
//! A [`DocumentSet`] owns its [`Document`]s, which own their values, all the
//! way down. There is no sharing between nodes: anchors and aliases are
//! resolved into independent copies while the tree is built, so every consumer
//! can walk it as a plain recursive tree.
//!
//! Positions live on the containers and items (`Map`, `MapItem`, `Array`,
//! `ArrayItem`, `Document`); a scalar's position is the position of the item
//! that holds it.

use std::fmt;
use yamlmeta_filepos::Position;

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Resolve an unquoted scalar the way the YAML 1.2 core schema does.
    ///
    /// Quoted and block scalars are always strings and never go through here.
    pub fn resolve_plain(value: &str) -> Scalar {
        match value {
            "" | "~" | "null" | "Null" | "NULL" => return Scalar::Null,
            "true" | "True" | "TRUE" => return Scalar::Bool(true),
            "false" | "False" | "FALSE" => return Scalar::Bool(false),
            ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => {
                return Scalar::Float(f64::INFINITY);
            }
            "-.inf" | "-.Inf" | "-.INF" => return Scalar::Float(f64::NEG_INFINITY),
            ".nan" | ".NaN" | ".NAN" => return Scalar::Float(f64::NAN),
            _ => {}
        }

        if let Some(i) = parse_int(value) {
            return Scalar::Int(i);
        }

        // f64::from_str also takes "inf" and "nan", which YAML treats as strings
        if looks_like_float(value)
            && let Ok(f) = value.parse::<f64>()
        {
            return Scalar::Float(f);
        }

        Scalar::String(value.to_string())
    }

    /// Name of the value's kind as reported to users.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "boolean",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

fn parse_int(value: &str) -> Option<i64> {
    let (sign, rest) = match value.as_bytes().first()? {
        b'-' => ("-", &value[1..]),
        b'+' => ("", &value[1..]),
        _ => ("", value),
    };

    let (radix, digits) = if let Some(hex) = rest.strip_prefix("0x") {
        (16, hex)
    } else if let Some(oct) = rest.strip_prefix("0o") {
        (8, oct)
    } else {
        (10, rest)
    };
    // from_str_radix would take a second sign after the prefix
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    // parsed with its sign so i64::MIN fits
    i64::from_str_radix(&format!("{sign}{digits}"), radix).ok()
}

fn looks_like_float(value: &str) -> bool {
    let body = value.strip_prefix(['-', '+']).unwrap_or(value);
    body.bytes().any(|b| b.is_ascii_digit())
        && body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'-' | b'+'))
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Int(i64::from(i))
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// A comment, with the `#` delimiter stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub data: String,
    pub position: Position,
    /// Set when at least one unrelated line separates this comment from what
    /// follows it (the next leading comment, or the node it is attached to).
    ///
    /// Nothing in this workspace reads the flag. It is kept for consumers
    /// that re-emit or move comments, such as a template evaluator. Reports
    /// find line gaps from positions instead (`Position::is_next_to`).
    pub detached: bool,
}

impl Comment {
    pub fn new(data: impl Into<String>, position: Position) -> Self {
        Self {
            data: data.into(),
            position,
            detached: false,
        }
    }

    /// Whether this comment is an annotation (`#@name args`).
    pub fn is_annotation(&self) -> bool {
        self.data.starts_with('@')
    }
}

/// Any value that can sit in a document, map item, or array item.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Map(Map),
    Array(Array),
    Scalar(Scalar),
}

impl Node {
    /// Name of the value's kind as reported to users.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Map(_) => "map",
            Node::Array(_) => "array",
            Node::Scalar(s) => s.type_name(),
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Node::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    /// Position of a collection; scalars are positioned by their holder.
    pub fn position(&self) -> Option<&Position> {
        match self {
            Node::Map(m) => Some(&m.position),
            Node::Array(a) => Some(&a.position),
            Node::Scalar(_) => None,
        }
    }

    /// Re-home a collection at `position`, leaving its descendants untouched.
    pub(crate) fn set_position(&mut self, position: Position) {
        match self {
            Node::Map(m) => m.position = position,
            Node::Array(a) => a.position = position,
            Node::Scalar(_) => {}
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Scalar(Scalar::Null)
    }
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        Node::Scalar(s)
    }
}

impl From<Map> for Node {
    fn from(m: Map) -> Self {
        Node::Map(m)
    }
}

impl From<Array> for Node {
    fn from(a: Array) -> Self {
        Node::Array(a)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(s.into())
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Scalar(i.into())
    }
}

impl From<i32> for Node {
    fn from(i: i32) -> Self {
        Node::Scalar(i.into())
    }
}

impl From<f64> for Node {
    fn from(x: f64) -> Self {
        Node::Scalar(x.into())
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(b.into())
    }
}

/// An ordered mapping. Declaration order is kept; duplicate keys are kept too.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    pub items: Vec<MapItem>,
    pub position: Position,
    pub comments: Vec<Comment>,
}

impl Map {
    /// The first item whose key is the string `key`.
    pub fn get(&self, key: &str) -> Option<&MapItem> {
        self.items.iter().find(|item| item.key.as_str() == Some(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Scalar> {
        self.items.iter().map(|item| &item.key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapItem {
    pub key: Scalar,
    pub value: Node,
    pub position: Position,
    /// Comments on the lines leading up to this item
    pub comments: Vec<Comment>,
    /// Comment on the same line as this item
    pub inline_comment: Option<Comment>,
}

impl MapItem {
    pub fn display_name(&self) -> &'static str {
        "map item"
    }

    /// Leading comments followed by the inline comment.
    pub fn all_comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().chain(self.inline_comment.iter())
    }
}

/// An ordered sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    pub items: Vec<ArrayItem>,
    pub position: Position,
    pub comments: Vec<Comment>,
}

impl Array {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayItem {
    pub value: Node,
    pub position: Position,
    pub comments: Vec<Comment>,
    pub inline_comment: Option<Comment>,
}

impl ArrayItem {
    pub fn display_name(&self) -> &'static str {
        "array item"
    }

    pub fn all_comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().chain(self.inline_comment.iter())
    }
}

/// One YAML document. `value` is `None` for an empty document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub comments: Vec<Comment>,
    pub value: Option<Node>,
    pub position: Position,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

/// Every document of one YAML stream, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentSet {
    pub items: Vec<Document>,
    pub position: Position,
}

impl DocumentSet {
    /// A set holding `items`, positioned at the unknown position.
    pub fn new(items: Vec<Document>) -> Self {
        Self {
            items,
            position: Position::unknown(),
        }
    }

    /// Documents that carry a value.
    pub fn non_empty(&self) -> impl Iterator<Item = &Document> {
        self.items.iter().filter(|doc| !doc.is_empty())
    }
}
