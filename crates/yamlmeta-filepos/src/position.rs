//! Line-based source positions.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Where a piece of YAML came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceId {
    /// Input that did not come from a named file (a string, stdin, a test fixture)
    InMemory,
    /// A named file
    File(String),
}

impl SourceId {
    /// Name used when a report introduces a block of lines from this source.
    pub fn display_name(&self) -> &str {
        match self {
            SourceId::InMemory => "(in-memory)",
            SourceId::File(name) => name,
        }
    }
}

impl From<&str> for SourceId {
    /// An empty name means the input had no file behind it.
    fn from(name: &str) -> Self {
        if name.is_empty() {
            SourceId::InMemory
        } else {
            SourceId::File(name.to_string())
        }
    }
}

/// A 1-based line in a source, or the "unknown" sentinel.
///
/// Equality, ordering and hashing consider the line, the source and the
/// `from_memory` flag. The quoted source text is metadata: two positions that
/// point at the same line are equal whether or not the text was captured.
///
/// Ordering is by line first; unknown positions sort before every known one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    source: SourceId,
    line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default)]
    from_memory: bool,
}

impl Position {
    /// The sentinel for nodes that were never given a position.
    pub fn unknown() -> Self {
        Self {
            source: SourceId::InMemory,
            line: None,
            text: None,
            from_memory: false,
        }
    }

    /// A known line in in-memory input.
    pub fn new(line: u32) -> Self {
        Self {
            source: SourceId::InMemory,
            line: Some(line),
            text: None,
            from_memory: false,
        }
    }

    /// A known line in a named file.
    pub fn in_file(file: impl Into<String>, line: u32) -> Self {
        Self {
            source: SourceId::File(file.into()),
            line: Some(line),
            text: None,
            from_memory: false,
        }
    }

    /// A synthetic position for a value that was calculated rather than read.
    ///
    /// The line is unknown; the quoted text is `key`, `sep` and `value` joined,
    /// which is what a report shows in place of a source line.
    pub fn from_memory_key_val(key: impl fmt::Display, value: impl fmt::Display, sep: &str) -> Self {
        Self {
            source: SourceId::InMemory,
            line: None,
            text: Some(format!("{}{}{}", key, sep, value)),
            from_memory: true,
        }
    }

    /// Attach the raw text of the source line.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Replace the source this position refers to.
    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = source;
        self
    }

    pub fn source(&self) -> &SourceId {
        &self.source
    }

    /// The 1-based line, or `None` for unknown positions.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn is_known(&self) -> bool {
        self.line.is_some()
    }

    pub fn is_from_memory(&self) -> bool {
        self.from_memory
    }

    /// Name of the file, or the in-memory marker.
    pub fn file_name(&self) -> &str {
        self.source.display_name()
    }

    /// The quoted source line; empty when none was captured.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// True iff both positions are known, in the same source, and exactly one
    /// line apart.
    pub fn is_next_to(&self, other: &Position) -> bool {
        match (self.line, other.line) {
            (Some(a), Some(b)) if self.source == other.source => a.abs_diff(b) == 1,
            _ => false,
        }
    }

    /// `file:line`, just `line` for in-memory input, or `?` when unknown.
    pub fn as_compact_string(&self) -> String {
        match (self.line, &self.source) {
            (None, _) => "?".to_string(),
            (Some(line), SourceId::InMemory) => line.to_string(),
            (Some(line), SourceId::File(file)) => format!("{}:{}", file, line),
        }
    }

    /// The line number alone, or `?` when unknown.
    pub fn as_int_string(&self) -> String {
        match self.line {
            Some(line) => line.to_string(),
            None => "?".to_string(),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.as_compact_string())
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
            && self.source == other.source
            && self.from_memory == other.from_memory
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.line.hash(state);
        self.source.hash(state);
        self.from_memory.hash(state);
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        // Option orders None first, which puts unknown positions ahead
        self.line
            .cmp(&other.line)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.from_memory.cmp(&other.from_memory))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_position() {
        let pos = Position::unknown();
        assert!(!pos.is_known());
        assert_eq!(pos.line(), None);
        assert_eq!(pos.as_int_string(), "?");
        assert_eq!(pos.as_compact_string(), "?");
        assert_eq!(pos, Position::default());
    }

    #[test]
    fn test_compact_strings() {
        assert_eq!(Position::new(7).as_compact_string(), "7");
        assert_eq!(Position::in_file("schema.yml", 3).as_compact_string(), "schema.yml:3");
        assert_eq!(Position::in_file("data.yml", 1).to_string(), "line data.yml:1");
    }

    #[test]
    fn test_is_next_to() {
        let two = Position::new(2);
        assert!(two.is_next_to(&Position::new(1)));
        assert!(two.is_next_to(&Position::new(3)));
        assert!(!two.is_next_to(&Position::new(2)));
        assert!(!two.is_next_to(&Position::new(5)));
        assert!(!two.is_next_to(&Position::unknown()));
        assert!(!Position::unknown().is_next_to(&Position::unknown()));
    }

    #[test]
    fn test_is_next_to_requires_same_source() {
        let a = Position::in_file("a.yml", 4);
        let b = Position::in_file("b.yml", 5);
        assert!(!a.is_next_to(&b));
        assert!(a.is_next_to(&Position::in_file("a.yml", 5)));
    }

    #[test]
    fn test_ordering_puts_unknown_first() {
        let mut positions = vec![Position::new(5), Position::unknown(), Position::new(2)];
        positions.sort();
        assert_eq!(
            positions,
            vec![Position::unknown(), Position::new(2), Position::new(5)]
        );
    }

    #[test]
    fn test_text_is_not_part_of_equality() {
        let bare = Position::in_file("data.yml", 3);
        let quoted = Position::in_file("data.yml", 3).with_text("key: value");
        assert_eq!(bare, quoted);
        assert_eq!(quoted.text(), "key: value");
        assert_eq!(bare.text(), "");
    }

    #[test]
    fn test_from_memory_key_val() {
        let pos = Position::from_memory_key_val("replicas", 3, ": ");
        assert!(pos.is_from_memory());
        assert!(!pos.is_known());
        assert_eq!(pos.text(), "replicas: 3");
        assert_ne!(pos, Position::unknown());
    }

    #[test]
    fn test_source_id_from_name() {
        assert_eq!(SourceId::from(""), SourceId::InMemory);
        assert_eq!(SourceId::from("x.yml"), SourceId::File("x.yml".to_string()));
        assert_eq!(Position::new(1).file_name(), "(in-memory)");
    }

    #[test]
    fn test_serialization_round_trip() {
        let pos = Position::in_file("data.yml", 12).with_text("a: 1");
        let json = serde_json::to_string(&pos).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, back);
        assert_eq!(back.text(), "a: 1");
    }
}
