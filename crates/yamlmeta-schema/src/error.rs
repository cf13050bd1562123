// Error types for schema construction and validation

use crate::report::render_report;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use yamlmeta_filepos::Position;

/// Source name shown in place of a file for values that were calculated
/// rather than read.
pub const CALCULATED_SOURCE_NAME: &str = "Data value calculated";

/// A structured mismatch between data (or a schema) and what was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaAssertion {
    /// Where the offending node is
    pub position: Position,
    /// Related positions shown in the same hunk (annotations, earlier keys)
    pub annotation_positions: Vec<Position>,
    pub description: String,
    pub expected: String,
    pub found: String,
    pub hints: Vec<String>,
}

impl SchemaAssertion {
    pub fn new(position: Position, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            position,
            annotation_positions: Vec::new(),
            description: String::new(),
            expected: expected.into(),
            found: found.into(),
            hints: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn with_annotation_position(mut self, position: Position) -> Self {
        self.annotation_positions.push(position);
        self
    }
}

impl fmt::Display for SchemaAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.description.is_empty() {
            write!(f, "{}: ", self.description)?;
        }
        write!(
            f,
            "found {}, expected {} ({})",
            self.found, self.expected, self.position
        )
    }
}

/// One problem found while building a schema or validating data.
///
/// Whether a problem is structured is decided when it is created; the report
/// renders assertions as hunks and appends every other message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    Assertion(SchemaAssertion),

    #[error("{message}")]
    Other { message: String },
}

impl ValidationError {
    pub fn other(message: impl Into<String>) -> Self {
        ValidationError::Other {
            message: message.into(),
        }
    }
}

impl From<SchemaAssertion> for ValidationError {
    fn from(assertion: SchemaAssertion) -> Self {
        ValidationError::Assertion(assertion)
    }
}

/// One line of a hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosInfo {
    /// Line label (`as_int_string`)
    pub pos: String,
    /// Raw source line
    pub source: String,
    /// Whether lines were skipped between this entry and the previous one
    pub skip_lines: bool,
}

/// An assertion flattened into exactly what the report prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionFailure {
    pub description: String,
    pub file_name: String,
    pub positions: Vec<PosInfo>,
    /// Source text of a calculated value
    pub source: String,
    pub file_pos: String,
    pub from_memory: bool,
    pub source_name: String,
    pub expected: String,
    pub found: String,
    pub hints: Vec<String>,
}

impl From<&SchemaAssertion> for AssertionFailure {
    fn from(assertion: &SchemaAssertion) -> Self {
        let position = &assertion.position;
        Self {
            description: assertion.description.clone(),
            file_name: position.file_name().to_string(),
            positions: create_pos_info(&assertion.annotation_positions, position),
            source: position.text().to_string(),
            file_pos: position.as_int_string(),
            from_memory: position.is_from_memory(),
            source_name: CALCULATED_SOURCE_NAME.to_string(),
            expected: assertion.expected.clone(),
            found: assertion.found.clone(),
            hints: assertion.hints.clone(),
        }
    }
}

/// Order the lines of one hunk.
///
/// Annotation positions are sorted by line (stable, unknown first) and the
/// node's own position goes last. Every entry that does not sit on the line
/// right after its predecessor is marked as skipping lines.
pub fn create_pos_info(annotations: &[Position], node: &Position) -> Vec<PosInfo> {
    let mut ordered: Vec<&Position> = annotations.iter().collect();
    ordered.sort_by_key(|p| p.line());
    ordered.push(node);

    ordered
        .iter()
        .enumerate()
        .map(|(idx, position)| PosInfo {
            pos: position.as_int_string(),
            source: position.text().to_string(),
            skip_lines: idx > 0 && !position.is_next_to(ordered[idx - 1]),
        })
        .collect()
}

/// Every problem of one run, rendered as a single report by `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaError {
    pub summary: String,
    pub failures: Vec<AssertionFailure>,
    /// Messages of errors that are not assertions, in order
    pub misc: Vec<String>,
}

impl SchemaError {
    pub fn new(summary: impl Into<String>, errors: impl IntoIterator<Item = ValidationError>) -> Self {
        let mut failures = Vec::new();
        let mut misc = Vec::new();
        for error in errors {
            match error {
                ValidationError::Assertion(assertion) => failures.push(AssertionFailure::from(&assertion)),
                ValidationError::Other { message } => misc.push(message),
            }
        }

        Self {
            summary: summary.into(),
            failures,
            misc,
        }
    }

    /// Number of problems, structured or not.
    pub fn len(&self) -> usize {
        self.failures.len() + self.misc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_report(&self.summary, &self.failures, &self.misc))
    }
}

impl std::error::Error for SchemaError {}
