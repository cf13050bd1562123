//! Error types for building positioned YAML trees.

use thiserror::Error;

/// Result type alias for yamlmeta operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort construction of a document set.
///
/// All variants are syntax-class failures tied to a line of input. They are
/// never mixed with schema assertion failures, which are collected separately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed YAML reported by the tokenizer
    #[error("yaml: line {line}: {message}")]
    Syntax { line: u32, message: String },

    /// An alias or merge key names an anchor not declared earlier in the document
    #[error("yaml: line {line}: unknown anchor '{name}' referenced")]
    UnknownAnchor { name: String, line: u32 },

    /// A merge key (`<<`) whose value is not a map or a sequence of maps
    #[error("yaml: line {line}: map merge requires map or sequence of maps as the value")]
    InvalidMerge { line: u32 },

    /// The event stream itself is inconsistent (an end without a start, a
    /// value with nowhere to go)
    #[error("yaml: line {line}: invalid event stream: {message}")]
    InvalidStructure { line: u32, message: String },
}

impl Error {
    /// The line the failure was reported at.
    pub fn line(&self) -> u32 {
        match self {
            Error::Syntax { line, .. }
            | Error::UnknownAnchor { line, .. }
            | Error::InvalidMerge { line }
            | Error::InvalidStructure { line, .. } => *line,
        }
    }
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        Error::Syntax {
            line: u32::try_from(err.marker().line()).unwrap_or(u32::MAX),
            message: err.info().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = Error::Syntax {
            line: 4,
            message: "found character that cannot start any token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "yaml: line 4: found character that cannot start any token"
        );
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn test_unknown_anchor_display() {
        let err = Error::UnknownAnchor {
            name: "base".to_string(),
            line: 9,
        };
        assert_eq!(err.to_string(), "yaml: line 9: unknown anchor 'base' referenced");
    }
}
