//! Source positions for yamlmeta
//!
//! Every node of a positioned YAML tree carries a [`Position`]: the source it
//! came from (a named file, or in-memory input) and a 1-based line number.
//! Positions are ordered by line, can tell whether they sit on adjacent lines,
//! and keep a copy of the raw source line so diagnostics can quote it without
//! going back to the file.
//!
//! # Example
//!
//! ```rust
//! use yamlmeta_filepos::Position;
//!
//! let key = Position::in_file("data.yml", 3).with_text("  count: x");
//! let next = Position::in_file("data.yml", 4);
//!
//! assert!(key.is_next_to(&next));
//! assert_eq!(key.to_string(), "line data.yml:3");
//! assert_eq!(key.as_int_string(), "3");
//! ```

mod position;

pub use position::{Position, SourceId};
