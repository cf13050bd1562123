//! # yamlmeta
//!
//! YAML parsing into a positioned document model.
//!
//! Every map, array, item and document carries a [`Position`]; comments are
//! kept and attached to the item they lead or trail; anchors, aliases and
//! merge keys are resolved while the tree is built.
//!
//! ## Design
//!
//! The tree is **owned and strictly hierarchical**: an alias or merge key
//! copies the subtree it names, so no two places in a tree share a node and
//! every consumer can walk it recursively without cycle checks. Nodes are
//! plain data with public fields, built either from YAML text by [`parse`],
//! from an [`Event`] stream by [`Loader`], or explicitly through the
//! configuration structs in [`builder`].
//!
//! ## Example
//!
//! ```rust
//! use yamlmeta::parse_file;
//!
//! let content = "\
//! # how many pods to run
//! replicas: 3
//! base: &base {image: app}
//! web: *base
//! ";
//!
//! let set = parse_file(content, "values.yml").unwrap();
//! let map = set.items[0].value.as_ref().unwrap().as_map().unwrap();
//!
//! let replicas = map.get("replicas").unwrap();
//! assert_eq!(replicas.comments[0].data, " how many pods to run");
//! assert_eq!(replicas.position.as_compact_string(), "values.yml:2");
//!
//! let web = map.get("web").unwrap().value.as_map().unwrap();
//! assert_eq!(web.position.line(), Some(4));
//! ```

mod ast;
pub mod builder;
mod comments;
mod error;
mod event;
mod loader;
mod parser;

pub use ast::{Array, ArrayItem, Comment, Document, DocumentSet, Map, MapItem, Node, Scalar};
pub use builder::{ArrayConfig, ArrayItemConfig, DocumentConfig, MapConfig, MapItemConfig};
pub use error::{Error, Result};
pub use event::{Event, ScalarStyle};
pub use loader::Loader;
pub use parser::{Parser, ParserOpts, parse, parse_file};
pub use yamlmeta_filepos::{Position, SourceId};
