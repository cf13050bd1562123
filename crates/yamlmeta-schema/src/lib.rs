//! # yamlmeta-schema
//!
//! Schema typing, data validation, and error reports for [`yamlmeta`]
//! documents.
//!
//! A schema is an ordinary YAML document: every value declares a type of its
//! own kind, with itself as the default. Data that does not fit is reported
//! with the offending lines of both files.
//!
//! ## Example
//!
//! ```rust
//! use yamlmeta::parse_file;
//! use yamlmeta_schema::Schema;
//!
//! let schema = parse_file("replicas: 1\nname: app\n", "schema.yml").unwrap();
//! let schema = Schema::from_document_set(&schema).unwrap();
//!
//! let data = parse_file("replicas: many\n", "values.yml").unwrap();
//! let err = schema.validate(&data).unwrap_err();
//!
//! assert_eq!(err.failures[0].expected, "integer (by schema.yml:1)");
//! assert_eq!(err.failures[0].found, "string");
//! ```

mod error;
mod report;
mod schema;
mod spell;
mod types;
mod validator;

pub use error::{
    AssertionFailure, CALCULATED_SOURCE_NAME, PosInfo, SchemaAssertion, SchemaError, ValidationError,
    create_pos_info,
};
pub use report::render_report;
pub use schema::{INVALID_DATA_SUMMARY, INVALID_SCHEMA_SUMMARY, Schema, validate_document};
pub use spell::nearest;
pub use types::{AnyType, ArrayItemType, ArrayType, MapItemType, MapType, NullType, ScalarType, Type};
pub use validator::{ValidationContext, validate_node};
