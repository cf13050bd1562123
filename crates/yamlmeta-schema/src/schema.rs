//! Reading a schema document into types.
//!
//! Each value in the schema declares a type whose kind is the value's kind
//! and whose default is the value itself. Annotations in an item's comments
//! adjust that:
//!
//! - `#@schema/nullable` also allows null, and makes null the default;
//! - `#@schema/type any=True` allows any value.
//!
//! Problems are collected rather than returned one at a time, so a single
//! report lists everything wrong with the schema.

use crate::error::{SchemaAssertion, SchemaError, ValidationError};
use crate::types::{AnyType, ArrayItemType, ArrayType, MapItemType, MapType, NullType, ScalarType, Type};
use crate::validator::validate_node;
use yamlmeta::{Comment, Document, DocumentConfig, DocumentSet, Node, Position, Scalar};

pub const INVALID_SCHEMA_SUMMARY: &str = "Invalid schema";
pub const INVALID_DATA_SUMMARY: &str = "One or more data values were invalid";

const ANNOTATION_NULLABLE: &str = "schema/nullable";
const ANNOTATION_TYPE: &str = "schema/type";

/// Types declared by one schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: Option<Type>,
    position: Position,
}

impl Schema {
    /// Read the first document of `set`.
    ///
    /// An empty schema document declares nothing, and accepts any data.
    pub fn from_document_set(set: &DocumentSet) -> Result<Schema, SchemaError> {
        let Some(doc) = set.items.first() else {
            return Ok(Schema {
                root: None,
                position: set.position.clone(),
            });
        };

        let mut builder = TypeBuilder::default();
        let root = doc
            .value
            .as_ref()
            .map(|value| builder.type_of(value, &doc.position));

        if !builder.errors.is_empty() {
            tracing::debug!(errors = builder.errors.len(), "schema rejected");
            return Err(SchemaError::new(INVALID_SCHEMA_SUMMARY, builder.errors));
        }

        Ok(Schema {
            root,
            position: doc.position.clone(),
        })
    }

    pub fn root(&self) -> Option<&Type> {
        self.root.as_ref()
    }

    /// Check every non-empty document of `data`.
    pub fn validate(&self, data: &DocumentSet) -> Result<(), SchemaError> {
        let Some(root) = &self.root else {
            return Ok(());
        };

        let mut errors = Vec::new();
        for doc in data.non_empty() {
            errors.extend(validate_document(doc, root));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::new(INVALID_DATA_SUMMARY, errors))
        }
    }

    /// The data this schema produces when nothing is given.
    pub fn default_document(&self) -> Document {
        let value = self
            .root
            .as_ref()
            .map(Type::default_value)
            .filter(|value| !value.is_null());

        Document::build(DocumentConfig {
            value,
            position: Some(self.position.clone()),
            ..Default::default()
        })
    }
}

/// Check one document against `root`.
pub fn validate_document(doc: &Document, root: &Type) -> Vec<ValidationError> {
    match &doc.value {
        Some(value) => validate_node(value, &doc.position, root),
        None => Vec::new(),
    }
}

#[derive(Debug, Default, PartialEq)]
struct Annotations {
    nullable: bool,
    any: bool,
}

#[derive(Default)]
struct TypeBuilder {
    errors: Vec<ValidationError>,
}

impl TypeBuilder {
    fn type_of(&mut self, node: &Node, position: &Position) -> Type {
        match node {
            Node::Map(map) => Type::Map(MapType {
                items: map.items.iter().map(|item| self.map_item_type(item)).collect(),
                position: position.clone(),
            }),
            Node::Array(array) => {
                if array.items.len() != 1 {
                    self.errors.push(wrong_item_count(position, array.items.len()));
                }
                let item = match array.items.first() {
                    Some(item) => {
                        let annotations = self.annotations(item.all_comments(), &item.position);
                        ArrayItemType {
                            value: Box::new(self.annotated_type(&item.value, &item.position, &annotations)),
                            position: item.position.clone(),
                        }
                    }
                    None => ArrayItemType {
                        value: Box::new(Type::Any(AnyType {
                            default: Node::default(),
                            position: position.clone(),
                        })),
                        position: position.clone(),
                    },
                };
                Type::Array(ArrayType {
                    item: Box::new(item),
                    position: position.clone(),
                })
            }
            Node::Scalar(Scalar::Null) => {
                self.errors.push(null_not_allowed(position));
                Type::Any(AnyType {
                    default: Node::default(),
                    position: position.clone(),
                })
            }
            Node::Scalar(value) => Type::Scalar(ScalarType {
                value: value.clone(),
                position: position.clone(),
            }),
        }
    }

    fn map_item_type(&mut self, item: &yamlmeta::MapItem) -> MapItemType {
        let annotations = self.annotations(item.all_comments(), &item.position);
        MapItemType {
            key: item.key.clone(),
            value: Box::new(self.annotated_type(&item.value, &item.position, &annotations)),
            position: item.position.clone(),
        }
    }

    fn annotated_type(&mut self, value: &Node, position: &Position, annotations: &Annotations) -> Type {
        if annotations.any {
            return Type::Any(AnyType {
                default: value.clone(),
                position: position.clone(),
            });
        }

        let inner = self.type_of(value, position);
        if annotations.nullable {
            Type::Null(NullType {
                inner: Box::new(inner),
                position: position.clone(),
            })
        } else {
            inner
        }
    }

    fn annotations<'a>(
        &mut self,
        comments: impl Iterator<Item = &'a Comment>,
        node_position: &Position,
    ) -> Annotations {
        let mut result = Annotations::default();

        for comment in comments.filter(|c| c.is_annotation()) {
            let (name, kwargs) = parse_annotation(&comment.data);
            match name {
                ANNOTATION_NULLABLE => result.nullable = true,
                ANNOTATION_TYPE => {
                    for (key, value) in kwargs {
                        match (key, value) {
                            ("any", "True") => result.any = true,
                            ("any", "False") => result.any = false,
                            ("any", other) => self.errors.push(
                                SchemaAssertion::new(node_position.clone(), "True or False", other)
                                    .with_description("invalid value for @schema/type keyword argument 'any'")
                                    .with_annotation_position(comment.position.clone())
                                    .into(),
                            ),
                            (other, _) => self.errors.push(
                                SchemaAssertion::new(node_position.clone(), "A valid kwarg", other)
                                    .with_description("unknown @schema/type annotation keyword argument")
                                    .with_annotation_position(comment.position.clone())
                                    .with_hint("Supported kwargs are 'any'")
                                    .into(),
                            ),
                        }
                    }
                }
                // annotations of other libraries
                _ => {}
            }
        }

        result
    }
}

/// Split `@name k1=v1, k2=v2` into the name and its keyword arguments.
fn parse_annotation(data: &str) -> (&str, Vec<(&str, &str)>) {
    let body = data.trim_start_matches('@').trim();
    let (name, args) = match body.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args),
        None => (body, ""),
    };

    let kwargs = args
        .split(',')
        .filter_map(|arg| arg.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect();

    (name, kwargs)
}

fn wrong_item_count(position: &Position, count: usize) -> ValidationError {
    SchemaAssertion::new(
        position.clone(),
        "exactly 1 array item, of the desired type",
        format!("{} array items", count),
    )
    .with_description("wrong number of items in array definition")
    .with_hint("in schema, the one item of the array implies the type of its elements.")
    .with_hint("in schema, the default value for an array is always an empty list.")
    .with_hint("default values can be overridden via a data values overlay.")
    .into()
}

fn null_not_allowed(position: &Position) -> ValidationError {
    SchemaAssertion::new(position.clone(), "non-null value", "null value")
        .with_description("null value not allowed here")
        .with_hint("in YAML, omitting a value implies null.")
        .with_hint("to set the default value to null, annotate with @schema/nullable.")
        .with_hint("to allow any value, annotate with @schema/type any=True.")
        .into()
}
