// Data validation against schema types

use crate::error::{SchemaAssertion, ValidationError};
use crate::spell;
use crate::types::{MapType, Type};
use std::collections::HashMap;
use yamlmeta::{Map, Node, Position};

/// Validate `node`, held at `position`, against `ty`.
///
/// Every problem is collected; siblings are still checked after a failure.
pub fn validate_node(node: &Node, position: &Position, ty: &Type) -> Vec<ValidationError> {
    let mut context = ValidationContext::new();
    context.check(node, position, ty);
    tracing::debug!(failures = context.errors.len(), "validated document");
    context.into_errors()
}

/// Collects failures during one walk of a document.
#[derive(Debug, Default)]
pub struct ValidationContext {
    errors: Vec<ValidationError>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: impl Into<ValidationError>) {
        self.errors.push(error.into());
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    pub fn check(&mut self, node: &Node, position: &Position, ty: &Type) {
        if !ty.accepts_kind(node) {
            self.add_error(mismatched_type(node, position, ty));
            return;
        }

        match ty {
            Type::Any(_) => {}
            Type::Null(t) => {
                if !node.is_null() {
                    self.check(node, position, &t.inner);
                }
            }
            Type::MapItem(t) => self.check(node, position, &t.value),
            Type::ArrayItem(t) => self.check(node, position, &t.value),
            Type::Map(t) => {
                if let Node::Map(map) = node {
                    self.check_map(map, t);
                }
            }
            Type::Array(t) => {
                if let Node::Array(array) = node {
                    for item in &array.items {
                        self.check(&item.value, &item.position, &t.item.value);
                    }
                }
            }
            Type::Scalar(_) => {}
        }
    }

    fn check_map(&mut self, map: &Map, ty: &MapType) {
        let mut seen: HashMap<String, &Position> = HashMap::new();

        for item in &map.items {
            let key = item.key.to_string();
            if let Some(first) = seen.get(key.as_str()) {
                self.add_error(
                    SchemaAssertion::new(item.position.clone(), "each key at most once per map", key.clone())
                        .with_description("Duplicate key in map")
                        .with_annotation_position((*first).clone()),
                );
            } else {
                seen.insert(key.clone(), &item.position);
            }

            match ty.item(&item.key) {
                Some(item_type) => self.check(&item.value, &item.position, &item_type.value),
                None => self.add_error(unexpected_key(&key, item.display_name(), &item.position, ty)),
            }
        }
    }
}

fn mismatched_type(node: &Node, position: &Position, ty: &Type) -> SchemaAssertion {
    let declared = ty.position();
    let expected = if declared.is_known() {
        format!("{} (by {})", ty.value_type_string(), declared.as_compact_string())
    } else {
        ty.value_type_string().to_string()
    };

    SchemaAssertion::new(position.clone(), expected, node.type_name())
        .with_hint("is the default value set using @schema/default?")
}

fn unexpected_key(key: &str, display_name: &str, position: &Position, ty: &MapType) -> SchemaAssertion {
    let mut allowed = ty.allowed_keys();
    allowed.sort();
    let definition = ty.position.as_compact_string();

    let expected = match allowed.len() {
        1 => format!(
            "a {} with the key named \"{}\" (from {})",
            display_name, allowed[0], definition
        ),
        // few enough to read at a glance
        2..=9 => format!("one of {{ {} }} (from {})", allowed.join(", "), definition),
        _ => format!("a key declared in map (from {})", definition),
    };

    let mut assertion = SchemaAssertion::new(position.clone(), expected, key)
        .with_description("Given data value is not declared in schema");
    if let Some(similar) = spell::nearest(key, &allowed) {
        assertion = assertion.with_hint(format!("did you mean \"{}\"?", similar));
    }
    assertion
}
