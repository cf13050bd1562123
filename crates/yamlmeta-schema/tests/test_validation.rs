use pretty_assertions::assert_eq;
use yamlmeta::{DocumentSet, Node, parse_file};
use yamlmeta_schema::{Schema, SchemaError, Type};

fn schema(content: &str) -> Schema {
    Schema::from_document_set(&parse_file(content, "schema.yml").unwrap()).unwrap()
}

fn data(content: &str) -> DocumentSet {
    parse_file(content, "data.yml").unwrap()
}

fn validate(schema_yaml: &str, data_yaml: &str) -> Result<(), SchemaError> {
    schema(schema_yaml).validate(&data(data_yaml))
}

#[test]
fn test_valid_data() {
    assert!(validate("name: app\ncount: 0\n", "name: web\ncount: 3\n").is_ok());
}

#[test]
fn test_mismatch_and_unexpected_key_report() {
    let err = validate("name: app\ncount: 0\n", "name: web\ncount: \"x\"\nnme: oops\n").unwrap_err();

    assert_eq!(
        err.to_string(),
        "
One or more data values were invalid
====================================

data.yml:
    |
  2 | count: \"x\"
    |

    = found: string
    = expected: integer (by schema.yml:2)
    = hint: is the default value set using @schema/default?

Given data value is not declared in schema
data.yml:
    |
  3 | nme: oops
    |

    = found: nme
    = expected: one of { count, name } (from schema.yml:1)
    = hint: did you mean \"name\"?

"
    );
}

#[test]
fn test_single_allowed_key_without_suggestion() {
    let err = validate("name: x\n", "other: 1\n").unwrap_err();

    assert_eq!(err.failures.len(), 1);
    assert_eq!(
        err.failures[0].expected,
        "a map item with the key named \"name\" (from schema.yml:1)"
    );
    assert!(err.failures[0].hints.is_empty());
}

#[test]
fn test_nested_map_mismatch() {
    let err = validate("app:\n  port: 80\n", "app: 3\n").unwrap_err();

    assert_eq!(err.failures[0].expected, "map (by schema.yml:1)");
    assert_eq!(err.failures[0].found, "integer");
    assert_eq!(err.failures[0].file_pos, "1");
}

#[test]
fn test_duplicate_keys_report() {
    let err = validate("name: app\ncount: 0\n", "name: a\ncount: 1\nname: b\n").unwrap_err();

    assert_eq!(
        err.to_string(),
        "
One or more data values were invalid
====================================

Duplicate key in map
data.yml:
    |
  1 | name: a
    | ...
  3 | name: b
    |

    = found: name
    = expected: each key at most once per map

"
    );
}

#[test]
fn test_empty_array_entry_report() {
    let err = validate("ports:\n- 0\n", "ports:\n- # first\n- 1\n").unwrap_err();

    assert_eq!(
        err.to_string(),
        "
One or more data values were invalid
====================================

data.yml:
    |
  2 | - # first
    |

    = found: null
    = expected: integer (by schema.yml:2)
    = hint: is the default value set using @schema/default?

"
    );
}

#[test]
fn test_schema_map_after_leading_comment_is_at_line_one() {
    let err = validate("# values\n\nname: app\n", "nme: x\n").unwrap_err();

    assert_eq!(
        err.failures[0].expected,
        "a map item with the key named \"name\" (from schema.yml:1)"
    );
}

#[test]
fn test_every_document_is_validated() {
    let err = validate("count: 0\n", "---\ncount: 1\n---\ncount: x\n").unwrap_err();

    assert_eq!(err.failures.len(), 1);
    assert_eq!(err.failures[0].file_pos, "4");
}

#[test]
fn test_integer_accepted_for_float() {
    assert!(validate("ratio: 0.5\n", "ratio: 2\n").is_ok());
    assert!(validate("ratio: 0.5\n", "ratio: two\n").is_err());
}

#[test]
fn test_invalid_schema_report() {
    let set = parse_file("name:\nports: [1, 2]\n", "schema.yml").unwrap();
    let err = Schema::from_document_set(&set).unwrap_err();

    assert_eq!(
        err.to_string(),
        "
Invalid schema
==============

null value not allowed here
schema.yml:
    |
  1 | name:
    |

    = found: null value
    = expected: non-null value
    = hint: in YAML, omitting a value implies null.
    = hint: to set the default value to null, annotate with @schema/nullable.
    = hint: to allow any value, annotate with @schema/type any=True.

wrong number of items in array definition
schema.yml:
    |
  2 | ports: [1, 2]
    |

    = found: 2 array items
    = expected: exactly 1 array item, of the desired type
    = hint: in schema, the one item of the array implies the type of its elements.
    = hint: in schema, the default value for an array is always an empty list.
    = hint: default values can be overridden via a data values overlay.

"
    );
}

const ANNOTATED_SCHEMA: &str = "\
#@schema/nullable
timeout: 30
#@schema/type any=True
extra: \"\"
tags:
- \"\"
";

#[test]
fn test_annotations() {
    let schema = schema(ANNOTATED_SCHEMA);

    assert!(
        schema
            .validate(&data("timeout: null\nextra: {a: 1}\ntags: [a, b]\n"))
            .is_ok()
    );
    assert!(schema.validate(&data("timeout: 5\n")).is_ok());

    let err = schema.validate(&data("tags: [a, 1]\n")).unwrap_err();
    assert_eq!(err.failures.len(), 1);
    assert_eq!(err.failures[0].expected, "string (by schema.yml:6)");
    assert_eq!(err.failures[0].found, "integer");
}

#[test]
fn test_annotated_types() {
    let schema = schema(ANNOTATED_SCHEMA);
    let Some(Type::Map(root)) = schema.root() else {
        panic!("expected a map type");
    };

    let types: Vec<&str> = root.items.iter().map(|item| item.value.type_string()).collect();
    assert_eq!(types, vec!["null", "any", "array"]);
}

#[test]
fn test_default_document() {
    let schema = schema(ANNOTATED_SCHEMA);
    let doc = schema.default_document();
    let map = doc.value.as_ref().and_then(|v| v.as_map()).unwrap();

    assert!(map.get("timeout").unwrap().value.is_null());
    assert_eq!(map.get("extra").unwrap().value, Node::from(""));
    assert!(map.get("tags").unwrap().value.as_array().unwrap().is_empty());
    assert_eq!(map.get("tags").unwrap().position.line(), Some(5));

    let defaults = DocumentSet::new(vec![doc]);
    assert!(schema.validate(&defaults).is_ok());
}

#[test]
fn test_unknown_type_kwarg() {
    let set = parse_file("#@schema/type foo=True\nx: 1\n", "schema.yml").unwrap();
    let err = Schema::from_document_set(&set).unwrap_err();

    assert_eq!(err.failures.len(), 1);
    let failure = &err.failures[0];
    assert_eq!(failure.description, "unknown @schema/type annotation keyword argument");
    assert_eq!(failure.found, "foo");
    assert_eq!(failure.expected, "A valid kwarg");
    assert_eq!(failure.hints, vec!["Supported kwargs are 'any'".to_string()]);

    let labels: Vec<(&str, bool)> = failure
        .positions
        .iter()
        .map(|info| (info.pos.as_str(), info.skip_lines))
        .collect();
    assert_eq!(labels, vec![("1", false), ("2", false)]);
}

#[test]
fn test_json_report() {
    let err = validate("count: 0\n", "count: x\n").unwrap_err();
    let json: serde_json::Value = serde_json::from_str(&err.to_json().unwrap()).unwrap();

    assert_eq!(json["summary"], "One or more data values were invalid");
    assert_eq!(json["failures"][0]["found"], "string");
    assert_eq!(json["failures"][0]["positions"][0]["pos"], "1");
}
