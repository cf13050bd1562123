use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yamlmeta::{Document, DocumentConfig, DocumentSet, Map, MapConfig, MapItem, Node, Position, Scalar};
use yamlmeta_schema::{Schema, SchemaError};

/// Validate YAML data values against a schema
#[derive(Parser, Debug)]
#[command(name = "validate-yaml")]
#[command(about = "Validate YAML data values against a schema", long_about = None)]
struct Args {
    /// Path to the YAML data values to validate
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Path to the YAML schema file
    #[arg(long, value_name = "FILE")]
    schema: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Set a top-level data value, overriding the input (repeatable)
    #[arg(long = "data-value", value_name = "KEY=VALUE")]
    data_values: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "validate_yaml=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the data was valid.
fn run() -> Result<bool> {
    let args = Args::parse();

    let schema_set = read_yaml(&args.schema, "schema.yml")?;
    let schema = match Schema::from_document_set(&schema_set) {
        Ok(schema) => schema,
        Err(err) => {
            report(&err, args.format)?;
            return Ok(false);
        }
    };

    let mut data = read_yaml(&args.input, "values.yml")?;
    for assignment in &args.data_values {
        let (key, value) = parse_assignment(assignment)?;
        set_data_value(&mut data, key, value);
    }

    match schema.validate(&data) {
        Ok(()) => {
            tracing::info!(
                input = %args.input.display(),
                schema = %args.schema.display(),
                "validation successful"
            );
            if args.format == Format::Json {
                println!("{}", serde_json::json!({ "valid": true }));
            }
            Ok(true)
        }
        Err(err) => {
            report(&err, args.format)?;
            Ok(false)
        }
    }
}

fn read_yaml(path: &Path, fallback_name: &str) -> Result<DocumentSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(fallback_name);

    yamlmeta::parse_file(&content, name)
        .with_context(|| format!("Failed to parse YAML file: {}", path.display()))
}

fn report(err: &SchemaError, format: Format) -> Result<()> {
    match format {
        Format::Text => eprint!("{}", err),
        Format::Json => println!("{}", err.to_json().context("Failed to serialize report")?),
    }
    Ok(())
}

/// Split `key=value`. The value is read as a plain YAML scalar.
fn parse_assignment(assignment: &str) -> Result<(&str, Scalar)> {
    let Some((key, value)) = assignment.split_once('=') else {
        bail!("Expected KEY=VALUE, got '{}'", assignment);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Missing key in data value '{}'", assignment);
    }
    Ok((key, Scalar::resolve_plain(value)))
}

/// Set `key` at the top level of every data document.
///
/// The item gets a from-memory position so reports show the assignment
/// itself instead of a file line.
fn set_data_value(data: &mut DocumentSet, key: &str, value: Scalar) {
    let position = Position::from_memory_key_val(key, &value, "=");
    let item = MapItem::with_value(key, value, Some(position));
    tracing::debug!(key, "overriding data value");

    if data.non_empty().next().is_none() {
        data.items.push(Document::build(DocumentConfig {
            value: Some(Node::Map(Map::build(MapConfig::default()))),
            ..Default::default()
        }));
    }

    for doc in data.items.iter_mut().filter(|doc| !doc.is_empty()) {
        let Some(Node::Map(map)) = doc.value.as_mut() else {
            continue;
        };
        let mut replaced = false;
        for existing in map.items.iter_mut().filter(|i| i.key.as_str() == Some(key)) {
            existing.value = item.value.clone();
            existing.position = item.position.clone();
            replaced = true;
        }
        if !replaced {
            map.items.push(item.clone());
        }
    }
}
