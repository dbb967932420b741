//! Turns a raw rule tree (mappings and lists decoded from YAML or JSON) into
//! a validated [`Level`] tree. Nothing is repaired: the first problem found
//! aborts validation of the whole instruction.

use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::trace;

use crate::grammar::{Entry, Level, Operation, TagPath, CATCH, DO, MAX_ITEMS};

type Result<T> = std::result::Result<T, InstructionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The rule is not shaped as a mapping of tag names to entry lists.
    Structure,
    /// A directive value has the wrong primitive type.
    Type,
    /// A directive value has the right type but is not allowed.
    Value,
    /// A leaf level has no `do` directive.
    MissingDirective,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstructionError {
    #[error("Structure error at {path}: {message}")]
    StructureError { path: TagPath, message: String },

    #[error("Type error at {path}: {message}")]
    TypeError { path: TagPath, message: String },

    #[error("Value error at {path}: {message}")]
    ValueError { path: TagPath, message: String },

    #[error("Missing `do` directive in leaf level {path}")]
    MissingDirectiveError { path: TagPath },
}

impl InstructionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InstructionError::StructureError { .. } => ErrorKind::Structure,
            InstructionError::TypeError { .. } => ErrorKind::Type,
            InstructionError::ValueError { .. } => ErrorKind::Value,
            InstructionError::MissingDirectiveError { .. } => ErrorKind::MissingDirective,
        }
    }

    pub fn path(&self) -> &TagPath {
        match self {
            InstructionError::StructureError { path, .. }
            | InstructionError::TypeError { path, .. }
            | InstructionError::ValueError { path, .. }
            | InstructionError::MissingDirectiveError { path } => path,
        }
    }
}

fn structure(path: &TagPath, message: impl Into<String>) -> InstructionError {
    InstructionError::StructureError {
        path: path.clone(),
        message: message.into(),
    }
}

/// Validates a whole instruction: a mapping with exactly one key, the root
/// tag name, mapped to its list of entries.
pub fn validate(source: &Value) -> Result<Level> {
    let root = TagPath::default();
    let mapping = match source {
        Value::Mapping(mapping) => mapping,
        Value::Sequence(_) => return Err(structure(&root, "entry missing mapping")),
        other => {
            return Err(structure(
                &root,
                format!("instruction must be a mapping, got {}", describe(other)),
            ))
        }
    };
    let (key, value) = single_pair(mapping, &root)?;
    let tag = tag_name(key, &root)?;
    let path = TagPath::root(&tag);
    level(tag, value, &path)
}

fn single_pair<'a>(mapping: &'a Mapping, path: &TagPath) -> Result<(&'a Value, &'a Value)> {
    let mut pairs = mapping.iter();
    match (pairs.next(), pairs.next()) {
        (Some(pair), None) => Ok(pair),
        (None, _) => Err(structure(path, "instruction mapping is empty")),
        (Some(_), Some(_)) => Err(structure(
            path,
            format!(
                "instruction mapping must hold exactly one tag name, found {}",
                mapping.len()
            ),
        )),
    }
}

fn tag_name(key: &Value, path: &TagPath) -> Result<String> {
    match key {
        Value::String(name) if !name.trim().is_empty() => Ok(name.clone()),
        Value::String(_) => Err(structure(path, "tag name must not be empty")),
        other => Err(structure(
            path,
            format!("tag name must be a string, got {}", describe(other)),
        )),
    }
}

fn level(tag: String, value: &Value, path: &TagPath) -> Result<Level> {
    let items = match value {
        Value::Sequence(items) => items,
        other => {
            return Err(structure(
                path,
                format!("level `{}` must map to a list of entries, got {}", tag, describe(other)),
            ))
        }
    };

    let mut entries: Vec<Entry> = vec![];
    for item in items {
        let mapping = match item {
            Value::Mapping(mapping) if !mapping.is_empty() => mapping,
            Value::Mapping(_) => return Err(structure(path, "entry mapping is empty")),
            _ => return Err(structure(path, "entry missing mapping")),
        };
        for (key, value) in mapping {
            entries.push(entry(key, value, path)?);
        }
    }

    let is_leaf = !entries.iter().any(Entry::is_nested);
    if is_leaf && !entries.iter().any(|e| matches!(e, Entry::Do(_))) {
        return Err(InstructionError::MissingDirectiveError { path: path.clone() });
    }
    trace!(path = %path, entries = entries.len(), "validated level");

    Ok(Level {
        tag_name: tag,
        entries,
    })
}

fn entry(key: &Value, value: &Value, path: &TagPath) -> Result<Entry> {
    let name = tag_name(key, path)?;
    match name.as_str() {
        MAX_ITEMS => max_items(value, path).map(Entry::MaxItems),
        DO => operation(value, path).map(Entry::Do),
        _ => match value {
            Value::Sequence(_) => {
                let nested = path.child(&name);
                level(name, value, &nested).map(Entry::Nested)
            }
            Value::String(text) => Ok(Entry::AttributeFilter {
                name,
                value: text.clone(),
            }),
            Value::Number(number) => Ok(Entry::AttributeFilter {
                name,
                value: number.to_string(),
            }),
            Value::Bool(flag) => Ok(Entry::AttributeFilter {
                name,
                value: flag.to_string(),
            }),
            other => Err(structure(
                path,
                format!(
                    "`{}` must be an attribute value or a list of entries, got {}",
                    name,
                    describe(other)
                ),
            )),
        },
    }
}

fn max_items(value: &Value, path: &TagPath) -> Result<u64> {
    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                Ok(n)
            } else if let Some(n) = number.as_i64() {
                Err(InstructionError::ValueError {
                    path: path.clone(),
                    message: format!("`{}` must not be negative, got {}", MAX_ITEMS, n),
                })
            } else {
                Err(InstructionError::TypeError {
                    path: path.clone(),
                    message: format!("`{}` must be an integer, got {}", MAX_ITEMS, number),
                })
            }
        }
        other => Err(InstructionError::TypeError {
            path: path.clone(),
            message: format!("`{}` must be an integer, got {}", MAX_ITEMS, describe(other)),
        }),
    }
}

fn operation(value: &Value, path: &TagPath) -> Result<Operation> {
    match value {
        Value::String(op) if op == CATCH => Ok(Operation::Catch),
        Value::String(op) => Err(InstructionError::ValueError {
            path: path.clone(),
            message: format!("unsupported operation `{}`", op),
        }),
        other => Err(InstructionError::ValueError {
            path: path.clone(),
            message: format!("unsupported operation {}", describe(other)),
        }),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
