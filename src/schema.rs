//! # Record Shapes
//!
//! Declarative description of what a stored record looks like: field names,
//! field kinds, required-ness and default visibility.
//!
//! The store never trusts incoming data. Every write is turned into a
//! [`Document`] and run through [`validate_document`], which casts scalar
//! values, drops fields the model does not declare and reports every missing
//! or mistyped path in a single [`ValidationError`].

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::RecordId;

/// Loosely-typed record body as it travels into the store.
pub type Document = Map<String, Value>;

/// Storage type of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Reference to another record by [`RecordId`].
    ObjectId,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => f.write_str("string"),
            FieldKind::ObjectId => f.write_str("ObjectId"),
        }
    }
}

/// Declaration of one field of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Whether default reads return this field.
    pub select: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true, select: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false, select: true }
    }

    /// Excludes the field from default reads.
    pub const fn hidden(self) -> Self {
        Self { select: false, ..self }
    }
}

/// A named record shape registered with the store.
pub trait Model {
    /// Logical name the model is registered under.
    const NAME: &'static str;
    const FIELDS: &'static [FieldSpec];
}

// =============================================================================
// PROJECTION
// =============================================================================

/// Which fields a read returns.
///
/// The default projection returns every field declared with `select: true`.
/// Hidden fields come back only when named explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    include: Vec<String>,
}

impl Projection {
    pub fn including(field: impl Into<String>) -> Self {
        Self::default().and(field)
    }

    pub fn and(mut self, field: impl Into<String>) -> Self {
        self.include.push(field.into());
        self
    }

    /// Parses a select string such as `"+password"`.
    ///
    /// Only `+field` tokens carry meaning here; anything else is ignored.
    pub fn parse(select: &str) -> Self {
        select
            .split_whitespace()
            .filter_map(|token| token.strip_prefix('+'))
            .filter(|field| !field.is_empty())
            .fold(Self::default(), Self::and)
    }

    pub fn includes(&self, field: &str) -> bool {
        self.include.iter().any(|name| name == field)
    }

    /// Hidden fields of `M` that this projection leaves out.
    pub fn omitted<M: Model>(&self) -> impl Iterator<Item = &'static str> + '_ {
        M::FIELDS
            .iter()
            .filter(move |field| !field.select && !self.includes(field.name))
            .map(|field| field.name)
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// A single failing path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required { path: &'static str },
    Cast { path: &'static str, expected: FieldKind },
}

impl FieldError {
    pub fn path(&self) -> &'static str {
        match self {
            FieldError::Required { path } | FieldError::Cast { path, .. } => path,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required { path } => write!(f, "Path `{path}` is required."),
            FieldError::Cast { path, expected } => {
                write!(f, "Cast to {expected} failed for value at path `{path}`")
            }
        }
    }
}

/// Write rejected because the record does not match its declared shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{model} validation failed: {}", describe(.errors))]
pub struct ValidationError {
    model: &'static str,
    errors: Vec<FieldError>,
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {error}", error.path()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn model(&self) -> &'static str {
        self.model
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// True when `path` is among the failing paths.
    pub fn fails_on(&self, path: &str) -> bool {
        self.errors.iter().any(|error| error.path() == path)
    }
}

/// Validates `doc` against the shape of `M` and returns the cleaned document.
///
/// - fields `M` does not declare are dropped
/// - numbers and booleans are cast to strings for `String` fields
/// - `null` counts as absent; so do empty strings in required fields and
///   references, while optional strings keep `""` as supplied
/// - absent required fields and uncastable values are collected, not
///   short-circuited, so the error lists every failing path
pub fn validate_document<M: Model>(mut doc: Document) -> Result<Document, ValidationError> {
    let mut cleaned = Document::new();
    let mut errors = Vec::new();

    for field in M::FIELDS {
        match doc.remove(field.name).and_then(|value| cast(field, value)) {
            Some(Ok(value)) => {
                cleaned.insert(field.name.to_string(), value);
            }
            Some(Err(error)) => errors.push(error),
            None if field.required => errors.push(FieldError::Required { path: field.name }),
            None => {}
        }
    }

    if errors.is_empty() {
        Ok(cleaned)
    } else {
        Err(ValidationError { model: M::NAME, errors })
    }
}

/// `None` means the value counts as absent.
fn cast(field: &FieldSpec, value: Value) -> Option<Result<Value, FieldError>> {
    let text = match value {
        Value::Null => return None,
        Value::String(text) => text,
        Value::Number(number) if field.kind == FieldKind::String => number.to_string(),
        Value::Bool(flag) if field.kind == FieldKind::String => flag.to_string(),
        _ => return Some(Err(FieldError::Cast { path: field.name, expected: field.kind })),
    };

    // empty strings fail `required`; optional strings keep them as written,
    // except references, where an empty value means no reference
    if text.is_empty() && (field.required || field.kind == FieldKind::ObjectId) {
        return None;
    }

    if field.kind == FieldKind::ObjectId && text.parse::<RecordId>().is_err() {
        return Some(Err(FieldError::Cast { path: field.name, expected: field.kind }));
    }

    Some(Ok(Value::String(text)))
}
