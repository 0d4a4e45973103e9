//! Person schema validation.
//!
//! Every backend runs incoming documents through [`PersonSchema`] before
//! writing, so validation behaves the same regardless of the store.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::document::{COMPANY_FIELD, COMPANY_ID_FIELD, CREATED_FIELD, ID_FIELD, NAME_FIELD};
use crate::types::{DocumentId, Person};

/// The JSON type a schema field must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A non-blank string.
    String,
    /// An RFC 3339 timestamp string.
    Timestamp,
}

impl FieldKind {
    fn describe(&self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Timestamp => "an RFC 3339 timestamp",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::String, Value::String(_)) => true,
            (FieldKind::Timestamp, Value::String(s)) => DateTime::parse_from_rfc3339(s).is_ok(),
            _ => false,
        }
    }
}

/// A declared schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name.
    pub name: &'static str,
    /// Expected JSON type.
    pub kind: FieldKind,
    /// Whether the field must be present on every document.
    pub required: bool,
}

/// Declared fields of a person document. Other fields are caller-defined.
pub const PERSON_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: NAME_FIELD,
        kind: FieldKind::String,
        required: true,
    },
    FieldRule {
        name: COMPANY_ID_FIELD,
        kind: FieldKind::String,
        required: true,
    },
    FieldRule {
        name: CREATED_FIELD,
        kind: FieldKind::Timestamp,
        required: false,
    },
];

/// Validator for person documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonSchema;

impl PersonSchema {
    /// Validates a creation payload and builds the document to store.
    ///
    /// A caller-supplied `_id` is ignored and a fresh identifier assigned.
    /// `created` defaults to now.
    pub fn prepare_new(&self, body: Value) -> Result<Person, ValidationError> {
        let mut fields = into_object(body)?;

        for rule in PERSON_FIELDS {
            match fields.get(rule.name) {
                None | Some(Value::Null) if rule.required => {
                    return Err(ValidationError::MissingRequiredField {
                        field: rule.name.to_string(),
                    });
                }
                None | Some(Value::Null) => {}
                Some(value) => check_value(rule, value)?,
            }
        }

        let name = take_string(&mut fields, NAME_FIELD);
        let company_id = take_string(&mut fields, COMPANY_ID_FIELD);
        let created = fields
            .remove(CREATED_FIELD)
            .and_then(|v| v.as_str().and_then(|s| DateTime::parse_from_rfc3339(s).ok()))
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        Ok(Person::new(
            DocumentId::generate(),
            name,
            company_id,
            created,
            fields,
        ))
    }

    /// Validates a partial update and returns the fields to merge.
    ///
    /// Only fields present in the patch are checked. `_id` and `company` are
    /// dropped.
    pub fn prepare_patch(&self, patch: Value) -> Result<Map<String, Value>, ValidationError> {
        let mut fields = into_object(patch)?;
        fields.remove(ID_FIELD);
        fields.remove(COMPANY_FIELD);

        for rule in PERSON_FIELDS {
            match fields.get(rule.name) {
                None => {}
                Some(Value::Null) if rule.required => {
                    return Err(ValidationError::MissingRequiredField {
                        field: rule.name.to_string(),
                    });
                }
                Some(Value::Null) => {
                    // Optional well-known fields cannot be unset.
                    fields.remove(rule.name);
                }
                Some(value) => check_value(rule, value)?,
            }
        }

        Ok(fields)
    }
}

fn into_object(body: Value) -> Result<Map<String, Value>, ValidationError> {
    match body {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::InvalidDocument {
            message: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn check_value(rule: &FieldRule, value: &Value) -> Result<(), ValidationError> {
    if !rule.kind.accepts(value) {
        return Err(ValidationError::InvalidFieldType {
            field: rule.name.to_string(),
            expected: rule.kind.describe().to_string(),
        });
    }
    if rule.required && value.as_str().is_some_and(|s| s.trim().is_empty()) {
        return Err(ValidationError::MissingRequiredField {
            field: rule.name.to_string(),
        });
    }
    Ok(())
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> String {
    match fields.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
