//! Stored document types.
//!
//! [`Person`] and [`Company`] are the two collections this crate knows about.
//! Both keep their caller-defined fields in a flattened JSON map, so the wire
//! form of a document is a single flat object keyed by `_id`.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::DocumentId;

/// Field name of the document identifier.
pub const ID_FIELD: &str = "_id";

/// Field name of the person's company foreign key.
pub const COMPANY_ID_FIELD: &str = "companyId";

/// Field name of the person's display name.
pub const NAME_FIELD: &str = "name";

/// Field name of the creation timestamp.
pub const CREATED_FIELD: &str = "created";

/// Field name of the joined company sequence on a read result.
pub const COMPANY_FIELD: &str = "company";

/// Truncates a timestamp to the millisecond precision documents are stored at.
pub fn normalize_created(created: DateTime<Utc>) -> DateTime<Utc> {
    created.trunc_subsecs(3)
}

/// Formats a creation timestamp so that lexical order equals time order.
pub fn format_created(created: &DateTime<Utc>) -> String {
    created.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod created_format {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_created(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| super::normalize_created(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    }
}

/// A stored person document.
///
/// # Examples
///
/// ```
/// use roster_persistence::types::{DocumentId, Person};
/// use serde_json::json;
///
/// let person = Person::new(
///     DocumentId::generate(),
///     "Alice",
///     "65a1f0c2e4b0a1b2c3d4e5f6",
///     chrono::Utc::now(),
///     json!({"email": "alice@example.com"}).as_object().cloned().unwrap(),
/// );
///
/// let wire = person.to_json();
/// assert_eq!(wire["name"], "Alice");
/// assert_eq!(wire["email"], "alice@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "_id")]
    id: DocumentId,

    name: String,

    #[serde(rename = "companyId")]
    company_id: String,

    #[serde(with = "created_format")]
    created: DateTime<Utc>,

    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Person {
    /// Creates a person document.
    ///
    /// Reserved keys (`_id`, `name`, `companyId`, `created`, `company`) are
    /// removed from `fields`.
    pub fn new(
        id: DocumentId,
        name: impl Into<String>,
        company_id: impl Into<String>,
        created: DateTime<Utc>,
        mut fields: Map<String, Value>,
    ) -> Self {
        for key in [ID_FIELD, NAME_FIELD, COMPANY_ID_FIELD, CREATED_FIELD, COMPANY_FIELD] {
            fields.remove(key);
        }
        Self {
            id,
            name: name.into(),
            company_id: company_id.into(),
            created: normalize_created(created),
            fields,
        }
    }

    /// Parses a person from its stored JSON form.
    pub fn from_json(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Returns the JSON form of this document.
    pub fn to_json(&self) -> Value {
        // Serialization of a plain struct with a string-keyed map cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Returns the document identifier.
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw company foreign key as supplied by the caller.
    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    /// Returns the creation timestamp.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns the caller-defined fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a field by name, including the well-known ones.
    pub fn get(&self, field: &str) -> Option<Value> {
        match field {
            ID_FIELD => Some(Value::String(self.id.to_hex())),
            NAME_FIELD => Some(Value::String(self.name.clone())),
            COMPANY_ID_FIELD => Some(Value::String(self.company_id.clone())),
            CREATED_FIELD => Some(Value::String(format_created(&self.created))),
            other => self.fields.get(other).cloned(),
        }
    }

    /// Merges a validated patch into this document.
    ///
    /// The identifier never changes. `Value::Null` on an optional field removes
    /// it; well-known fields must already have been checked by the schema.
    pub fn apply_patch(&mut self, patch: &Map<String, Value>) {
        for (key, value) in patch {
            match key.as_str() {
                ID_FIELD | COMPANY_FIELD => {}
                NAME_FIELD => {
                    if let Some(name) = value.as_str() {
                        self.name = name.to_string();
                    }
                }
                COMPANY_ID_FIELD => {
                    if let Some(company_id) = value.as_str() {
                        self.company_id = company_id.to_string();
                    }
                }
                CREATED_FIELD => {
                    if let Some(created) = value
                        .as_str()
                        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                    {
                        self.created = normalize_created(created.with_timezone(&Utc));
                    }
                }
                _ if value.is_null() => {
                    self.fields.remove(key);
                }
                _ => {
                    self.fields.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

/// A stored company document.
///
/// Companies are read-only from the person service's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id")]
    id: DocumentId,

    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Company {
    /// Creates a company document.
    pub fn new(id: DocumentId, mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        Self { id, fields }
    }

    /// Parses a company from its stored JSON form.
    pub fn from_json(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Returns the JSON form of this document.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Returns the document identifier.
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Returns the company's fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// A person joined with its company.
///
/// `company` is a sequence of at most one element. It serializes as an array
/// so a read result keeps the shape of a left-join lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonWithCompany {
    #[serde(flatten)]
    person: Person,

    company: Vec<Company>,
}

impl PersonWithCompany {
    /// Joins a person with its (optional) company.
    pub fn new(person: Person, company: Option<Company>) -> Self {
        Self {
            person,
            company: company.into_iter().collect(),
        }
    }

    /// Returns the person.
    pub fn person(&self) -> &Person {
        &self.person
    }

    /// Returns the joined company, if one matched.
    pub fn company(&self) -> Option<&Company> {
        self.company.first()
    }

    /// Returns the joined sequence as stored on the wire.
    pub fn companies(&self) -> &[Company] {
        &self.company
    }
}
