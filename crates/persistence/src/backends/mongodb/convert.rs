//! Conversions between stored JSON documents and BSON.
//!
//! On the wire, identifiers are hex strings and `created` is an RFC 3339
//! string. In MongoDB they are stored as native `ObjectId` and `DateTime`
//! values so that `$lookup`, `$toObjectId`, and date sorting behave natively.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, Document, oid::ObjectId};
use serde_json::{Map, Number, Value};

use crate::error::StorageResult;
use crate::types::document::{CREATED_FIELD, ID_FIELD, format_created};
use crate::types::{Company, DocumentId, Person, PersonWithCompany};

use super::backend::serialization_error;

pub(crate) fn object_id(id: &DocumentId) -> ObjectId {
    ObjectId::from_bytes(*id.as_bytes())
}

fn json_to_document(value: &Value) -> StorageResult<Document> {
    match bson::to_bson(value)
        .map_err(|e| serialization_error(format!("Failed to encode BSON: {}", e)))?
    {
        Bson::Document(doc) => Ok(doc),
        other => Err(serialization_error(format!(
            "Expected a BSON document, got {:?}",
            other.element_type()
        ))),
    }
}

/// Encodes a person for storage.
pub(crate) fn person_to_document(person: &Person) -> StorageResult<Document> {
    let mut doc = json_to_document(&person.to_json())?;
    doc.insert(ID_FIELD, object_id(person.id()));
    doc.insert(CREATED_FIELD, bson_datetime(&person.created()));
    Ok(doc)
}

/// Encodes a company for storage.
pub(crate) fn company_to_document(company: &Company) -> StorageResult<Document> {
    let mut doc = json_to_document(&company.to_json())?;
    doc.insert(ID_FIELD, object_id(company.id()));
    Ok(doc)
}

pub(crate) fn bson_datetime(value: &DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

/// Converts one patch value to BSON. `created` becomes a native date.
pub(crate) fn patch_value(field: &str, value: &Value) -> StorageResult<Bson> {
    if field == CREATED_FIELD {
        if let Some(created) = value
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        {
            return Ok(Bson::DateTime(bson_datetime(&created.with_timezone(&Utc))));
        }
    }
    bson::to_bson(value).map_err(|e| serialization_error(format!("Failed to encode BSON: {}", e)))
}

/// Converts a BSON value into its JSON wire form.
pub(crate) fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        Bson::Double(n) => Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()) {
            Some(dt) => Value::String(format_created(&dt)),
            None => Value::Null,
        },
        Bson::Decimal128(d) => Value::String(d.to_string()),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => Value::Object(document_to_map(doc)),
        other => other.into_relaxed_extjson(),
    }
}

fn document_to_map(doc: Document) -> Map<String, Value> {
    doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect()
}

/// Decodes a stored person.
pub(crate) fn document_to_person(doc: Document) -> StorageResult<Person> {
    Ok(Person::from_json(Value::Object(document_to_map(doc)))?)
}

/// Decodes a stored company.
pub(crate) fn document_to_company(doc: Document) -> StorageResult<Company> {
    Ok(Company::from_json(Value::Object(document_to_map(doc)))?)
}

/// Decodes one result of the read pipeline. The `company` array holds the
/// `$lookup` matches.
pub(crate) fn document_to_joined(mut doc: Document) -> StorageResult<PersonWithCompany> {
    let company = match doc.remove("company") {
        Some(Bson::Array(items)) => items
            .into_iter()
            .find_map(|item| match item {
                Bson::Document(d) => Some(d),
                _ => None,
            })
            .map(document_to_company)
            .transpose()?,
        _ => None,
    };
    Ok(PersonWithCompany::new(document_to_person(doc)?, company))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde_json::json;

    fn sample_person() -> Person {
        Person::new(
            DocumentId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap(),
            "Alice",
            "65a1f0c2e4b0a1b2c3d4e5f7",
            DateTime::parse_from_rfc3339("2024-01-15T10:30:00.123Z")
                .unwrap()
                .with_timezone(&Utc),
            json!({"age": 31, "tags": ["a"]}).as_object().cloned().unwrap(),
        )
    }

    #[test]
    fn test_person_document_uses_native_types() {
        let doc = person_to_document(&sample_person()).unwrap();
        assert!(matches!(doc.get("_id"), Some(Bson::ObjectId(_))));
        assert!(matches!(doc.get("created"), Some(Bson::DateTime(_))));
        assert_eq!(doc.get_str("companyId").unwrap(), "65a1f0c2e4b0a1b2c3d4e5f7");
    }

    #[test]
    fn test_person_document_decodes_back() {
        let doc = person_to_document(&sample_person()).unwrap();
        let person = document_to_person(doc).unwrap();
        assert_eq!(person.to_json()["created"], "2024-01-15T10:30:00.123Z");
        assert_eq!(person.to_json()["age"], 31);
        assert_eq!(person, sample_person());
    }

    #[test]
    fn test_joined_document() {
        let company_oid = ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f7").unwrap();
        let mut doc = person_to_document(&sample_person()).unwrap();
        doc.insert("company", vec![Bson::Document(doc! {"_id": company_oid, "name": "Acme"})]);

        let joined = document_to_joined(doc).unwrap();
        assert_eq!(joined.person().name(), "Alice");
        assert_eq!(joined.company().unwrap().fields()["name"], "Acme");
    }

    #[test]
    fn test_joined_document_without_match() {
        let mut doc = person_to_document(&sample_person()).unwrap();
        doc.insert("company", Bson::Array(Vec::new()));

        let joined = document_to_joined(doc).unwrap();
        assert!(joined.companies().is_empty());
    }

    #[test]
    fn test_patch_value_converts_created() {
        let value = patch_value("created", &json!("2024-02-01T00:00:00Z")).unwrap();
        assert!(matches!(value, Bson::DateTime(_)));

        let value = patch_value("email", &json!("a@b.c")).unwrap();
        assert_eq!(value, Bson::String("a@b.c".to_string()));
    }
}
