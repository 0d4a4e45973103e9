//! PersonStorage implementation for SQLite.

use async_trait::async_trait;
use rusqlite::{OptionalExtension, params, params_from_iter};
use serde_json::Value;

use crate::core::PersonStorage;
use crate::error::{IdentifierError, StorageResult};
use crate::schema::PersonSchema;
use crate::types::document::{COMPANY_ID_FIELD, format_created};
use crate::types::{Company, DocumentId, PageRequest, Person, PersonWithCompany, SearchQuery};

use super::SqliteBackend;
use super::backend::{internal_error, serialization_error};
use super::functions::PERSON_SEARCH;

fn decode_person(data: &str) -> StorageResult<Person> {
    serde_json::from_str(data)
        .map_err(|e| serialization_error(format!("Failed to deserialize person: {}", e)))
}

fn decode_company(data: &str) -> StorageResult<Company> {
    serde_json::from_str(data)
        .map_err(|e| serialization_error(format!("Failed to deserialize company: {}", e)))
}

fn encode_person(person: &Person) -> StorageResult<String> {
    serde_json::to_string(person)
        .map_err(|e| serialization_error(format!("Failed to serialize person: {}", e)))
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl PersonStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn ping(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| internal_error(format!("Health check failed: {}", e)))
    }

    async fn create_person(&self, body: Value) -> StorageResult<Person> {
        let person = PersonSchema.prepare_new(body)?;
        let data = encode_person(&person)?;

        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO persons (id, company_id, name, created, data)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                person.id().to_hex(),
                person.company_id(),
                person.name(),
                format_created(&person.created()),
                data
            ],
        )
        .map_err(|e| internal_error(format!("Failed to insert person: {}", e)))?;

        Ok(person)
    }

    async fn read_person_with_company(&self, id: &str) -> StorageResult<Vec<PersonWithCompany>> {
        let id = DocumentId::parse(id)?;
        let conn = self.get_connection()?;

        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM persons WHERE id = ?1",
                params![id.to_hex()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read person: {}", e)))?;

        let Some(data) = data else {
            return Ok(Vec::new());
        };
        let person = decode_person(&data)?;

        let company_key =
            DocumentId::parse(person.company_id()).map_err(|_| IdentifierError::MalformedReference {
                id: id.to_hex(),
                field: COMPANY_ID_FIELD.to_string(),
                value: person.company_id().to_string(),
            })?;

        let company = conn
            .query_row(
                "SELECT data FROM companies WHERE id = ?1",
                params![company_key.to_hex()],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read company: {}", e)))?
            .map(|data| decode_company(&data))
            .transpose()?;

        Ok(vec![PersonWithCompany::new(person, company)])
    }

    async fn update_person(&self, id: &str, patch: Value) -> StorageResult<Option<Person>> {
        let id = DocumentId::parse(id)?;
        let patch = PersonSchema.prepare_patch(patch)?;

        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        let data: Option<String> = tx
            .query_row(
                "SELECT data FROM persons WHERE id = ?1",
                params![id.to_hex()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read person: {}", e)))?;

        let Some(data) = data else {
            return Ok(None);
        };

        let mut person = decode_person(&data)?;
        person.apply_patch(&patch);
        let data = encode_person(&person)?;

        tx.execute(
            "UPDATE persons SET company_id = ?2, name = ?3, created = ?4, data = ?5
             WHERE id = ?1",
            params![
                id.to_hex(),
                person.company_id(),
                person.name(),
                format_created(&person.created()),
                data
            ],
        )
        .map_err(|e| internal_error(format!("Failed to update person: {}", e)))?;

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit update: {}", e)))?;

        Ok(Some(person))
    }

    async fn delete_person(&self, id: &str) -> StorageResult<Option<Person>> {
        let id = DocumentId::parse(id)?;
        let conn = self.get_connection()?;

        let data: Option<String> = conn
            .query_row(
                "DELETE FROM persons WHERE id = ?1 RETURNING data",
                params![id.to_hex()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to delete person: {}", e)))?;

        data.map(|data| decode_person(&data)).transpose()
    }

    async fn list_persons(&self, page: &PageRequest) -> StorageResult<Vec<Person>> {
        let conn = self.get_connection()?;

        let mut stmt = conn
            .prepare(
                "SELECT data FROM persons
                 ORDER BY created DESC, seq DESC
                 LIMIT ?1 OFFSET ?2",
            )
            .map_err(|e| internal_error(format!("Failed to prepare list query: {}", e)))?;

        let rows = stmt
            .query_map(
                params![to_sql_int(page.limit()), to_sql_int(page.offset())],
                |row| row.get::<_, String>(0),
            )
            .map_err(|e| internal_error(format!("Failed to list persons: {}", e)))?;

        let mut persons = Vec::new();
        for row in rows {
            let data = row.map_err(|e| internal_error(format!("Failed to read row: {}", e)))?;
            persons.push(decode_person(&data)?);
        }
        Ok(persons)
    }

    async fn count_persons(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM persons", [], |row| row.get(0))
            .map_err(|e| internal_error(format!("Failed to count persons: {}", e)))?;

        Ok(count as u64)
    }

    async fn search_persons(&self, query: &SearchQuery) -> StorageResult<Vec<Person>> {
        // ?1 is the text, ?2.. the field names.
        let mut values: Vec<&str> = vec![query.text()];
        values.extend(query.fields().iter().map(String::as_str));
        let placeholders: Vec<String> = (1..=values.len()).map(|n| format!("?{n}")).collect();

        let sql = format!(
            "SELECT data FROM persons WHERE {PERSON_SEARCH}(data, {}) ORDER BY name ASC, seq ASC LIMIT {}",
            placeholders.join(", "),
            query.limit()
        );

        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| internal_error(format!("Failed to prepare search query: {}", e)))?;

        let rows = stmt
            .query_map(params_from_iter(values.iter()), |row| row.get::<_, String>(0))
            .map_err(|e| internal_error(format!("Failed to search persons: {}", e)))?;

        let mut persons = Vec::new();
        for row in rows {
            let data = row.map_err(|e| internal_error(format!("Failed to read row: {}", e)))?;
            persons.push(decode_person(&data)?);
        }

        tracing::debug!(
            text = %query.text(),
            fields = ?query.fields(),
            matched = persons.len(),
            "SQLite person search"
        );

        Ok(persons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_int_saturates() {
        assert_eq!(to_sql_int(5), 5);
        assert_eq!(to_sql_int(u64::MAX), i64::MAX);
    }
}
