//! PersonStorage implementation for MongoDB.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::ReturnDocument;
use serde_json::Value;

use crate::core::PersonStorage;
use crate::error::StorageResult;
use crate::schema::PersonSchema;
use crate::types::{DocumentId, PageRequest, Person, PersonWithCompany, SearchQuery};

use super::MongoBackend;
use super::backend::internal_error;
use super::convert::{document_to_joined, document_to_person, object_id, patch_value, person_to_document};

fn to_bson_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl PersonStorage for MongoBackend {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> StorageResult<()> {
        self.client()
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| internal_error(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn create_person(&self, body: Value) -> StorageResult<Person> {
        let person = PersonSchema.prepare_new(body)?;

        self.persons()
            .insert_one(person_to_document(&person)?)
            .await
            .map_err(|e| internal_error(format!("Failed to insert person: {}", e)))?;

        Ok(person)
    }

    async fn read_person_with_company(&self, id: &str) -> StorageResult<Vec<PersonWithCompany>> {
        let id = DocumentId::parse(id)?;

        // $toObjectId fails the whole pipeline on a malformed companyId.
        let pipeline = vec![
            doc! { "$match": { "_id": object_id(&id) } },
            doc! { "$addFields": { "companyIdObj": { "$toObjectId": "$companyId" } } },
            doc! { "$lookup": {
                "from": "companies",
                "localField": "companyIdObj",
                "foreignField": "_id",
                "as": "company",
            } },
            doc! { "$project": { "companyIdObj": 0 } },
        ];

        let docs: Vec<Document> = self
            .persons()
            .aggregate(pipeline)
            .await
            .map_err(|e| internal_error(format!("Failed to read person: {}", e)))?
            .try_collect()
            .await
            .map_err(|e| internal_error(format!("Failed to read person: {}", e)))?;

        docs.into_iter().map(document_to_joined).collect()
    }

    async fn update_person(&self, id: &str, patch: Value) -> StorageResult<Option<Person>> {
        let id = DocumentId::parse(id)?;
        let patch = PersonSchema.prepare_patch(patch)?;
        let filter = doc! { "_id": object_id(&id) };

        let mut set = Document::new();
        let mut unset = Document::new();
        for (field, value) in &patch {
            if value.is_null() {
                unset.insert(field.as_str(), "");
            } else {
                set.insert(field.as_str(), patch_value(field, value)?);
            }
        }

        if set.is_empty() && unset.is_empty() {
            let found = self
                .persons()
                .find_one(filter)
                .await
                .map_err(|e| internal_error(format!("Failed to read person: {}", e)))?;
            return found.map(document_to_person).transpose();
        }

        let mut update = Document::new();
        if !set.is_empty() {
            update.insert("$set", set);
        }
        if !unset.is_empty() {
            update.insert("$unset", unset);
        }

        let updated = self
            .persons()
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| internal_error(format!("Failed to update person: {}", e)))?;

        updated.map(document_to_person).transpose()
    }

    async fn delete_person(&self, id: &str) -> StorageResult<Option<Person>> {
        let id = DocumentId::parse(id)?;

        let deleted = self
            .persons()
            .find_one_and_delete(doc! { "_id": object_id(&id) })
            .await
            .map_err(|e| internal_error(format!("Failed to delete person: {}", e)))?;

        deleted.map(document_to_person).transpose()
    }

    async fn list_persons(&self, page: &PageRequest) -> StorageResult<Vec<Person>> {
        let docs: Vec<Document> = self
            .persons()
            .find(doc! {})
            .sort(doc! { "created": -1, "_id": -1 })
            .skip(page.offset())
            .limit(to_bson_int(page.limit()))
            .await
            .map_err(|e| internal_error(format!("Failed to list persons: {}", e)))?
            .try_collect()
            .await
            .map_err(|e| internal_error(format!("Failed to list persons: {}", e)))?;

        docs.into_iter().map(document_to_person).collect()
    }

    async fn count_persons(&self) -> StorageResult<u64> {
        self.persons()
            .count_documents(doc! {})
            .await
            .map_err(|e| internal_error(format!("Failed to count persons: {}", e)))
    }

    async fn search_persons(&self, query: &SearchQuery) -> StorageResult<Vec<Person>> {
        let pattern = query.escaped_pattern();
        let clauses: Vec<Document> = query
            .fields()
            .iter()
            .map(|field| doc! { field.as_str(): { "$regex": pattern.as_str(), "$options": "i" } })
            .collect();

        let docs: Vec<Document> = self
            .persons()
            .find(doc! { "$or": clauses })
            .sort(doc! { "name": 1, "_id": 1 })
            .limit(to_bson_int(query.limit() as u64))
            .await
            .map_err(|e| internal_error(format!("Failed to search persons: {}", e)))?
            .try_collect()
            .await
            .map_err(|e| internal_error(format!("Failed to search persons: {}", e)))?;

        tracing::debug!(
            text = %query.text(),
            fields = ?query.fields(),
            matched = docs.len(),
            "MongoDB person search"
        );

        docs.into_iter().map(document_to_person).collect()
    }
}
