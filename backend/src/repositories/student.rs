//! Student repository.
//!
//! Students are stored with the identifier as the document id, so two writers
//! racing for the same identifier always collide with a conflict.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::{
    encode_data, list_all, CollectionRef, Document, DocumentStore, ListQuery, ReadPolicy,
    StoreError,
};
use crate::models::student::Student;
use crate::types::StudentId;

const STUDENT_ID: &str = "studentId";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentDocument {
    student_id: String,
    student_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    telegram_username: Option<String>,
}

impl StudentDocument {
    fn into_student(self, document_id: &str) -> Result<Student, StoreError> {
        let student_id = self.student_id.parse::<StudentId>().map_err(|err| {
            StoreError::Decode(format!("document {}: {}", document_id, err))
        })?;
        Ok(Student {
            student_id,
            student_name: self.student_name,
            telegram_username: self.telegram_username.filter(|h| !h.is_empty()),
        })
    }
}

fn decode_student(document: &Document) -> Result<Student, StoreError> {
    document
        .decode::<StudentDocument>()?
        .into_student(&document.id)
}

#[derive(Clone)]
pub struct StudentRepository {
    store: Arc<dyn DocumentStore>,
    collection: CollectionRef,
    policy: ReadPolicy,
}

impl StudentRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: CollectionRef, policy: ReadPolicy) -> Self {
        Self {
            store,
            collection,
            policy,
        }
    }

    /// Highest identifier currently assigned, if any student exists.
    pub async fn find_latest_id(&self) -> Result<Option<StudentId>, StoreError> {
        let query = ListQuery::new().order_desc(STUDENT_ID).limit(1);
        let page = self.store.list_documents(&self.collection, &query).await?;
        page.documents
            .first()
            .map(|doc| decode_student(doc).map(|student| student.student_id))
            .transpose()
    }

    pub async fn find_by_id(&self, student_id: StudentId) -> Result<Option<Student>, StoreError> {
        let query = ListQuery::new()
            .equal(STUDENT_ID, student_id.to_string())
            .limit(1);
        let page = self.store.list_documents(&self.collection, &query).await?;
        page.documents.first().map(decode_student).transpose()
    }

    /// Every student, ascending by identifier.
    pub async fn list_all(&self) -> Result<Vec<Student>, StoreError> {
        let query = ListQuery::new().order_asc(STUDENT_ID);
        let documents = list_all(self.store.as_ref(), &self.collection, query, &self.policy).await?;
        documents.iter().map(decode_student).collect()
    }

    pub async fn create(&self, student: &Student) -> Result<Student, StoreError> {
        let data = encode_data(&StudentDocument {
            student_id: student.student_id.to_string(),
            student_name: student.student_name.clone(),
            telegram_username: student.telegram_username.clone(),
        })?;
        let document = self
            .store
            .create_document(&self.collection, &student.student_id.to_string(), data)
            .await?;
        decode_student(&document)
    }
}
