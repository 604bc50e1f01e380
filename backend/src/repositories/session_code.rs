//! Session code repository. At most one document per date: new documents
//! use the date itself as their id, so a second create for the same date is
//! rejected by the store as a conflict.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::{
    encode_data, list_all, CollectionRef, Document, DocumentStore, ListQuery, ReadPolicy,
    StoreError, CREATED_AT,
};
use crate::models::session_code::SessionCode;

const DATE: &str = "date";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, Deserialize)]
struct SessionCodeDocument {
    date: String,
    code: String,
}

impl From<&SessionCode> for SessionCodeDocument {
    fn from(value: &SessionCode) -> Self {
        Self {
            date: value.date.format(DATE_FORMAT).to_string(),
            code: value.code.clone(),
        }
    }
}

/// A session code together with the id of the document holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSessionCode {
    pub document_id: String,
    pub session_code: SessionCode,
}

fn date_document_id(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn decode_session_code(document: &Document) -> Result<SessionCode, StoreError> {
    let raw = document.decode::<SessionCodeDocument>()?;
    let date = NaiveDate::parse_from_str(&raw.date, DATE_FORMAT).map_err(|err| {
        StoreError::Decode(format!("document {}: invalid date {}: {}", document.id, raw.date, err))
    })?;
    Ok(SessionCode {
        date,
        code: raw.code,
    })
}

#[derive(Clone)]
pub struct SessionCodeRepository {
    store: Arc<dyn DocumentStore>,
    collection: CollectionRef,
    policy: ReadPolicy,
}

impl SessionCodeRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: CollectionRef, policy: ReadPolicy) -> Self {
        Self {
            store,
            collection,
            policy,
        }
    }

    /// All session codes, newest date first. Duplicate dates left over from
    /// older writes come newest document first.
    pub async fn list_all(&self) -> Result<Vec<SessionCode>, StoreError> {
        let query = ListQuery::new().order_desc(DATE).order_desc(CREATED_AT);
        let documents = list_all(self.store.as_ref(), &self.collection, query, &self.policy).await?;
        documents.iter().map(decode_session_code).collect()
    }

    pub async fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<StoredSessionCode>, StoreError> {
        let query = ListQuery::new()
            .equal(DATE, date.format(DATE_FORMAT).to_string())
            .order_desc(CREATED_AT)
            .limit(1);
        let page = self.store.list_documents(&self.collection, &query).await?;
        page.documents
            .first()
            .map(|doc| {
                decode_session_code(doc).map(|session_code| StoredSessionCode {
                    document_id: doc.id.clone(),
                    session_code,
                })
            })
            .transpose()
    }

    pub async fn create(&self, session_code: &SessionCode) -> Result<SessionCode, StoreError> {
        let data = encode_data(&SessionCodeDocument::from(session_code))?;
        let document = self
            .store
            .create_document(&self.collection, &date_document_id(session_code.date), data)
            .await?;
        decode_session_code(&document)
    }

    pub async fn update(
        &self,
        document_id: &str,
        session_code: &SessionCode,
    ) -> Result<SessionCode, StoreError> {
        let data = encode_data(&SessionCodeDocument::from(session_code))?;
        let document = self
            .store
            .update_document(&self.collection, document_id, data)
            .await?;
        decode_session_code(&document)
    }
}
