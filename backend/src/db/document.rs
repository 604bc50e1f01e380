//! Generic document-store vocabulary.
//!
//! Every collection the service touches is addressed by a [`CollectionRef`]
//! (database id + collection id) and holds schemaless JSON documents. The
//! [`DocumentStore`] trait is the only seam between the service and the remote
//! database; the concrete client is built once at start-up and injected
//! through application state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub type DocumentData = Map<String, Value>;

/// Attribute name used by the store for the document creation timestamp.
pub const CREATED_AT: &str = "$createdAt";
/// Attribute name used by the store for the document id.
pub const DOCUMENT_ID: &str = "$id";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionRef {
    pub database_id: String,
    pub collection_id: String,
}

impl CollectionRef {
    pub fn new(database_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            database_id: database_id.into(),
            collection_id: collection_id.into(),
        }
    }
}

impl std::fmt::Display for CollectionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.database_id, self.collection_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub data: DocumentData,
}

impl Document {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Deserializes the user attributes into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(Value::Object(self.data.clone())).map_err(|err| {
            StoreError::Decode(format!("document {}: {}", self.id, err))
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Equal(String, Value),
    GreaterThanEqual(String, Value),
    LessThan(String, Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Order {
    Asc(String),
    Desc(String),
}

/// Filter, sort and window parameters for a list call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equal(mut self, attribute: &str, value: impl Into<Value>) -> Self {
        self.filters
            .push(Filter::Equal(attribute.to_string(), value.into()));
        self
    }

    pub fn greater_than_equal(mut self, attribute: &str, value: impl Into<Value>) -> Self {
        self.filters
            .push(Filter::GreaterThanEqual(attribute.to_string(), value.into()));
        self
    }

    pub fn less_than(mut self, attribute: &str, value: impl Into<Value>) -> Self {
        self.filters
            .push(Filter::LessThan(attribute.to_string(), value.into()));
        self
    }

    pub fn order_asc(mut self, attribute: &str) -> Self {
        self.order.push(Order::Asc(attribute.to_string()));
        self
    }

    pub fn order_desc(mut self, attribute: &str) -> Self {
        self.order.push(Order::Desc(attribute.to_string()));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPage {
    pub total: u64,
    pub documents: Vec<Document>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// A document with the same id or unique attribute already exists.
    #[error("document conflict: {0}")]
    Conflict(String),
    #[error("document not found: {0}")]
    NotFound(String),
    /// The store could not be reached or answered with a server error.
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("failed to decode document: {0}")]
    Decode(String),
}

impl StoreError {
    /// Whether a read may be retried after this error.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_documents(
        &self,
        collection: &CollectionRef,
        query: &ListQuery,
    ) -> Result<DocumentPage, StoreError>;

    async fn get_document(
        &self,
        collection: &CollectionRef,
        document_id: &str,
    ) -> Result<Option<Document>, StoreError>;

    async fn create_document(
        &self,
        collection: &CollectionRef,
        document_id: &str,
        data: DocumentData,
    ) -> Result<Document, StoreError>;

    async fn update_document(
        &self,
        collection: &CollectionRef,
        document_id: &str,
        data: DocumentData,
    ) -> Result<Document, StoreError>;
}

/// Serializes a value into the attribute map of a document.
pub fn encode_data<T: Serialize>(value: &T) -> Result<DocumentData, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(StoreError::Decode("document data must be an object".into())),
        Err(err) => Err(StoreError::Decode(err.to_string())),
    }
}

/// Generates a store-compatible unique document id.
pub fn unique_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn list_query_builder_collects_filters_and_order() {
        let query = ListQuery::new()
            .equal("studentId", "WDF1001")
            .order_desc("date")
            .limit(25)
            .offset(50);
        assert_eq!(
            query.filters,
            vec![Filter::Equal("studentId".into(), json!("WDF1001"))]
        );
        assert_eq!(query.order, vec![Order::Desc("date".into())]);
        assert_eq!(query.limit, Some(25));
        assert_eq!(query.offset, Some(50));
    }

    #[test]
    fn decode_reports_document_id_on_failure() {
        #[derive(Debug, Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            code: String,
        }

        let mut data = DocumentData::new();
        data.insert("code".into(), json!(42));
        let doc = Document {
            id: "doc-1".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            data,
        };
        let err = doc.decode::<Shape>().unwrap_err();
        assert!(err.to_string().contains("doc-1"));
    }

    #[test]
    fn only_unavailable_errors_are_transient() {
        assert!(StoreError::Unavailable("timeout".into()).is_transient());
        assert!(!StoreError::Conflict("dup".into()).is_transient());
        assert!(!StoreError::Rejected {
            status: 400,
            message: "bad query".into()
        }
        .is_transient());
    }

    #[test]
    fn unique_document_id_fits_store_limits() {
        let id = unique_document_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
