//! In-process document store used for local development and tests.
//!
//! Mirrors the remote store semantics the service relies on: filters and
//! ordering over attributes, `limit`/`offset` windows (default window of 25),
//! conflicts on duplicate ids, and optional unique attributes per collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use super::document::{
    CollectionRef, Document, DocumentData, DocumentPage, DocumentStore, Filter, ListQuery, Order,
    StoreError, CREATED_AT, DOCUMENT_ID,
};

const DEFAULT_LIMIT: u32 = 25;

#[derive(Default)]
struct Inner {
    collections: HashMap<CollectionRef, Vec<Document>>,
    unique: HashMap<CollectionRef, Vec<String>>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects documents whose `attribute` duplicates an existing one.
    pub fn with_unique_attribute(self, collection: CollectionRef, attribute: &str) -> Self {
        self.lock()
            .unique
            .entry(collection)
            .or_default()
            .push(attribute.to_string());
        self
    }

    /// Inserts a fully formed document, keeping its timestamps.
    pub fn insert_document(&self, collection: &CollectionRef, document: Document) {
        self.lock()
            .collections
            .entry(collection.clone())
            .or_default()
            .push(document);
    }

    pub fn documents(&self, collection: &CollectionRef) -> Vec<Document> {
        self.lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn attribute_value(doc: &Document, attribute: &str) -> Option<Value> {
    match attribute {
        DOCUMENT_ID => Some(Value::String(doc.id.clone())),
        CREATED_AT => Some(Value::String(doc.created_at.to_rfc3339())),
        _ => doc.data.get(attribute).cloned(),
    }
}

fn as_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Some(l), Some(r)) = (as_timestamp(left), as_timestamp(right)) {
        return Some(l.cmp(&r));
    }
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.as_f64()?.partial_cmp(&r.as_f64()?),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        (Value::Bool(l), Value::Bool(r)) => Some(l.cmp(r)),
        _ => None,
    }
}

fn matches(doc: &Document, filter: &Filter) -> bool {
    match filter {
        Filter::Equal(attr, expected) => attribute_value(doc, attr)
            .map(|actual| compare_values(&actual, expected) == Some(Ordering::Equal))
            .unwrap_or(false),
        Filter::GreaterThanEqual(attr, bound) => attribute_value(doc, attr)
            .and_then(|actual| compare_values(&actual, bound))
            .map(|ord| ord != Ordering::Less)
            .unwrap_or(false),
        Filter::LessThan(attr, bound) => attribute_value(doc, attr)
            .and_then(|actual| compare_values(&actual, bound))
            .map(|ord| ord == Ordering::Less)
            .unwrap_or(false),
    }
}

fn order_documents(documents: &mut [Document], order: &[Order]) {
    documents.sort_by(|a, b| {
        for key in order {
            let (attr, descending) = match key {
                Order::Asc(attr) => (attr, false),
                Order::Desc(attr) => (attr, true),
            };
            let ord = match (attribute_value(a, attr), attribute_value(b, attr)) {
                (Some(l), Some(r)) => compare_values(&l, &r).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            let ord = if descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(
        &self,
        collection: &CollectionRef,
        query: &ListQuery,
    ) -> Result<DocumentPage, StoreError> {
        let mut selected: Vec<Document> = self
            .lock()
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| query.filters.iter().all(|f| matches(doc, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        order_documents(&mut selected, &query.order);
        let total = selected.len() as u64;
        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT) as usize;
        let documents = selected.into_iter().skip(offset).take(limit).collect();

        Ok(DocumentPage { total, documents })
    }

    async fn get_document(
        &self,
        collection: &CollectionRef,
        document_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .lock()
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == document_id).cloned()))
    }

    async fn create_document(
        &self,
        collection: &CollectionRef,
        document_id: &str,
        data: DocumentData,
    ) -> Result<Document, StoreError> {
        let mut inner = self.lock();
        let unique_attrs = inner.unique.get(collection).cloned().unwrap_or_default();
        let docs = inner.collections.entry(collection.clone()).or_default();

        if docs.iter().any(|doc| doc.id == document_id) {
            return Err(StoreError::Conflict(format!(
                "document {} already exists",
                document_id
            )));
        }
        for attr in &unique_attrs {
            if let Some(value) = data.get(attr) {
                if docs.iter().any(|doc| doc.data.get(attr) == Some(value)) {
                    return Err(StoreError::Conflict(format!(
                        "{} {} already exists",
                        attr, value
                    )));
                }
            }
        }

        let now = Utc::now();
        let document = Document {
            id: document_id.to_string(),
            created_at: now,
            updated_at: now,
            data,
        };
        docs.push(document.clone());
        Ok(document)
    }

    async fn update_document(
        &self,
        collection: &CollectionRef,
        document_id: &str,
        data: DocumentData,
    ) -> Result<Document, StoreError> {
        let mut inner = self.lock();
        let doc = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == document_id))
            .ok_or_else(|| StoreError::NotFound(document_id.to_string()))?;

        for (key, value) in data {
            doc.data.insert(key, value);
        }
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }
}
