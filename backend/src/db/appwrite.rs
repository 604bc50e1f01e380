//! Appwrite-compatible REST client for the document store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::document::{
    CollectionRef, Document, DocumentData, DocumentPage, DocumentStore, Filter, ListQuery, Order,
    StoreError,
};

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct AppwriteStore {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
}

impl AppwriteStore {
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("rollcall-backend/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            api_key: api_key.into(),
        })
    }

    fn documents_url(&self, collection: &CollectionRef) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, collection.database_id, collection.collection_id
        )
    }

    fn document_url(&self, collection: &CollectionRef, document_id: &str) -> String {
        format!("{}/{}", self.documents_url(collection), document_id)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(PROJECT_HEADER, &self.project_id);
        if self.api_key.is_empty() {
            builder
        } else {
            builder.header(KEY_HEADER, &self.api_key)
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, StoreError> {
        self.authorize(builder)
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct RawDocumentList {
    total: u64,
    documents: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawError {
    message: Option<String>,
}

/// Encodes a list query as the JSON query strings the REST API expects.
pub(crate) fn encode_queries(query: &ListQuery) -> Vec<String> {
    let mut encoded = Vec::new();
    for filter in &query.filters {
        let (method, attribute, value) = match filter {
            Filter::Equal(attr, value) => ("equal", attr, value),
            Filter::GreaterThanEqual(attr, value) => ("greaterThanEqual", attr, value),
            Filter::LessThan(attr, value) => ("lessThan", attr, value),
        };
        encoded.push(json!({ "method": method, "attribute": attribute, "values": [value] }).to_string());
    }
    for order in &query.order {
        let (method, attribute) = match order {
            Order::Asc(attr) => ("orderAsc", attr),
            Order::Desc(attr) => ("orderDesc", attr),
        };
        encoded.push(json!({ "method": method, "attribute": attribute }).to_string());
    }
    if let Some(limit) = query.limit {
        encoded.push(json!({ "method": "limit", "values": [limit] }).to_string());
    }
    if let Some(offset) = query.offset {
        encoded.push(json!({ "method": "offset", "values": [offset] }).to_string());
    }
    encoded
}

fn parse_timestamp(raw: &Value, key: &str) -> Result<DateTime<Utc>, StoreError> {
    raw.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Decode(format!("missing {}", key)))
        .and_then(|value| {
            DateTime::parse_from_rfc3339(value)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|err| StoreError::Decode(format!("invalid {}: {}", key, err)))
        })
}

/// Splits a raw store document into system metadata and user attributes.
pub(crate) fn parse_document(raw: Value) -> Result<Document, StoreError> {
    let id = raw
        .get("$id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Decode("missing $id".into()))?
        .to_string();
    let created_at = parse_timestamp(&raw, "$createdAt")?;
    let updated_at = parse_timestamp(&raw, "$updatedAt").unwrap_or(created_at);

    let data = match raw {
        Value::Object(map) => map
            .into_iter()
            .filter(|(key, _)| !key.starts_with('$'))
            .collect::<DocumentData>(),
        _ => return Err(StoreError::Decode("document is not an object".into())),
    };

    Ok(Document {
        id,
        created_at,
        updated_at,
        data,
    })
}

async fn error_from_response(response: Response, context: &str) -> StoreError {
    let status = response.status();
    let message = response
        .json::<RawError>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::CONFLICT => StoreError::Conflict(format!("{}: {}", context, message)),
        StatusCode::NOT_FOUND => StoreError::NotFound(format!("{}: {}", context, message)),
        StatusCode::TOO_MANY_REQUESTS => StoreError::Unavailable(message),
        s if s.is_server_error() => StoreError::Unavailable(message),
        s => StoreError::Rejected {
            status: s.as_u16(),
            message,
        },
    }
}

async fn read_document(response: Response, context: &str) -> Result<Document, StoreError> {
    if !response.status().is_success() {
        return Err(error_from_response(response, context).await);
    }
    let raw: Value = response
        .json()
        .await
        .map_err(|err| StoreError::Decode(err.to_string()))?;
    parse_document(raw)
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn list_documents(
        &self,
        collection: &CollectionRef,
        query: &ListQuery,
    ) -> Result<DocumentPage, StoreError> {
        let params: Vec<(&str, String)> = encode_queries(query)
            .into_iter()
            .map(|q| ("queries[]", q))
            .collect();
        tracing::debug!(%collection, queries = params.len(), "Listing documents");

        let response = self
            .send(self.client.get(self.documents_url(collection)).query(&params))
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, &collection.to_string()).await);
        }

        let raw: RawDocumentList = response
            .json()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        let documents = raw
            .documents
            .into_iter()
            .map(parse_document)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DocumentPage {
            total: raw.total,
            documents,
        })
    }

    async fn get_document(
        &self,
        collection: &CollectionRef,
        document_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let response = self
            .send(self.client.get(self.document_url(collection, document_id)))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_document(response, document_id).await.map(Some)
    }

    async fn create_document(
        &self,
        collection: &CollectionRef,
        document_id: &str,
        data: DocumentData,
    ) -> Result<Document, StoreError> {
        tracing::debug!(%collection, document_id, "Creating document");
        let body = json!({ "documentId": document_id, "data": data });
        let response = self
            .send(self.client.post(self.documents_url(collection)).json(&body))
            .await?;
        read_document(response, document_id).await
    }

    async fn update_document(
        &self,
        collection: &CollectionRef,
        document_id: &str,
        data: DocumentData,
    ) -> Result<Document, StoreError> {
        tracing::debug!(%collection, document_id, "Updating document");
        let body = json!({ "data": data });
        let response = self
            .send(
                self.client
                    .patch(self.document_url(collection, document_id))
                    .json(&body),
            )
            .await?;
        read_document(response, document_id).await
    }
}
