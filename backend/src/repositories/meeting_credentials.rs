//! Shared meeting credentials, kept in a single fixed-id document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::db::{encode_data, CollectionRef, Document, DocumentStore, StoreError};
use crate::models::meeting::MeetingCredentials;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeetingDocument {
    #[serde(default, deserialize_with = "string_or_number")]
    zoom_id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    zoom_password: String,
}

// Older documents hold the meeting id as a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn decode_credentials(document: &Document) -> Result<MeetingCredentials, StoreError> {
    let raw = document.decode::<MeetingDocument>()?;
    Ok(MeetingCredentials {
        meeting_id: raw.zoom_id,
        password: raw.zoom_password,
    })
}

fn encode_credentials(
    credentials: &MeetingCredentials,
) -> Result<crate::db::DocumentData, StoreError> {
    encode_data(&MeetingDocument {
        zoom_id: credentials.meeting_id.clone(),
        zoom_password: credentials.password.clone(),
    })
}

#[derive(Clone)]
pub struct MeetingCredentialsRepository {
    store: Arc<dyn DocumentStore>,
    collection: CollectionRef,
    document_id: String,
}

impl MeetingCredentialsRepository {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        collection: CollectionRef,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            collection,
            document_id: document_id.into(),
        }
    }

    pub async fn get(&self) -> Result<Option<MeetingCredentials>, StoreError> {
        self.store
            .get_document(&self.collection, &self.document_id)
            .await?
            .as_ref()
            .map(decode_credentials)
            .transpose()
    }

    pub async fn create(
        &self,
        credentials: &MeetingCredentials,
    ) -> Result<MeetingCredentials, StoreError> {
        let document = self
            .store
            .create_document(
                &self.collection,
                &self.document_id,
                encode_credentials(credentials)?,
            )
            .await?;
        decode_credentials(&document)
    }

    pub async fn update(
        &self,
        credentials: &MeetingCredentials,
    ) -> Result<MeetingCredentials, StoreError> {
        let document = self
            .store
            .update_document(
                &self.collection,
                &self.document_id,
                encode_credentials(credentials)?,
            )
            .await?;
        decode_credentials(&document)
    }
}
