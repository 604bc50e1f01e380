//! Sequential paginated reads with bounded retry per page.

use std::time::Duration;

use super::document::{
    CollectionRef, Document, DocumentPage, DocumentStore, ListQuery, StoreError,
};

/// Fixed-delay retry policy applied to each page of a bulk read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPolicy {
    pub page_size: u32,
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for ReadPolicy {
    fn default() -> Self {
        Self {
            page_size: 100,
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

/// Runs a single list call, retrying transient failures with a fixed delay.
pub async fn list_page_with_retry(
    store: &dyn DocumentStore,
    collection: &CollectionRef,
    query: &ListQuery,
    policy: &ReadPolicy,
) -> Result<DocumentPage, StoreError> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match store.list_documents(collection, query).await {
            Ok(page) => return Ok(page),
            Err(err) if err.is_transient() && attempt < attempts => {
                tracing::warn!(
                    %collection,
                    attempt,
                    attempts,
                    error = %err,
                    "List request failed, retrying"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::error!(%collection, attempt, error = %err, "List request failed");
                return Err(err);
            }
        }
    }
}

/// Reads every document matching `query`, one page at a time.
///
/// Any page that still fails after the retry budget aborts the whole read;
/// pages fetched so far are dropped.
pub async fn list_all(
    store: &dyn DocumentStore,
    collection: &CollectionRef,
    query: ListQuery,
    policy: &ReadPolicy,
) -> Result<Vec<Document>, StoreError> {
    let page_size = policy.page_size.max(1);
    let mut documents = Vec::new();
    let mut offset: u32 = 0;

    loop {
        let page_query = query.clone().limit(page_size).offset(offset);
        let page = list_page_with_retry(store, collection, &page_query, policy).await?;
        let fetched = page.documents.len() as u32;
        documents.extend(page.documents);
        offset += fetched;

        if fetched < page_size || u64::from(offset) >= page.total {
            break;
        }
    }

    tracing::debug!(%collection, count = documents.len(), "Listed all documents");
    Ok(documents)
}
