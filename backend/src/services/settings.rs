//! Keyed upserts for session codes and the shared meeting credentials.
//!
//! Both follow the same shape: look the key up, update the document when it
//! exists, create it otherwise. Writing values identical to the stored ones is
//! rejected as a no-op.

use chrono::NaiveDate;
use thiserror::Error;

use crate::db::StoreError;
use crate::models::{
    meeting::{MeetingCredentials, UpdateMeetingCredentialsRequest},
    session_code::{SessionCode, UpsertSessionCodeResponse},
};
use crate::repositories::{
    MeetingCredentialsRepository, SessionCodeRepository, StoredSessionCode,
};
use crate::validation::rules;

#[derive(Debug, Error)]
pub enum UpsertError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    NoChanges(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn invalid(err: validator::ValidationError) -> UpsertError {
    UpsertError::Invalid(
        err.message
            .map(|message| message.to_string())
            .unwrap_or_else(|| err.code.to_string()),
    )
}

pub async fn upsert_session_code(
    repo: &SessionCodeRepository,
    date: NaiveDate,
    code: &str,
) -> Result<UpsertSessionCodeResponse, UpsertError> {
    let code = code.trim();
    rules::validate_attendance_code(code).map_err(invalid)?;

    let desired = SessionCode {
        date,
        code: code.to_string(),
    };

    match repo.find_by_date(date).await? {
        Some(stored) if stored.session_code == desired => Err(UpsertError::NoChanges(
            "This code is already set for the selected date.",
        )),
        Some(stored) => update_session_code(repo, &stored, &desired).await,
        None => match repo.create(&desired).await {
            Ok(session_code) => {
                tracing::info!(%date, "Created session code");
                Ok(UpsertSessionCodeResponse {
                    session_code,
                    created: true,
                })
            }
            Err(StoreError::Conflict(reason)) => {
                // Another request created this date first.
                tracing::warn!(%date, %reason, "Session code created concurrently, updating instead");
                let stored = repo
                    .find_by_date(date)
                    .await?
                    .ok_or(StoreError::Conflict(reason))?;
                if stored.session_code == desired {
                    return Ok(UpsertSessionCodeResponse {
                        session_code: stored.session_code,
                        created: false,
                    });
                }
                update_session_code(repo, &stored, &desired).await
            }
            Err(err) => Err(err.into()),
        },
    }
}

async fn update_session_code(
    repo: &SessionCodeRepository,
    stored: &StoredSessionCode,
    desired: &SessionCode,
) -> Result<UpsertSessionCodeResponse, UpsertError> {
    let session_code = repo.update(&stored.document_id, desired).await?;
    tracing::info!(date = %desired.date, "Updated session code");
    Ok(UpsertSessionCodeResponse {
        session_code,
        created: false,
    })
}

/// Applies a partial credentials update over the stored singleton.
pub async fn upsert_meeting_credentials(
    repo: &MeetingCredentialsRepository,
    request: &UpdateMeetingCredentialsRequest,
) -> Result<MeetingCredentials, UpsertError> {
    let current = repo.get().await?;
    let (meeting_id, password) = request.merge_over(current.as_ref());

    rules::validate_meeting_id(&meeting_id).map_err(invalid)?;
    rules::validate_meeting_password(&password).map_err(invalid)?;

    let desired = MeetingCredentials {
        meeting_id,
        password,
    };

    match current {
        Some(stored) if stored == desired => Err(UpsertError::NoChanges(
            "No changes were made to the meeting credentials.",
        )),
        Some(_) => {
            let updated = repo.update(&desired).await?;
            tracing::info!("Updated meeting credentials");
            Ok(updated)
        }
        None => {
            let created = repo.create(&desired).await?;
            tracing::info!("Created meeting credentials");
            Ok(created)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        document::MockDocumentStore, CollectionRef, Document, DocumentData, DocumentPage,
        MemoryStore, ReadPolicy,
    };
    use chrono::Utc;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn code_doc(date: &str, code: &str) -> Document {
        let mut data = DocumentData::new();
        data.insert("date".into(), json!(date));
        data.insert("code".into(), json!(code));
        Document {
            id: date.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            data,
        }
    }

    fn codes() -> SessionCodeRepository {
        SessionCodeRepository::new(
            Arc::new(MemoryStore::new()),
            CollectionRef::new("db3", "codes"),
            ReadPolicy::default(),
        )
    }

    fn meeting() -> MeetingCredentialsRepository {
        MeetingCredentialsRepository::new(
            Arc::new(MemoryStore::new()),
            CollectionRef::new("db3", "zoom"),
            "global_zoom",
        )
    }

    fn request(id: Option<&str>, password: Option<&str>) -> UpdateMeetingCredentialsRequest {
        UpdateMeetingCredentialsRequest {
            meeting_id: id.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn session_code_is_created_then_updated() {
        let repo = codes();
        let first = upsert_session_code(&repo, date(), "ABC1").await.unwrap();
        assert!(first.created);

        let second = upsert_session_code(&repo, date(), "XYZ9").await.unwrap();
        assert!(!second.created);
        assert_eq!(second.session_code.code, "XYZ9");
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_first_create_falls_back_to_update() {
        // Another request creates the date between our lookup and our write.
        let raced = Arc::new(AtomicBool::new(false));
        let mut store = MockDocumentStore::new();

        let seen = raced.clone();
        store.expect_list_documents().returning(move |_, _| {
            let documents = if seen.load(Ordering::SeqCst) {
                vec![code_doc("2025-03-01", "ABC1")]
            } else {
                Vec::new()
            };
            Ok(DocumentPage {
                total: documents.len() as u64,
                documents,
            })
        });
        let race = raced.clone();
        store
            .expect_create_document()
            .times(1)
            .returning(move |_, id, _| {
                race.store(true, Ordering::SeqCst);
                Err(StoreError::Conflict(format!("document {} already exists", id)))
            });
        store
            .expect_update_document()
            .times(1)
            .withf(|_, id, _| id.to_string() == "2025-03-01")
            .returning(|_, id, data| {
                Ok(Document {
                    id: id.to_string(),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                    data,
                })
            });

        let repo = SessionCodeRepository::new(
            Arc::new(store),
            CollectionRef::new("db3", "codes"),
            ReadPolicy::default(),
        );
        let response = upsert_session_code(&repo, date(), "XYZ9").await.unwrap();
        assert!(!response.created);
        assert_eq!(response.session_code.code, "XYZ9");
    }

    #[tokio::test]
    async fn concurrent_identical_create_is_accepted_without_writing() {
        let raced = Arc::new(AtomicBool::new(false));
        let mut store = MockDocumentStore::new();

        let seen = raced.clone();
        store.expect_list_documents().returning(move |_, _| {
            let documents = if seen.load(Ordering::SeqCst) {
                vec![code_doc("2025-03-01", "ABC1")]
            } else {
                Vec::new()
            };
            Ok(DocumentPage {
                total: documents.len() as u64,
                documents,
            })
        });
        let race = raced.clone();
        store.expect_create_document().times(1).returning(move |_, _, _| {
            race.store(true, Ordering::SeqCst);
            Err(StoreError::Conflict("taken".into()))
        });
        store.expect_update_document().never();

        let repo = SessionCodeRepository::new(
            Arc::new(store),
            CollectionRef::new("db3", "codes"),
            ReadPolicy::default(),
        );
        let response = upsert_session_code(&repo, date(), "ABC1").await.unwrap();
        assert!(!response.created);
        assert_eq!(response.session_code.code, "ABC1");
    }

    #[tokio::test]
    async fn identical_session_code_is_a_no_op() {
        let repo = codes();
        upsert_session_code(&repo, date(), "ABC1").await.unwrap();
        let err = upsert_session_code(&repo, date(), "ABC1").await.unwrap_err();
        assert!(matches!(err, UpsertError::NoChanges(_)));
    }

    #[tokio::test]
    async fn malformed_session_code_never_reaches_the_store() {
        let repo = codes();
        for bad in ["abc1", "AB-1", "", "ABCDEFGHIJK"] {
            let err = upsert_session_code(&repo, date(), bad).await.unwrap_err();
            assert!(matches!(err, UpsertError::Invalid(_)), "{}", bad);
        }
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn credentials_partial_update_keeps_stored_fields() {
        let repo = meeting();
        upsert_meeting_credentials(&repo, &request(Some("81234567"), Some("secret1")))
            .await
            .unwrap();

        let updated = upsert_meeting_credentials(&repo, &request(Some(""), Some("newpass")))
            .await
            .unwrap();
        assert_eq!(updated.meeting_id, "81234567");
        assert_eq!(updated.password, "newpass");
    }

    #[tokio::test]
    async fn password_is_stored_as_typed() {
        let repo = meeting();
        let saved = upsert_meeting_credentials(&repo, &request(Some(" 81234567 "), Some(" abcde ")))
            .await
            .unwrap();
        assert_eq!(saved.meeting_id, "81234567");
        assert_eq!(saved.password, " abcde ");
    }

    #[tokio::test]
    async fn identical_credentials_are_a_no_op() {
        let repo = meeting();
        upsert_meeting_credentials(&repo, &request(Some("81234567"), Some("secret1")))
            .await
            .unwrap();
        let err = upsert_meeting_credentials(&repo, &request(Some("81234567"), Some("secret1")))
            .await
            .unwrap_err();
        assert!(matches!(err, UpsertError::NoChanges(_)));

        let err = upsert_meeting_credentials(&repo, &request(None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, UpsertError::NoChanges(_)));
    }

    #[tokio::test]
    async fn credentials_are_validated_after_merge() {
        let repo = meeting();
        let err = upsert_meeting_credentials(&repo, &request(Some("812-345"), Some("secret1")))
            .await
            .unwrap_err();
        assert!(matches!(err, UpsertError::Invalid(_)));

        let err = upsert_meeting_credentials(&repo, &request(Some("812345"), Some("abc")))
            .await
            .unwrap_err();
        match err {
            UpsertError::Invalid(message) => assert!(message.contains("at least 6")),
            other => panic!("unexpected error: {:?}", other),
        }

        // Nothing stored yet, so blank fields cannot fall back to anything.
        let err = upsert_meeting_credentials(&repo, &request(None, Some("secret1")))
            .await
            .unwrap_err();
        assert!(matches!(err, UpsertError::Invalid(_)));
    }
}
