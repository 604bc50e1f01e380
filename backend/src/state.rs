use std::sync::Arc;

use crate::{
    config::Config,
    db::{CollectionRef, DocumentStore, ReadPolicy},
    repositories::{
        AttendanceRepository, MeetingCredentialsRepository, SessionCodeRepository,
        StudentRepository,
    },
    services::token_revocation::TokenRevocationList,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
    pub revoked_tokens: Arc<TokenRevocationList>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        Self {
            store,
            config,
            revoked_tokens: Arc::new(TokenRevocationList::new()),
        }
    }

    pub fn read_policy(&self) -> ReadPolicy {
        ReadPolicy {
            page_size: self.config.list_page_size.max(1),
            attempts: self.config.store_read_retry_attempts.max(1),
            delay: self.config.store_read_retry_delay(),
        }
    }

    pub fn students(&self) -> StudentRepository {
        let ids = &self.config.collections;
        StudentRepository::new(
            self.store.clone(),
            CollectionRef::new(&ids.students_database_id, &ids.students_collection_id),
            self.read_policy(),
        )
    }

    pub fn attendance(&self) -> AttendanceRepository {
        let ids = &self.config.collections;
        AttendanceRepository::new(
            self.store.clone(),
            CollectionRef::new(&ids.attendance_database_id, &ids.attendance_collection_id),
            self.read_policy(),
        )
    }

    pub fn session_codes(&self) -> SessionCodeRepository {
        let ids = &self.config.collections;
        SessionCodeRepository::new(
            self.store.clone(),
            CollectionRef::new(&ids.settings_database_id, &ids.session_code_collection_id),
            self.read_policy(),
        )
    }

    pub fn meeting_credentials(&self) -> MeetingCredentialsRepository {
        let ids = &self.config.collections;
        MeetingCredentialsRepository::new(
            self.store.clone(),
            CollectionRef::new(&ids.settings_database_id, &ids.meeting_collection_id),
            ids.meeting_document_id.clone(),
        )
    }
}
