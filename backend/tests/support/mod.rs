#![allow(dead_code)]
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use rollcall_backend::{
    app::build_router,
    config::{CollectionIds, Config, StoreBackend},
    db::{CollectionRef, Document, DocumentData, MemoryStore},
    state::AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "moderator";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

pub fn test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".into(),
        time_zone: chrono_tz::Asia::Yangon,
        store_backend: StoreBackend::Memory,
        appwrite_endpoint: String::new(),
        appwrite_project_id: String::new(),
        appwrite_api_key: String::new(),
        collections: CollectionIds::default(),
        admin_username: ADMIN_USERNAME.into(),
        admin_password: ADMIN_PASSWORD.into(),
        jwt_secret: "integration-test-secret".into(),
        jwt_expiration_hours: 1,
        absence_threshold: 5,
        list_page_size: 2,
        store_read_retry_attempts: 1,
        store_read_retry_delay_ms: 0,
        rate_limit_enabled: false,
        rate_limit_ip_max_requests: 30,
        rate_limit_ip_window_seconds: 60,
        cors_allow_origins: Vec::new(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub config: Config,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let store = MemoryStore::new().with_unique_attribute(students_collection(&config), "studentId");
        let state = AppState::new(Arc::new(store.clone()), config.clone());
        let router = build_router(state).expect("build router");
        Self {
            router,
            store,
            config,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let response = self.raw_request(method, uri, body, token).await;
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn raw_request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("build request"),
            None => builder.body(Body::empty()).expect("build request"),
        };
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/admin/login",
                Some(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }

    pub fn seed_student(&self, student_id: &str, name: &str, handle: Option<&str>) {
        let mut data = DocumentData::new();
        data.insert("studentId".into(), json!(student_id));
        data.insert("studentName".into(), json!(name));
        if let Some(handle) = handle {
            data.insert("telegramUsername".into(), json!(handle));
        }
        self.store.insert_document(
            &students_collection(&self.config),
            document(student_id, Utc::now(), data),
        );
    }

    pub fn seed_attendance(&self, student_id: &str, name: &str, code: &str, at: DateTime<Utc>) {
        let mut data = DocumentData::new();
        data.insert("studentId".into(), json!(student_id));
        data.insert("studentName".into(), json!(name));
        data.insert("attendanceCode".into(), json!(code));
        let ids = &self.config.collections;
        self.store.insert_document(
            &CollectionRef::new(&ids.attendance_database_id, &ids.attendance_collection_id),
            document(&uuid::Uuid::new_v4().simple().to_string(), at, data),
        );
    }

    pub fn seed_session_code(&self, date: &str, code: &str) {
        let mut data = DocumentData::new();
        data.insert("date".into(), json!(date));
        data.insert("code".into(), json!(code));
        let ids = &self.config.collections;
        self.store.insert_document(
            &CollectionRef::new(&ids.settings_database_id, &ids.session_code_collection_id),
            document(&uuid::Uuid::new_v4().simple().to_string(), Utc::now(), data),
        );
    }

    pub fn seed_meeting(&self, meeting_id: Value, password: &str) {
        let mut data = DocumentData::new();
        data.insert("zoomId".into(), meeting_id);
        data.insert("zoomPassword".into(), json!(password));
        let ids = &self.config.collections;
        self.store.insert_document(
            &CollectionRef::new(&ids.settings_database_id, &ids.meeting_collection_id),
            document(&ids.meeting_document_id, Utc::now(), data),
        );
    }
}

pub fn students_collection(config: &Config) -> CollectionRef {
    let ids = &config.collections;
    CollectionRef::new(&ids.students_database_id, &ids.students_collection_id)
}

fn document(id: &str, at: DateTime<Utc>, data: DocumentData) -> Document {
    Document {
        id: id.to_string(),
        created_at: at,
        updated_at: at,
        data,
    }
}
