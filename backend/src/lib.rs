pub mod app;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod types;
pub mod utils;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::{CollectionIds, Config, StoreBackend};

    pub fn test_config() -> Config {
        Config {
            bind_addr: "127.0.0.1:0".into(),
            time_zone: chrono_tz::Asia::Yangon,
            store_backend: StoreBackend::Memory,
            appwrite_endpoint: String::new(),
            appwrite_project_id: String::new(),
            appwrite_api_key: String::new(),
            collections: CollectionIds::default(),
            admin_username: "admin".into(),
            admin_password: "admin-password".into(),
            jwt_secret: "test-secret".into(),
            jwt_expiration_hours: 1,
            absence_threshold: 5,
            list_page_size: 100,
            store_read_retry_attempts: 1,
            store_read_retry_delay_ms: 0,
            rate_limit_enabled: false,
            rate_limit_ip_max_requests: 30,
            rate_limit_ip_window_seconds: 60,
            cors_allow_origins: Vec::new(),
        }
    }
}
