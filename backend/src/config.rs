use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr, time::Duration};

/// Which document store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Appwrite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "appwrite" => Ok(StoreBackend::Appwrite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("Invalid STORE_BACKEND value: {}", other)),
        }
    }
}

/// Database and collection identifiers for the four logical collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionIds {
    pub students_database_id: String,
    pub attendance_database_id: String,
    pub settings_database_id: String,
    pub students_collection_id: String,
    pub attendance_collection_id: String,
    pub session_code_collection_id: String,
    pub meeting_collection_id: String,
    pub meeting_document_id: String,
}

impl Default for CollectionIds {
    fn default() -> Self {
        Self {
            students_database_id: "db1".into(),
            attendance_database_id: "db2".into(),
            settings_database_id: "db3".into(),
            students_collection_id: "students".into(),
            attendance_collection_id: "attendance".into(),
            session_code_collection_id: "codes".into(),
            meeting_collection_id: "zoom".into(),
            meeting_document_id: "global_zoom".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub time_zone: Tz,
    pub store_backend: StoreBackend,
    pub appwrite_endpoint: String,
    pub appwrite_project_id: String,
    pub appwrite_api_key: String,
    pub collections: CollectionIds,
    pub admin_username: String,
    pub admin_password: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    pub absence_threshold: u32,
    pub list_page_size: u32,
    pub store_read_retry_attempts: u32,
    pub store_read_retry_delay_ms: u64,
    pub rate_limit_enabled: bool,
    pub rate_limit_ip_max_requests: u32,
    pub rate_limit_ip_window_seconds: u64,
    pub cors_allow_origins: Vec<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let time_zone_name = env_or("APP_TIMEZONE", "UTC");
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let store_backend: StoreBackend = env_or("STORE_BACKEND", "appwrite").parse()?;

        let appwrite_endpoint = env_or("APPWRITE_ENDPOINT", "");
        let appwrite_project_id = env_or("APPWRITE_PROJECT_ID", "");
        let appwrite_api_key = env_or("APPWRITE_API_KEY", "");
        if store_backend == StoreBackend::Appwrite
            && (appwrite_endpoint.is_empty() || appwrite_project_id.is_empty())
        {
            return Err(anyhow!(
                "APPWRITE_ENDPOINT and APPWRITE_PROJECT_ID are required when STORE_BACKEND=appwrite"
            ));
        }

        let defaults = CollectionIds::default();
        let collections = CollectionIds {
            students_database_id: env_or("STUDENTS_DATABASE_ID", &defaults.students_database_id),
            attendance_database_id: env_or(
                "ATTENDANCE_DATABASE_ID",
                &defaults.attendance_database_id,
            ),
            settings_database_id: env_or("SETTINGS_DATABASE_ID", &defaults.settings_database_id),
            students_collection_id: env_or(
                "STUDENTS_COLLECTION_ID",
                &defaults.students_collection_id,
            ),
            attendance_collection_id: env_or(
                "ATTENDANCE_COLLECTION_ID",
                &defaults.attendance_collection_id,
            ),
            session_code_collection_id: env_or(
                "SESSION_CODE_COLLECTION_ID",
                &defaults.session_code_collection_id,
            ),
            meeting_collection_id: env_or("MEETING_COLLECTION_ID", &defaults.meeting_collection_id),
            meeting_document_id: env_or("MEETING_DOCUMENT_ID", &defaults.meeting_document_id),
        };

        let admin_username = env::var("ADMIN_USERNAME").context("ADMIN_USERNAME must be set")?;
        let admin_password = env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
        if admin_username.trim().is_empty() || admin_password.is_empty() {
            return Err(anyhow!("ADMIN_USERNAME and ADMIN_PASSWORD must not be empty"));
        }

        let jwt_secret = env_or("JWT_SECRET", "your-secret-key-change-this-in-production");

        let absence_threshold: u32 = parse_env("ABSENCE_THRESHOLD", 5)?;
        if absence_threshold == 0 {
            return Err(anyhow!("ABSENCE_THRESHOLD must be at least 1"));
        }
        let list_page_size: u32 = parse_env("LIST_PAGE_SIZE", 100)?;
        if !(1..=5000).contains(&list_page_size) {
            return Err(anyhow!("LIST_PAGE_SIZE must be between 1 and 5000"));
        }

        let cors_allow_origins = env_or("CORS_ALLOW_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Config {
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000"),
            time_zone,
            store_backend,
            appwrite_endpoint,
            appwrite_project_id,
            appwrite_api_key,
            collections,
            admin_username,
            admin_password,
            jwt_secret,
            jwt_expiration_hours: parse_env("JWT_EXPIRATION_HOURS", 12)?,
            absence_threshold,
            list_page_size,
            store_read_retry_attempts: parse_env::<u32>("STORE_READ_RETRY_ATTEMPTS", 3)?.max(1),
            store_read_retry_delay_ms: parse_env("STORE_READ_RETRY_DELAY_MS", 1000)?,
            rate_limit_enabled: parse_env("RATE_LIMIT_ENABLED", true)?,
            rate_limit_ip_max_requests: parse_env("RATE_LIMIT_IP_MAX_REQUESTS", 30)?,
            rate_limit_ip_window_seconds: parse_env("RATE_LIMIT_IP_WINDOW_SECONDS", 60)?,
            cors_allow_origins,
        })
    }

    pub fn store_read_retry_delay(&self) -> Duration {
        Duration::from_millis(self.store_read_retry_delay_ms)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow!("Invalid {} value: {}", key, raw)),
        _ => Ok(default),
    }
}
