use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const ENV_GLOBAL: &str = "__ROLLCALL_ENV";
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

fn get_from_env_js() -> Option<String> {
    // Optional global object: window.__ROLLCALL_ENV = { API_BASE_URL: "..." }
    let w = crate::utils::storage::window().ok()?;
    let any = js_sys::Reflect::get(&w, &ENV_GLOBAL.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    js_sys::Reflect::get(&obj, &"API_BASE_URL".into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .or_else(|| js_sys::Reflect::get(&obj, &"api_base_url".into()).ok())
        .and_then(|v| v.as_string())
}

fn cache_base_url(value: &str) -> String {
    let value = normalize_base_url(value);
    let _ = API_BASE_URL.set(value.clone());
    value
}

/// Strips trailing slashes so paths can be appended with `format!`.
pub fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = crate::utils::storage::window().ok()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = get_from_env_js() {
        return cache_base_url(&existing);
    }
    if let Some(url) = fetch_runtime_config().await.and_then(|cfg| cfg.api_base_url) {
        return cache_base_url(&url);
    }
    log::warn!("No runtime API base URL configured; using {}", DEFAULT_API_BASE_URL);
    cache_base_url(DEFAULT_API_BASE_URL)
}

pub async fn init() {
    let _ = await_api_base_url().await;
}
